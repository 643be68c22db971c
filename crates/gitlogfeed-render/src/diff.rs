//! Diff line classification
//!
//! Every line of a patch is assigned a [`LineCategory`]. The only state is
//! whether the current line sits inside a per-file header block (the
//! `diff`/`index`/`---`/`+++` lines before the first hunk), which is carried
//! explicitly in a [`DiffScope`] value.
//!
//! # Example
//!
//! ```
//! use gitlogfeed_render::diff::{LineCategory, colorize};
//!
//! let patch = ["diff --git a/x b/x", "--- a/x", "+++ b/x", "@@ -1 +1 @@", "-old", "+new"];
//! let categories: Vec<_> = colorize(&patch).map(|l| l.category).collect();
//!
//! assert_eq!(categories, [
//!     LineCategory::Header,
//!     LineCategory::Header,
//!     LineCategory::Header,
//!     LineCategory::Header,
//!     LineCategory::Deletion,
//!     LineCategory::Addition,
//! ]);
//! ```

use std::fmt;

/// Prefix of the first line of a per-file diff section
pub const SECTION_START: &[u8] = b"diff ";

/// Prefix of a hunk header
pub const HUNK_START: &[u8] = b"@@ ";

/// Display category of a patch line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineCategory {
    /// Per-file header line (including the hunk header that ends the block)
    Header,
    /// Unchanged or unrecognized line
    Context,
    /// Added line
    Addition,
    /// Removed line
    Deletion,
}

/// Background color token of a rendered line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Context lines
    White,
    /// Header lines after the first one of a section
    Grey,
    /// The first line of a section
    Blue,
    /// Added lines
    Green,
    /// Removed lines
    Pink,
}

impl Color {
    /// CSS color name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Grey => "lightgrey",
            Color::Blue => "lightblue",
            Color::Green => "lightgreen",
            Color::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of one line, plus whether it opens a per-file section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Display category
    pub category: LineCategory,
    /// True for the `diff ` line that starts a header block
    pub section_start: bool,
}

impl Classification {
    fn plain(category: LineCategory) -> Self {
        Self {
            category,
            section_start: false,
        }
    }

    /// Background color for this classification
    #[must_use]
    pub fn color(self) -> Color {
        match self.category {
            LineCategory::Header if self.section_start => Color::Blue,
            LineCategory::Header => Color::Grey,
            LineCategory::Context => Color::White,
            LineCategory::Addition => Color::Green,
            LineCategory::Deletion => Color::Pink,
        }
    }
}

/// Classification state carried from one line to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffScope {
    in_header: bool,
}

impl DiffScope {
    /// Scope at the start of a patch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the next line is inside a per-file header block
    #[must_use]
    pub fn in_header(self) -> bool {
        self.in_header
    }

    /// Classify one line and return the scope for the following line
    #[must_use]
    pub fn classify(self, line: &[u8]) -> (Classification, DiffScope) {
        if self.in_header {
            let next = DiffScope {
                in_header: !line.starts_with(HUNK_START),
            };
            return (Classification::plain(LineCategory::Header), next);
        }

        if line.starts_with(SECTION_START) {
            let classification = Classification {
                category: LineCategory::Header,
                section_start: true,
            };
            return (classification, DiffScope { in_header: true });
        }

        let category = match line.first() {
            Some(b'+') => LineCategory::Addition,
            Some(b'-') => LineCategory::Deletion,
            _ => LineCategory::Context,
        };
        (Classification::plain(category), self)
    }
}

/// A patch line with its display category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorizedLine<'a> {
    /// Raw line bytes
    pub text: &'a [u8],
    /// Display category
    pub category: LineCategory,
    /// True for the first line of a per-file section
    pub section_start: bool,
}

impl ColorizedLine<'_> {
    /// Background color for this line
    #[must_use]
    pub fn color(&self) -> Color {
        Classification {
            category: self.category,
            section_start: self.section_start,
        }
        .color()
    }
}

/// Iterator adapter threading a [`DiffScope`] through a sequence of lines
#[derive(Debug, Clone)]
pub struct Colorize<I> {
    lines: I,
    scope: DiffScope,
}

impl<'a, I, T> Iterator for Colorize<I>
where
    I: Iterator<Item = &'a T>,
    T: AsRef<[u8]> + ?Sized + 'a,
{
    type Item = ColorizedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text: &'a [u8] = self.lines.next()?.as_ref();
        let (classification, next) = self.scope.classify(text);
        self.scope = next;
        Some(ColorizedLine {
            text,
            category: classification.category,
            section_start: classification.section_start,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

/// Classify a whole patch, starting from a fresh [`DiffScope`]
pub fn colorize<'a, I, T>(lines: I) -> Colorize<I::IntoIter>
where
    I: IntoIterator<Item = &'a T>,
    T: AsRef<[u8]> + ?Sized + 'a,
{
    Colorize {
        lines: lines.into_iter(),
        scope: DiffScope::new(),
    }
}
