// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitlogfeed-render: Pages and feeds for parsed commits
//!
//! This library crate classifies patch lines for display, renders one HTML
//! page per commit and builds the Atom feed that links to those pages.
//!
//! # Example
//!
//! ```
//! use gitlogfeed_render::{FeedBuilder, FeedSettings, render_page};
//!
//! let page = render_page("Fix parser", &["@@ -1 +1 @@", "-old", "+new"]).unwrap();
//! assert!(page.contains("background-color:pink"));
//!
//! let feed = FeedBuilder::new(FeedSettings::new("Log", "https://example.com", "atom.xml"));
//! assert!(feed.finish().starts_with("<?xml"));
//! ```

#![warn(missing_docs)]

pub mod diff;
pub mod error;
pub mod escape;
pub mod feed;
pub mod html;

pub use diff::{Color, ColorizedLine, DiffScope, LineCategory, colorize};
pub use error::RenderError;
pub use escape::{escape_html, escape_xml};
pub use feed::{FeedBuilder, FeedEntry, FeedSettings, summary_text};
pub use html::{render_page, render_page_lossy};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::RenderError;
    pub use crate::feed::{FeedBuilder, FeedSettings};
    pub use crate::html::{render_page, render_page_lossy};
}
