//! Markup escaping shared by the HTML and Atom writers

use std::borrow::Cow;

/// Escape text for use in HTML element content or attribute values
///
/// Replaces `&`, `<`, `>`, `"` and `'` with character references. Returns the
/// input unchanged when nothing needs escaping.
///
/// # Example
///
/// ```
/// use gitlogfeed_render::escape::escape_html;
///
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape_with(text, |_| false)
}

/// Escape text for use in XML 1.0 content or attribute values
///
/// Like [`escape_html`], but control characters that XML 1.0 does not allow
/// anywhere in a document are replaced with U+FFFD.
#[must_use]
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    escape_with(text, is_xml_forbidden)
}

fn is_xml_forbidden(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{b}' | '\u{c}' | '\u{e}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}')
}

fn escape_with(text: &str, forbidden: impl Fn(char) -> bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>' | '"' | '\'') || forbidden(c);

    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c if forbidden(c) => out.push('\u{fffd}'),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
