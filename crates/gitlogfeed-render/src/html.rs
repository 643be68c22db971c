// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-commit HTML pages
//!
//! A page is a `<pre>` block with one background-colored `<span>` per patch
//! line. The output depends only on the title and the lines.
//!
//! # Example
//!
//! ```
//! use gitlogfeed_render::html::render_page;
//!
//! let page = render_page("Fix <bug>", &["@@ -1 +1 @@", "+new"]).unwrap();
//! assert!(page.contains("<title>Fix &lt;bug&gt;</title>"));
//! assert!(page.contains(r#"<span style="background-color:lightgreen">+new"#));
//! ```

use std::borrow::Cow;
use std::convert::Infallible;

use crate::diff::colorize;
use crate::error::RenderError;
use crate::escape::escape_html;

/// Render a page, failing on the first line that is not valid UTF-8
///
/// # Errors
///
/// Returns `RenderError::Encoding` with the 1-based line number of the
/// offending patch line.
pub fn render_page<T: AsRef<[u8]>>(title: &str, lines: &[T]) -> Result<String, RenderError> {
    render_with(title, lines, |line, bytes| {
        std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|source| RenderError::Encoding { line, source })
    })
}

/// Render a page, replacing invalid UTF-8 sequences with U+FFFD
#[must_use]
pub fn render_page_lossy<T: AsRef<[u8]>>(title: &str, lines: &[T]) -> String {
    let rendered: Result<String, Infallible> =
        render_with(title, lines, |_, bytes| Ok(String::from_utf8_lossy(bytes)));
    match rendered {
        Ok(page) => page,
        Err(never) => match never {},
    }
}

fn render_with<'a, T, E, F>(title: &str, lines: &'a [T], decode: F) -> Result<String, E>
where
    T: AsRef<[u8]>,
    F: Fn(usize, &'a [u8]) -> Result<Cow<'a, str>, E>,
{
    let body_len: usize = lines.iter().map(|l| l.as_ref().len() + 48).sum();
    let mut out = String::with_capacity(body_len + 160);

    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>");
    out.push_str(&escape_html(title));
    out.push_str("</title></head><body><pre>\n");

    for (index, line) in colorize(lines).enumerate() {
        let text = decode(index + 1, line.text)?;
        out.push_str("<span style=\"background-color:");
        out.push_str(line.color().as_str());
        out.push_str("\">");
        out.push_str(&escape_html(&text));
        out.push_str("\n</span>");
    }

    out.push_str("</pre></body></html>\n");
    Ok(out)
}
