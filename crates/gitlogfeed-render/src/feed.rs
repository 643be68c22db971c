// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Atom feed rendering
//!
//! The feed lists one entry per commit, in the order commits are pushed,
//! each linking to the commit's rendered page.
//!
//! # Example
//!
//! ```
//! use gitlogfeed_render::feed::{FeedBuilder, FeedSettings};
//!
//! let settings = FeedSettings::new("Git log feed", "https://example.com/log/", "atom.xml");
//! let feed = FeedBuilder::new(settings);
//! let xml = feed.finish();
//!
//! assert!(xml.contains(r#"<link href="https://example.com/log/atom.xml" rel="self"/>"#));
//! assert!(!xml.contains("<entry>"));
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use gitlogfeed_git::Commit;
use tracing::debug;

use crate::escape::escape_xml;

/// Atom XML namespace
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

/// Feed-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    /// Feed title
    pub title: String,
    /// URL the feed and pages are published under, without a trailing `/`
    pub base_url: String,
    /// File name of the feed document
    pub feed_name: String,
}

impl FeedSettings {
    /// Create settings, dropping any trailing `/` from the base URL
    #[must_use]
    pub fn new(title: &str, base_url: &str, feed_name: &str) -> Self {
        Self {
            title: title.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            feed_name: feed_name.to_string(),
        }
    }

    /// URL of the feed document itself
    #[must_use]
    pub fn self_link(&self) -> String {
        self.link_to(&self.feed_name)
    }

    /// URL of a file published next to the feed
    #[must_use]
    pub fn link_to(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }
}

/// One feed entry, derived from a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Entry identifier (`urn:sha256:<hash>`)
    pub id: String,
    /// Commit title
    pub title: String,
    /// Commit date, used for both `updated` and `published`
    pub date: DateTime<FixedOffset>,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Full commit message
    pub summary: String,
    /// Link to the commit's page
    pub link: String,
}

impl FeedEntry {
    /// Build the entry for a commit
    #[must_use]
    pub fn from_commit(commit: &Commit, settings: &FeedSettings) -> Self {
        Self {
            id: format!("urn:sha256:{}", commit.hash),
            title: commit.title.clone(),
            date: commit.date,
            author_name: commit.author_name.clone(),
            author_email: commit.author_email.clone(),
            summary: summary_text(commit),
            link: settings.link_to(&commit.page_name()),
        }
    }
}

/// Message text shown in an entry summary
///
/// The title, then a blank line and the body lines when there is a body.
#[must_use]
pub fn summary_text(commit: &Commit) -> String {
    if commit.message.is_empty() {
        return commit.title.clone();
    }
    format!("{}\n\n{}", commit.title, commit.message.join("\n"))
}

fn atom_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Accumulates feed entries and renders the Atom document
#[derive(Debug, Clone)]
pub struct FeedBuilder {
    settings: FeedSettings,
    entries: Vec<FeedEntry>,
}

impl FeedBuilder {
    /// Create an empty feed
    #[must_use]
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            entries: Vec::new(),
        }
    }

    /// Feed settings
    #[must_use]
    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    /// Append the entry for a commit
    pub fn push(&mut self, commit: &Commit) -> &FeedEntry {
        let entry = FeedEntry::from_commit(commit, &self.settings);
        debug!(id = %entry.id, "Added feed entry");
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Entries in push order
    #[must_use]
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been pushed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Feed `updated` timestamp: the first entry's date, or `now` when empty
    #[must_use]
    pub fn updated(&self, now: DateTime<Utc>) -> DateTime<FixedOffset> {
        self.entries
            .first()
            .map_or_else(|| now.fixed_offset(), |entry| entry.date)
    }

    /// Render the feed using the current time for an empty feed
    #[must_use]
    pub fn finish(&self) -> String {
        self.render(Utc::now())
    }

    /// Render the feed document
    #[must_use]
    pub fn render(&self, now: DateTime<Utc>) -> String {
        let mut xml = XmlWriter::default();

        xml.raw("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        xml.open("feed", &[("xmlns", ATOM_NAMESPACE)]);
        xml.empty(
            "link",
            &[("href", &self.settings.self_link()), ("rel", "self")],
        );
        xml.leaf("id", &self.settings.base_url);
        xml.leaf("title", &self.settings.title);
        xml.leaf("updated", &atom_date(&self.updated(now)));

        for entry in &self.entries {
            let date = atom_date(&entry.date);

            xml.open("entry", &[]);
            xml.leaf("id", &entry.id);
            xml.leaf("title", &entry.title);
            xml.leaf("updated", &date);
            xml.leaf("published", &date);
            xml.open("summary", &[("type", "html")]);
            xml.leaf("pre", &entry.summary);
            xml.close("summary");
            xml.open("author", &[]);
            xml.leaf("name", &entry.author_name);
            xml.leaf("email", &entry.author_email);
            xml.close("author");
            xml.empty("link", &[("href", &entry.link), ("rel", "alternate")]);
            xml.close("entry");
        }

        xml.close("feed");
        xml.into_string()
    }
}

/// Minimal writer for the fixed Atom layout
#[derive(Debug, Default)]
struct XmlWriter {
    out: String,
}

impl XmlWriter {
    fn raw(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            self.out.push(' ');
            self.out.push_str(key);
            self.out.push_str("=\"");
            self.out.push_str(&escape_xml(value));
            self.out.push('"');
        }
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.out.push_str(">\n");
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.start_tag(name, attrs);
        self.out.push_str("/>\n");
    }

    fn leaf(&mut self, name: &str, text: &str) {
        self.start_tag(name, &[]);
        self.out.push('>');
        self.out.push_str(&escape_xml(text));
        self.close(name);
    }

    fn close(&mut self, name: &str) {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push_str(">\n");
    }

    fn into_string(self) -> String {
        self.out
    }
}
