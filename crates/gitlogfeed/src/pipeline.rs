// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Feed generation pipeline
//!
//! Commits are parsed one at a time; each commit's page is rendered and
//! written before the next one is parsed, so only the feed entries stay in
//! memory. The feed document is written last.

use std::io;
use std::path::{Path, PathBuf};

use gitlogfeed_git::{Commit, LogParser};
use gitlogfeed_render::{FeedBuilder, FeedSettings, RenderError, render_page, render_page_lossy};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::output::write_atomic;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of commits published
    pub commits: usize,
    /// Pages rendered with invalid UTF-8 replaced
    pub pages_lossy: usize,
    /// Location of the written feed document
    pub feed_path: PathBuf,
}

/// Writes commit pages and, at the end, the feed into one directory
#[derive(Debug)]
pub struct Generator {
    output_dir: PathBuf,
    feed: FeedBuilder,
    pages_lossy: usize,
}

impl Generator {
    /// Create a generator writing into `output_dir`
    #[must_use]
    pub fn new(settings: FeedSettings, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            feed: FeedBuilder::new(settings),
            pages_lossy: 0,
        }
    }

    /// Number of commits processed so far
    #[must_use]
    pub fn commits(&self) -> usize {
        self.feed.len()
    }

    /// Parse a log stream and write one page per commit
    ///
    /// # Errors
    ///
    /// Returns `AppError::Git` on a malformed or unreadable stream and
    /// `AppError::Write` if a page cannot be written. Pages written before
    /// the error stay in place.
    pub fn write_pages<I>(&mut self, lines: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = io::Result<Vec<u8>>>,
    {
        for commit in LogParser::new(lines.into_iter()) {
            self.write_page(commit?)?;
        }
        Ok(())
    }

    /// Render and write the page for one commit, then add its feed entry
    ///
    /// # Errors
    ///
    /// Returns `AppError::Write` if the page cannot be written.
    pub fn write_page(&mut self, mut commit: Commit) -> Result<(), AppError> {
        let patch = commit.take_patch();
        let html = match render_page(&commit.title, &patch) {
            Ok(html) => html,
            Err(RenderError::Encoding { line, source }) => {
                warn!(
                    hash = %commit.hash,
                    line,
                    error = %source,
                    "Patch is not valid UTF-8, replacing invalid bytes"
                );
                self.pages_lossy += 1;
                render_page_lossy(&commit.title, &patch)
            }
        };

        write_atomic(&self.output_dir, &commit.page_name(), html.as_bytes())?;
        debug!(hash = %commit.short_hash(), lines = patch.len(), "Wrote commit page");

        self.feed.push(&commit);
        Ok(())
    }

    /// Write the feed document
    ///
    /// # Errors
    ///
    /// Returns `AppError::Write` if the feed cannot be written.
    pub fn write_feed(self) -> Result<RunSummary, AppError> {
        let xml = self.feed.finish();
        let feed_path = write_atomic(
            &self.output_dir,
            &self.feed.settings().feed_name,
            xml.as_bytes(),
        )?;

        let summary = RunSummary {
            commits: self.feed.len(),
            pages_lossy: self.pages_lossy,
            feed_path,
        };
        info!(
            commits = summary.commits,
            pages_lossy = summary.pages_lossy,
            feed = %summary.feed_path.display(),
            "Feed written"
        );
        Ok(summary)
    }
}

/// Generate pages and the feed from any log line source
///
/// # Errors
///
/// Returns the first parse or write error. No feed is written when the
/// stream is malformed.
pub fn generate<I>(
    lines: I,
    settings: &FeedSettings,
    output_dir: &Path,
) -> Result<RunSummary, AppError>
where
    I: IntoIterator<Item = io::Result<Vec<u8>>>,
{
    let mut generator = Generator::new(settings.clone(), output_dir);
    generator.write_pages(lines)?;
    generator.write_feed()
}
