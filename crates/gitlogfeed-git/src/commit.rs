//! Git commit types

use chrono::{DateTime, FixedOffset};

/// A commit parsed from the log stream, together with its patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The commit hash (40 or 64 hex characters)
    pub hash: String,
    /// First line of the commit message
    pub title: String,
    /// Author date
    pub date: DateTime<FixedOffset>,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Message body lines following the title
    pub message: Vec<String>,
    /// Raw unified diff lines, without line terminators
    pub patch: Vec<Vec<u8>>,
}

impl Commit {
    /// Check whether a line is a bare commit hash (SHA-1 or SHA-256, lowercase hex)
    #[must_use]
    pub fn is_valid_hash(hash: &str) -> bool {
        matches!(hash.len(), 40 | 64)
            && hash
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }

    /// File name of the rendered patch page for this commit
    #[must_use]
    pub fn page_name(&self) -> String {
        format!("{}.html", self.hash)
    }

    /// Move the patch lines out, leaving an empty patch behind
    pub fn take_patch(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.patch)
    }
}
