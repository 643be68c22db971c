// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitlogfeed-git: Git log processing for gitlogfeed
//!
//! This library crate runs `git log -p` and parses its output into
//! [`Commit`] records, one per commit, each carrying its own patch lines.

//! # Example
//!
//! ```no_run
//! use gitlogfeed_git::{GitLog, LogOptions, LogParser};
//!
//! let mut stream = GitLog::new(".", LogOptions::latest(10))
//!     .spawn()
//!     .expect("spawn git");
//!
//! for commit in LogParser::new(&mut stream) {
//!     let commit = commit.expect("parse commit");
//!     println!("{} - {}", commit.short_hash(), commit.title);
//! }
//!
//! stream.finish().expect("git exited cleanly");
//! ```

#![warn(missing_docs)]

pub mod commit;
pub mod error;
pub mod parser;
pub mod source;

pub use commit::Commit;
pub use error::GitError;
pub use parser::{ByteLines, LogParser, parse_log};
pub use source::{GitLog, LogOptions, LogStream};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::Commit;
    pub use crate::error::GitError;
    pub use crate::parser::{LogParser, parse_log};
    pub use crate::source::{GitLog, LogOptions};
}
