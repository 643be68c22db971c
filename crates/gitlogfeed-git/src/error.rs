// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitlogfeed-git

use std::process::ExitStatus;

use thiserror::Error;

/// Errors that can occur while reading or parsing the git log stream
#[derive(Debug, Error)]
pub enum GitError {
    /// The log stream does not follow the expected section format
    #[error("Malformed log at line {line}: {reason}")]
    MalformedLog {
        /// 1-based line number where the problem was detected
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Error reading the log stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was expected to hold a repository
        path: String,
    },

    /// The git executable could not be started
    #[error("Failed to start git: {source}")]
    Spawn {
        /// Underlying spawn error
        source: std::io::Error,
    },

    /// git exited unsuccessfully
    #[error("git log failed with {status}")]
    CommandFailed {
        /// Exit status reported by the child process
        status: ExitStatus,
    },
}

impl GitError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLog {
            line,
            reason: reason.into(),
        }
    }
}
