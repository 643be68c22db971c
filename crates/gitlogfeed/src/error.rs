// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for the gitlogfeed command

use std::path::PathBuf;

use gitlogfeed_git::GitError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort a feed generation run
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or parsing the git log failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// An output file could not be written
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configuration is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),
}
