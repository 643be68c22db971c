// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for gitlogfeed-render

use thiserror::Error;

/// Errors that can occur while rendering a commit page
#[derive(Debug, Error)]
pub enum RenderError {
    /// A patch line is not valid UTF-8
    #[error("Patch line {line} is not valid UTF-8: {source}")]
    Encoding {
        /// 1-based line number within the patch
        line: usize,
        /// Underlying decoding error
        source: std::str::Utf8Error,
    },
}
