// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitlogfeed library
//!
//! This module exports the command's configuration and pipeline for use in
//! integration tests and as a library.

pub mod app;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use app::App;
pub use config::{Config, ConfigError};
pub use error::AppError;
pub use pipeline::{Generator, RunSummary, generate};
