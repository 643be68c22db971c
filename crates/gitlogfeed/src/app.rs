// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! One feed generation run against a git repository

use gitlogfeed_git::GitLog;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::pipeline::{Generator, RunSummary};

/// Runs git, writes the commit pages and then the feed
#[derive(Debug, Clone)]
pub struct App {
    config: Config,
}

impl App {
    /// Create an app for the given configuration
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this app runs with
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate the configuration and generate the feed
    ///
    /// The feed is only written once git has exited successfully.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for invalid settings, `AppError::Git` if
    /// git fails or its output is malformed and `AppError::Write` if an
    /// output file cannot be written.
    pub fn run(&self) -> Result<RunSummary, AppError> {
        self.config.validate()?;

        info!(
            repo = %self.config.repo.display(),
            output = %self.config.output_dir.display(),
            limit = self.config.log_limit,
            "Generating feed"
        );

        let mut stream = GitLog::new(&self.config.repo, self.config.log_options()).spawn()?;
        let mut generator = Generator::new(self.config.feed_settings(), &self.config.output_dir);
        generator.write_pages(&mut stream)?;
        stream.finish()?;

        generator.write_feed()
    }
}
