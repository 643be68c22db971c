// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the gitlogfeed command
//!
//! Every option can be given as a flag or through a `GITLOGFEED_*`
//! environment variable.

use std::path::PathBuf;

use clap::Parser;
use gitlogfeed_git::LogOptions;
use gitlogfeed_render::FeedSettings;

/// Default number of commits in the feed
pub const DEFAULT_LOG_LIMIT: usize = 20;

/// Default lines of diff context (large enough to show whole files)
pub const DEFAULT_DIFF_CONTEXT: u32 = 5000;

/// Default feed document name
pub const DEFAULT_FEED_NAME: &str = "atom.xml";

/// Default feed title
pub const DEFAULT_FEED_TITLE: &str = "Git log feed";

/// Publish recent git commits as an Atom feed with one HTML page per commit
#[derive(Parser, Debug, Clone)]
#[command(name = "gitlogfeed")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Path to the git repository (working tree)
    #[arg(long, env = "GITLOGFEED_REPO", default_value = ".")]
    pub repo: PathBuf,

    /// Only include commits touching paths matching this pathspec
    ///
    /// Passed to git after `--`, so globs such as `*.py` work.
    #[arg(long, env = "GITLOGFEED_FILTER_PATH")]
    pub filter_path: Option<String>,

    /// Maximum number of commits in the feed
    #[arg(long, env = "GITLOGFEED_LOG_LIMIT", default_value_t = DEFAULT_LOG_LIMIT)]
    pub log_limit: usize,

    /// Lines of context around each change in commit pages
    #[arg(long, env = "GITLOGFEED_DIFF_CONTEXT", default_value_t = DEFAULT_DIFF_CONTEXT)]
    pub diff_context: u32,

    /// URL the feed and pages will be published under
    ///
    /// Feed links are `<base-url>/<feed-name>` and `<base-url>/<hash>.html`.
    #[arg(long, env = "GITLOGFEED_BASE_URL")]
    pub base_url: String,

    /// File name of the Atom document
    #[arg(long, env = "GITLOGFEED_FEED_NAME", default_value = DEFAULT_FEED_NAME)]
    pub feed_name: String,

    /// Title of the feed
    #[arg(long, env = "GITLOGFEED_FEED_TITLE", default_value = DEFAULT_FEED_TITLE)]
    pub feed_title: String,

    /// Directory the feed and pages are written to
    ///
    /// Created if it does not exist.
    #[arg(short, long, env = "GITLOGFEED_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every parsed commit and written page. Logs go to stderr.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: PathBuf::from("."),
            filter_path: None,
            log_limit: DEFAULT_LOG_LIMIT,
            diff_context: DEFAULT_DIFF_CONTEXT,
            base_url: String::new(),
            feed_name: DEFAULT_FEED_NAME.to_string(),
            feed_title: DEFAULT_FEED_TITLE.to_string(),
            output_dir: PathBuf::from("."),
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate the configuration
    ///
    /// Creates the output directory when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository path doesn't exist or isn't a directory
    /// - The base URL is empty
    /// - The output path exists but isn't a directory, or can't be created
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.repo.is_dir() {
            return Err(ConfigError::RepositoryNotFound(self.repo.clone()));
        }

        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if self.output_dir.exists() {
            if !self.output_dir.is_dir() {
                return Err(ConfigError::OutputNotDirectory(self.output_dir.clone()));
            }
        } else {
            std::fs::create_dir_all(&self.output_dir).map_err(|e| {
                ConfigError::OutputDirectoryCreateFailed(self.output_dir.clone(), e)
            })?;
        }

        Ok(())
    }

    /// Options for the git log invocation
    #[must_use]
    pub fn log_options(&self) -> LogOptions {
        let options = LogOptions::latest(self.log_limit).with_diff_context(self.diff_context);
        match &self.filter_path {
            Some(path) => options.with_filter_path(path.as_str()),
            None => options,
        }
    }

    /// Settings for the feed document
    #[must_use]
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings::new(&self.feed_title, &self.base_url, &self.feed_name)
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Repository path not found
    #[error("Repository path not found or not a directory: {0}")]
    RepositoryNotFound(PathBuf),

    /// Output path exists but is not a directory
    #[error("Output path is not a directory: {0}")]
    OutputNotDirectory(PathBuf),

    /// Failed to create the output directory
    #[error("Failed to create output directory {0}: {1}")]
    OutputDirectoryCreateFailed(PathBuf, std::io::Error),

    /// Base URL is empty
    #[error("Base URL must not be empty")]
    EmptyBaseUrl,
}
