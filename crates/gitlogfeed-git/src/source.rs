// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Log stream source
//!
//! Runs `git log -p` with a format string matching [`crate::parser`] and
//! exposes its standard output as an iterator of raw lines.

use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::debug;

use crate::error::GitError;
use crate::parser::ByteLines;

/// Pretty format passed to `git log`
///
/// Prints the hash line, the four metadata lines and the body, then a line
/// holding a single NUL byte that ends the message block.
pub const LOG_FORMAT: &str = "format:%H%ntitle,%s%ndate,%aI%nname,%an%nemail,%ae%n%b%n%x00";

/// Configuration for the log invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Maximum number of commits to emit
    pub max_count: usize,
    /// Only include commits touching this pathspec
    pub filter_path: Option<String>,
    /// Lines of context around each change
    pub diff_context: u32,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            max_count: 20,
            filter_path: None,
            diff_context: 5000,
        }
    }
}

impl LogOptions {
    /// Create options for the N most recent commits
    #[must_use]
    pub fn latest(n: usize) -> Self {
        Self {
            max_count: n,
            ..Default::default()
        }
    }

    /// Restrict the log to commits touching a pathspec
    #[must_use]
    pub fn with_filter_path(mut self, path: &str) -> Self {
        self.filter_path = Some(path.to_string());
        self
    }

    /// Set the number of context lines in each hunk
    #[must_use]
    pub fn with_diff_context(mut self, lines: u32) -> Self {
        self.diff_context = lines;
        self
    }
}

/// A `git log` invocation against one repository
#[derive(Debug, Clone)]
pub struct GitLog {
    repo: PathBuf,
    options: LogOptions,
}

impl GitLog {
    /// Describe a log invocation for the repository at `repo`
    #[must_use]
    pub fn new(repo: impl Into<PathBuf>, options: LogOptions) -> Self {
        Self {
            repo: repo.into(),
            options,
        }
    }

    /// The repository directory git runs in
    #[must_use]
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Arguments passed to the `git` executable
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        let mut args: Vec<String> = [
            "-c",
            "core.quotepath=off",
            "log",
            "-p",
            "--no-color",
            "--no-ext-diff",
            "--encoding=UTF-8",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect();

        args.push(format!("--format={LOG_FORMAT}"));
        args.push(format!("--max-count={}", self.options.max_count));
        args.push(format!("--unified={}", self.options.diff_context));

        if let Some(ref path) = self.options.filter_path {
            args.push("--".to_string());
            args.push(path.clone());
        }

        args
    }

    /// Check whether HEAD points at a commit
    ///
    /// A freshly initialized repository has an unborn HEAD and no commits.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Spawn` if git cannot be started, or
    /// `GitError::CommandFailed` if the directory is not a git repository.
    pub fn has_commits(&self) -> Result<bool, GitError> {
        let status = Command::new("git")
            .current_dir(&self.repo)
            .args(["rev-parse", "--verify", "-q", "HEAD"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| GitError::Spawn { source })?;

        // --verify -q exits 1 for a missing ref; anything else is fatal
        match status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(GitError::CommandFailed { status }),
        }
    }

    /// Start git and return its output as a line stream
    ///
    /// A repository without commits yields an empty stream and git log is
    /// not run.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the repository directory does
    /// not exist, `GitError::CommandFailed` if it is not a git repository, or
    /// `GitError::Spawn` if git cannot be started.
    pub fn spawn(&self) -> Result<LogStream, GitError> {
        if !self.repo.is_dir() {
            return Err(GitError::RepositoryNotFound {
                path: self.repo.display().to_string(),
            });
        }

        if !self.has_commits()? {
            debug!(repo = %self.repo.display(), "Repository has no commits");
            return Ok(LogStream::empty());
        }

        let args = self.args();
        debug!(repo = %self.repo.display(), ?args, "Spawning git");

        let mut child = Command::new("git")
            .current_dir(&self.repo)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| GitError::Spawn { source })?;

        let stdout = child.stdout.take().ok_or_else(|| GitError::Spawn {
            source: io::Error::other("git stdout was not captured"),
        })?;

        Ok(LogStream {
            child: Some(child),
            lines: Some(ByteLines::new(BufReader::new(stdout))),
        })
    }
}

/// Lines of a running `git log`
///
/// Dropping the stream before [`LogStream::finish`] kills the child.
#[derive(Debug)]
pub struct LogStream {
    child: Option<Child>,
    lines: Option<ByteLines<BufReader<ChildStdout>>>,
}

impl LogStream {
    /// A stream with no lines and no child process
    #[must_use]
    pub fn empty() -> Self {
        Self {
            child: None,
            lines: None,
        }
    }

    /// Wait for git to exit and check its status
    ///
    /// Call this once the stream has been read to the end.
    ///
    /// # Errors
    ///
    /// Returns `GitError::CommandFailed` if git exited unsuccessfully.
    pub fn finish(mut self) -> Result<(), GitError> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(GitError::CommandFailed { status })
        }
    }
}

impl Iterator for LogStream {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.as_mut()?.next()
    }
}

impl Drop for LogStream {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
