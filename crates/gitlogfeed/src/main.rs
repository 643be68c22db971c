// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! gitlogfeed: publish recent git commits as an Atom feed
//!
//! Runs `git log -p` in a repository, writes one HTML page per commit with a
//! colorized patch, and an Atom feed linking to those pages.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use gitlogfeed::{App, Config, RunSummary};
use tracing::{error, info};

fn run(config: Config) -> anyhow::Result<RunSummary> {
    App::new(config).run().context("Feed generation failed")
}

fn main() -> ExitCode {
    let config = Config::parse();

    // Logs go to stderr; RUST_LOG directives are combined with the flag level
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(config) {
        Ok(summary) => {
            info!(commits = summary.commits, "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
