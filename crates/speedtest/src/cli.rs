// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use termcolor::ColorChoice;

use crate::color::resolve_color;
use crate::filter::FilterKind;

/// A micro-benchmarking harness for small units of work
#[derive(Parser)]
#[command(name = "speedtest")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SPEEDTEST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run built-in benchmark demos
    Run(RunArgs),
    /// List built-in benchmark demos
    List,
}

#[derive(clap::Args, Default)]
pub struct RunArgs {
    /// Demos to run (default: all)
    #[arg(value_name = "DEMO")]
    pub demos: Vec<String>,

    /// Runs per test (overrides config, default: 5)
    #[arg(short = 'n', long, value_name = "N")]
    pub repeat: Option<usize>,

    /// Outcome filter used for summaries
    #[arg(short, long, value_name = "KIND")]
    pub filter: Option<FilterKind>,

    /// Output format
    #[arg(short, long)]
    pub output: Option<OutputFormat>,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Exit with status 1 if any run failed
    #[arg(long)]
    pub fail_on_error: bool,
}

impl RunArgs {
    /// Color choice from flags, falling back to environment detection.
    pub fn color_choice(&self) -> ColorChoice {
        if self.no_color {
            ColorChoice::Never
        } else if self.color {
            ColorChoice::Always
        } else {
            resolve_color()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
