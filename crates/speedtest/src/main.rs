// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Speedtest CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use speedtest::cli::{Cli, Command};
use speedtest::error::ExitCode;

mod cmd_run;

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("SPEEDTEST_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("speedtest: {}", e);
            match e.downcast_ref::<speedtest::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Run(args)) => cmd_run::run(&cli, args),
        Some(Command::List) => {
            for demo in speedtest::demos::DEMOS {
                println!("{:<15} {}", demo.name, demo.description);
            }
            Ok(ExitCode::Success)
        }
    }
}
