// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use speedtest::cli::{Cli, OutputFormat, RunArgs};
use speedtest::config;
use speedtest::demos::{self, DemoSettings};
use speedtest::error::{Error, ExitCode};
use speedtest::output::GroupReport;
use speedtest::output::json::{self, JsonFormatter};
use speedtest::output::text::TextFormatter;

/// Run the selected demos and print their summaries.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(cli.config.as_deref(), &cwd)?;

    // Command-line flags override config values
    let repeat = args.repeat.unwrap_or(config.run.repeat);
    if repeat == 0 {
        return Err(Error::OutOfRange {
            field: "repeat",
            value: 0,
            message: "must be at least 1".to_string(),
        }
        .into());
    }
    let settings = DemoSettings {
        repeat,
        filter: args.filter.unwrap_or(config.run.filter),
    };
    let format = args.output.unwrap_or(config.output.format);
    let fail_on_error = args.fail_on_error || config.run.fail_on_error;

    let selected = demos::select(&args.demos)?;

    let mut reports: Vec<GroupReport> = Vec::new();
    match format {
        OutputFormat::Text => {
            // Stream each group as its demo finishes
            let mut formatter = TextFormatter::new(args.color_choice());
            for demo in selected {
                for report in demo.run(&settings)? {
                    formatter.write_group(&report)?;
                    reports.push(report);
                }
            }
            formatter.write_totals(&reports)?;
        }
        OutputFormat::Json => {
            for demo in selected {
                reports.extend(demo.run(&settings)?);
            }
            let output = json::create_output(&reports);
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }

    let failures: usize = reports.iter().map(GroupReport::total_failures).sum();
    tracing::debug!(groups = reports.len(), failures, "run finished");

    if fail_on_error && failures > 0 {
        Ok(ExitCode::BenchmarkFailed)
    } else {
        Ok(ExitCode::Success)
    }
}
