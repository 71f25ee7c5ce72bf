// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use super::GroupReport;
use crate::outcome::{Failure, Outcome};
use crate::summary::TestResultSummary;

/// Top-level JSON document.
#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub timestamp: String,
    pub groups: Vec<GroupOutput>,
}

#[derive(Debug, Serialize)]
pub struct GroupOutput {
    pub name: String,
    pub tests: Vec<TestOutput>,
}

/// One summary with the raw outcomes it was computed from.
#[derive(Debug, Serialize)]
pub struct TestOutput {
    pub name: String,
    pub repeat: usize,
    pub filter: String,
    pub successes: usize,
    pub failures: usize,
    /// `null` when the filter kept no outcomes.
    pub average_ms: Option<f64>,
    pub outcomes: Vec<OutcomeOutput>,
}

#[derive(Debug, Serialize)]
pub struct OutcomeOutput {
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

impl From<&Outcome> for OutcomeOutput {
    fn from(outcome: &Outcome) -> Self {
        Self {
            elapsed_ms: outcome.elapsed_ms(),
            failure: outcome.failure().cloned(),
        }
    }
}

impl From<&TestResultSummary> for TestOutput {
    fn from(summary: &TestResultSummary) -> Self {
        let test = summary.test();
        Self {
            name: test.name().to_string(),
            repeat: test.repeat(),
            filter: summary.filter_name().to_string(),
            successes: summary.successes(),
            failures: summary.failures(),
            average_ms: summary.average_execution_time(),
            outcomes: summary.result().outcomes().iter().map(Into::into).collect(),
        }
    }
}

impl From<&GroupReport> for GroupOutput {
    fn from(report: &GroupReport) -> Self {
        Self {
            name: report.name().to_string(),
            tests: report.summaries().iter().map(Into::into).collect(),
        }
    }
}

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, output: &RunOutput) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(output).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

/// Create RunOutput with current timestamp.
pub fn create_output(reports: &[GroupReport]) -> RunOutput {
    RunOutput {
        timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        groups: reports.iter().map(Into::into).collect(),
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
