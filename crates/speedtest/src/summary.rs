// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Derived statistics for a test result.

use std::fmt;
use std::time::Duration;

use crate::filter::OutcomeFilter;
use crate::result::TestResult;
use crate::test_case::Test;

/// Success/failure counts plus the average time of the filtered outcomes.
///
/// `average_execution_time` is `None` when the filter kept no outcomes,
/// e.g. the default filter on a test whose runs all failed.
#[derive(Debug, Clone)]
pub struct TestResultSummary {
    successes: usize,
    failures: usize,
    average_ms: Option<f64>,
    filter: String,
    result: TestResult,
}

impl TestResultSummary {
    pub(crate) fn compute(result: TestResult, filter: &dyn OutcomeFilter) -> Self {
        let outcomes = result.outcomes();
        let successes = outcomes.iter().filter(|o| o.is_success()).count();
        let failures = outcomes.len() - successes;

        let eligible = filter.filter(outcomes);
        let average_ms = if eligible.is_empty() {
            None
        } else {
            let total: f64 = eligible.iter().map(|o| o.elapsed_ms()).sum();
            Some(total / eligible.len() as f64)
        };

        Self {
            successes,
            failures,
            average_ms,
            filter: filter.name().to_string(),
            result,
        }
    }

    /// Runs that completed without failure.
    pub fn successes(&self) -> usize {
        self.successes
    }

    /// Runs that failed.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Mean elapsed milliseconds over the filtered outcomes.
    pub fn average_execution_time(&self) -> Option<f64> {
        self.average_ms
    }

    /// The average as a `Duration`.
    pub fn average_duration(&self) -> Option<Duration> {
        self.average_ms.map(|ms| Duration::from_secs_f64(ms / 1000.0))
    }

    /// Name of the filter used to compute the average.
    pub fn filter_name(&self) -> &str {
        &self.filter
    }

    pub fn result(&self) -> &TestResult {
        &self.result
    }

    pub fn test(&self) -> &Test {
        self.result.test()
    }

    /// Average rendered for humans; `n/a` when undefined.
    pub fn format_average(&self) -> String {
        format_average_ms(self.average_ms)
    }
}

/// Render an optional millisecond average with four decimals, or `n/a`.
pub fn format_average_ms(average_ms: Option<f64>) -> String {
    match average_ms {
        Some(ms) => format!("{:.4}", ms),
        None => "n/a".to_string(),
    }
}

impl fmt::Display for TestResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let test = self.test();
        writeln!(
            f,
            "Test Group [{}], Test [{}] results summary:",
            test.group_name(),
            test.name()
        )?;
        writeln!(f, "Successes [{}]", self.successes)?;
        writeln!(f, "Failures [{}]", self.failures)?;
        write!(f, "Average Exec Time [{}] milliseconds", self.format_average())
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
