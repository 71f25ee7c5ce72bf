// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The outcomes of one `get_result` call.

use std::sync::Arc;

use crate::events::SummaryEvent;
use crate::filter::{DefaultFilter, OutcomeFilter};
use crate::outcome::Outcome;
use crate::summary::TestResultSummary;
use crate::test_case::Test;

/// Immutable pairing of a test with its outcomes, in execution order.
///
/// Cloning shares the underlying outcomes.
#[derive(Debug, Clone)]
pub struct TestResult {
    inner: Arc<ResultInner>,
}

#[derive(Debug)]
struct ResultInner {
    test: Test,
    outcomes: Vec<Outcome>,
}

impl TestResult {
    pub(crate) fn new(test: Test, outcomes: Vec<Outcome>) -> Self {
        Self {
            inner: Arc::new(ResultInner { test, outcomes }),
        }
    }

    pub fn test(&self) -> &Test {
        &self.inner.test
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.inner.outcomes
    }

    /// Whether two handles refer to the same result.
    pub fn ptr_eq(&self, other: &TestResult) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Summarize using [`DefaultFilter`].
    pub fn get_summary(&self) -> TestResultSummary {
        self.get_summary_with(&DefaultFilter)
    }

    /// Summarize with the given filter and notify the test's subscribers.
    ///
    /// Summaries are not cached; each call computes and announces a new one.
    pub fn get_summary_with(&self, filter: &dyn OutcomeFilter) -> TestResultSummary {
        let summary = TestResultSummary::compute(self.clone(), filter);

        tracing::debug!(
            "{}/{}: summary ({}) successes={} failures={} average={}",
            self.test().group_name(),
            self.test().name(),
            filter.name(),
            summary.successes(),
            summary.failures(),
            summary.format_average()
        );

        self.inner.test.emit_summary(&SummaryEvent {
            test: self.inner.test.clone(),
            result: self.clone(),
            filter: filter.name().to_string(),
            summary: summary.clone(),
        });
        summary
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
