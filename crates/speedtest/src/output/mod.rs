// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for benchmark summaries.
//!
//! Summaries are gathered per group by a [`SummaryCollector`] listening on
//! the group's summary notifications, then handed to a formatter.

pub mod json;
pub mod text;

use std::sync::{Arc, Mutex, PoisonError};

use crate::events::SubscriptionId;
use crate::group::TestGroup;
use crate::summary::TestResultSummary;

/// Summaries reported by one group, in the order they were computed.
#[derive(Debug, Clone)]
pub struct GroupReport {
    name: String,
    summaries: Vec<TestResultSummary>,
}

impl GroupReport {
    pub fn new(name: impl Into<String>, summaries: Vec<TestResultSummary>) -> Self {
        Self {
            name: name.into(),
            summaries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summaries(&self) -> &[TestResultSummary] {
        &self.summaries
    }

    /// Failed runs across the report. A result summarized more than once
    /// is counted once.
    pub fn total_failures(&self) -> usize {
        self.summaries
            .iter()
            .enumerate()
            .filter(|(i, s)| {
                !self.summaries[..*i]
                    .iter()
                    .any(|earlier| earlier.result().ptr_eq(s.result()))
            })
            .map(|(_, s)| s.failures())
            .sum()
    }
}

/// Records every summary a group reports until [`finish`](Self::finish).
pub struct SummaryCollector {
    group: TestGroup,
    subscription: SubscriptionId,
    summaries: Arc<Mutex<Vec<TestResultSummary>>>,
}

impl SummaryCollector {
    pub fn attach(group: &TestGroup) -> Self {
        let summaries = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&summaries);
        let subscription = group.on_summary(move |event| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.summary.clone());
        });
        Self {
            group: group.clone(),
            subscription,
            summaries,
        }
    }

    /// Stop listening and return what was collected.
    pub fn finish(self) -> GroupReport {
        self.group.unsubscribe_summary(self.subscription);
        let summaries =
            std::mem::take(&mut *self.summaries.lock().unwrap_or_else(PoisonError::into_inner));
        GroupReport::new(self.group.name(), summaries)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
