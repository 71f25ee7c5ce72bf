// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named registry of planned tests and their latest results.
//!
//! A group subscribes to every test it plans and relays outcome, result and
//! summary notifications to its own subscribers. Result notifications also
//! update the registry entry for the test before being relayed.
//!
//! The registry is a concurrent map, so tests from one group may be driven
//! from several threads while another thread snapshots the registry.

use std::fmt;
use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::error::{Error, Result};
use crate::events::{OutcomeEvent, ResultEvent, Subscribers, SubscriptionId, SummaryEvent};
use crate::filter::OutcomeFilter;
use crate::result::TestResult;
use crate::summary::TestResultSummary;
use crate::test_case::{IntoRunResult, Test, TestBuilder, TestId};

/// A registry slot: the planned test and its most recent result.
#[derive(Clone)]
struct Entry {
    test: Test,
    result: Option<TestResult>,
}

pub(crate) struct GroupShared {
    name: String,
    registry: DashMap<TestId, Entry>,
    on_outcome: Subscribers<OutcomeEvent>,
    on_result: Subscribers<ResultEvent>,
    on_summary: Subscribers<SummaryEvent>,
}

impl GroupShared {
    fn record_result(&self, event: &ResultEvent) {
        // Guard dropped before relaying so handlers can read the registry.
        self.registry
            .entry(event.test.id())
            .and_modify(|entry| entry.result = Some(event.result.clone()))
            .or_insert_with(|| Entry {
                test: event.test.clone(),
                result: Some(event.result.clone()),
            });
    }
}

/// A named group of tests. Cheap to clone; clones share the registry.
#[derive(Clone)]
pub struct TestGroup {
    shared: Arc<GroupShared>,
}

impl TestGroup {
    /// Create a group. The name must not be empty or whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid("name", "test group name cannot be empty"));
        }
        Ok(Self {
            shared: Arc::new(GroupShared {
                name,
                registry: DashMap::new(),
                on_outcome: Subscribers::new(),
                on_result: Subscribers::new(),
                on_summary: Subscribers::new(),
            }),
        })
    }

    pub(crate) fn from_shared(shared: Arc<GroupShared>) -> Self {
        Self { shared }
    }

    pub(crate) fn downgrade(&self) -> Weak<GroupShared> {
        Arc::downgrade(&self.shared)
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Plan a test without running it.
    pub fn plan<F, R>(&self, name: impl Into<String>, action: F, count: usize) -> Result<Test>
    where
        F: FnMut() -> R + Send + 'static,
        R: IntoRunResult,
    {
        TestBuilder::new(name)
            .action(action)
            .repeat(count)
            .group(self)
            .build()
    }

    /// Plan a test whose unit of work runs against `data`.
    ///
    /// The data moves into the test and is handed to every run, so side
    /// effects accumulate across runs. Share it with the caller through an
    /// `Arc` to observe them.
    pub fn plan_with<T, F, R>(
        &self,
        name: impl Into<String>,
        mut action: F,
        data: T,
        count: usize,
    ) -> Result<Test>
    where
        T: Send + 'static,
        F: FnMut(&mut T) -> R + Send + 'static,
        R: IntoRunResult,
    {
        let mut data = data;
        self.plan(name, move || action(&mut data), count)
    }

    /// Plan a test, run it, and summarize with the default filter.
    pub fn plan_and_execute<F, R>(
        &self,
        name: impl Into<String>,
        action: F,
        count: usize,
    ) -> Result<TestResultSummary>
    where
        F: FnMut() -> R + Send + 'static,
        R: IntoRunResult,
    {
        Ok(self.plan(name, action, count)?.get_result().get_summary())
    }

    /// Plan a test, run it, and summarize with `filter`.
    pub fn plan_and_execute_with_filter<F, R>(
        &self,
        name: impl Into<String>,
        action: F,
        count: usize,
        filter: &dyn OutcomeFilter,
    ) -> Result<TestResultSummary>
    where
        F: FnMut() -> R + Send + 'static,
        R: IntoRunResult,
    {
        Ok(self
            .plan(name, action, count)?
            .get_result()
            .get_summary_with(filter))
    }

    /// Plan a data-bound test, run it, and summarize with the default filter.
    pub fn plan_with_and_execute<T, F, R>(
        &self,
        name: impl Into<String>,
        action: F,
        data: T,
        count: usize,
    ) -> Result<TestResultSummary>
    where
        T: Send + 'static,
        F: FnMut(&mut T) -> R + Send + 'static,
        R: IntoRunResult,
    {
        Ok(self
            .plan_with(name, action, data, count)?
            .get_result()
            .get_summary())
    }

    /// Plan a data-bound test, run it, and summarize with `filter`.
    pub fn plan_with_and_execute_with_filter<T, F, R>(
        &self,
        name: impl Into<String>,
        action: F,
        data: T,
        count: usize,
        filter: &dyn OutcomeFilter,
    ) -> Result<TestResultSummary>
    where
        T: Send + 'static,
        F: FnMut(&mut T) -> R + Send + 'static,
        R: IntoRunResult,
    {
        Ok(self
            .plan_with(name, action, data, count)?
            .get_result()
            .get_summary_with(filter))
    }

    /// Snapshot of every test planned in this group, in planning order.
    pub fn planned_tests(&self) -> Vec<Test> {
        let mut tests: Vec<Test> = self
            .shared
            .registry
            .iter()
            .map(|e| e.value().test.clone())
            .collect();
        tests.sort_by_key(Test::id);
        tests
    }

    /// Snapshot of the latest result of every executed test, in planning order.
    ///
    /// Tests that were planned but never executed are left out.
    pub fn test_results(&self) -> Vec<TestResult> {
        let mut entries: Vec<(TestId, TestResult)> = self
            .shared
            .registry
            .iter()
            .filter_map(|e| e.value().result.clone().map(|r| (*e.key(), r)))
            .collect();
        entries.sort_by_key(|(id, _)| *id);
        entries.into_iter().map(|(_, r)| r).collect()
    }

    /// Latest result recorded for `test`, if it has been executed.
    pub fn result_for(&self, test: &Test) -> Option<TestResult> {
        self.shared
            .registry
            .get(&test.id())
            .and_then(|e| e.result.clone())
    }

    pub fn on_outcome<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&OutcomeEvent) + Send + Sync + 'static,
    {
        self.shared.on_outcome.subscribe(handler)
    }

    pub fn on_result<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ResultEvent) + Send + Sync + 'static,
    {
        self.shared.on_result.subscribe(handler)
    }

    pub fn on_summary<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SummaryEvent) + Send + Sync + 'static,
    {
        self.shared.on_summary.subscribe(handler)
    }

    pub fn unsubscribe_outcome(&self, id: SubscriptionId) -> bool {
        self.shared.on_outcome.unsubscribe(id)
    }

    pub fn unsubscribe_result(&self, id: SubscriptionId) -> bool {
        self.shared.on_result.unsubscribe(id)
    }

    pub fn unsubscribe_summary(&self, id: SubscriptionId) -> bool {
        self.shared.on_summary.unsubscribe(id)
    }

    /// Add a freshly built test to the registry and relay its notifications.
    ///
    /// Relay handlers hold only a weak reference, so tests never keep their
    /// group alive.
    pub(crate) fn register(&self, test: &Test) {
        self.shared.registry.insert(
            test.id(),
            Entry {
                test: test.clone(),
                result: None,
            },
        );

        let group = self.downgrade();
        test.on_outcome(move |event| {
            if let Some(group) = group.upgrade() {
                group.on_outcome.emit(event);
            }
        });

        let group = self.downgrade();
        test.on_result(move |event| {
            if let Some(group) = group.upgrade() {
                group.record_result(event);
                group.on_result.emit(event);
            }
        });

        let group = self.downgrade();
        test.on_summary(move |event| {
            if let Some(group) = group.upgrade() {
                group.on_summary.emit(event);
            }
        });

        tracing::debug!(
            "{}: planned {} ({} runs)",
            self.name(),
            test.name(),
            test.repeat()
        );
    }
}

impl PartialEq for TestGroup {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for TestGroup {}

impl fmt::Debug for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestGroup")
            .field("name", &self.shared.name)
            .field("planned", &self.shared.registry.len())
            .finish()
    }
}

impl fmt::Display for TestGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.shared.name)
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
