// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A named unit of work and its repeated, timed execution.
//!
//! Runs are strictly sequential: a test never overlaps two runs of its own
//! unit of work, and outcomes are recorded in execution order. A failing
//! run (returned error or panic) is captured on its [`Outcome`] and the
//! remaining runs continue.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Instant;

use crate::error::{Error, Result};
use crate::events::{OutcomeEvent, ResultEvent, Subscribers, SubscriptionId, SummaryEvent};
use crate::group::{GroupShared, TestGroup};
use crate::outcome::{Failure, Outcome};
use crate::result::TestResult;

/// Conversion from a unit of work's return value into pass/fail.
///
/// Implemented for `()` (always passes) and for any `Result` whose error
/// converts into [`anyhow::Error`].
pub trait IntoRunResult {
    fn into_run_result(self) -> anyhow::Result<()>;
}

impl IntoRunResult for () {
    fn into_run_result(self) -> anyhow::Result<()> {
        Ok(())
    }
}

impl<T, E> IntoRunResult for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn into_run_result(self) -> anyhow::Result<()> {
        self.map(|_| ()).map_err(Into::into)
    }
}

type UnitOfWork = Box<dyn FnMut() -> anyhow::Result<()> + Send>;

/// Process-unique identity of a planned test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestId(u64);

impl TestId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TestId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A planned test. Cheap to clone; clones share identity and subscribers.
#[derive(Clone)]
pub struct Test {
    inner: Arc<TestInner>,
}

struct TestInner {
    id: TestId,
    name: String,
    repeat: usize,
    work: Mutex<UnitOfWork>,
    group: Weak<GroupShared>,
    group_name: String,
    on_outcome: Subscribers<OutcomeEvent>,
    on_result: Subscribers<ResultEvent>,
    on_summary: Subscribers<SummaryEvent>,
}

impl Test {
    pub fn id(&self) -> TestId {
        self.inner.id
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// How many times `get_result` runs the unit of work.
    pub fn repeat(&self) -> usize {
        self.inner.repeat
    }

    /// The group that planned this test, if it is still alive.
    pub fn group(&self) -> Option<TestGroup> {
        self.inner.group.upgrade().map(TestGroup::from_shared)
    }

    pub fn group_name(&self) -> &str {
        &self.inner.group_name
    }

    /// Run the unit of work once, timing it and capturing any failure.
    pub fn execute(&self) -> Outcome {
        let outcome = {
            let mut work = self.inner.work.lock().unwrap_or_else(PoisonError::into_inner);
            let start = Instant::now();
            let failure = match panic::catch_unwind(AssertUnwindSafe(|| (*work)())) {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(Failure::from_error(&err)),
                Err(payload) => Some(Failure::from_panic(payload.as_ref())),
            };
            Outcome::new(start.elapsed(), failure)
        };

        match outcome.failure() {
            Some(failure) => tracing::debug!(
                "{}/{}: run failed after {:?}: {}",
                self.group_name(),
                self.name(),
                outcome.elapsed(),
                failure
            ),
            None => tracing::trace!(
                "{}/{}: run took {:?}",
                self.group_name(),
                self.name(),
                outcome.elapsed()
            ),
        }

        self.inner.on_outcome.emit(&OutcomeEvent {
            test: self.clone(),
            outcome: outcome.clone(),
        });
        outcome
    }

    /// Run the unit of work `repeat` times and collect a fresh result.
    ///
    /// Each call performs new runs; earlier results are never reused.
    pub fn get_result(&self) -> TestResult {
        let outcomes: Vec<Outcome> = (0..self.inner.repeat).map(|_| self.execute()).collect();
        let result = TestResult::new(self.clone(), outcomes);

        tracing::debug!(
            "{}/{}: {} runs, {} failed",
            self.group_name(),
            self.name(),
            result.outcomes().len(),
            result.outcomes().iter().filter(|o| o.is_failure()).count()
        );

        self.inner.on_result.emit(&ResultEvent {
            test: self.clone(),
            result: result.clone(),
        });
        result
    }

    pub fn on_outcome<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&OutcomeEvent) + Send + Sync + 'static,
    {
        self.inner.on_outcome.subscribe(handler)
    }

    pub fn on_result<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ResultEvent) + Send + Sync + 'static,
    {
        self.inner.on_result.subscribe(handler)
    }

    /// Subscribe to summaries computed from any result this test produces.
    pub fn on_summary<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SummaryEvent) + Send + Sync + 'static,
    {
        self.inner.on_summary.subscribe(handler)
    }

    pub fn unsubscribe_outcome(&self, id: SubscriptionId) -> bool {
        self.inner.on_outcome.unsubscribe(id)
    }

    pub fn unsubscribe_result(&self, id: SubscriptionId) -> bool {
        self.inner.on_result.unsubscribe(id)
    }

    pub fn unsubscribe_summary(&self, id: SubscriptionId) -> bool {
        self.inner.on_summary.unsubscribe(id)
    }

    /// Relay a summary raised by one of this test's results.
    pub(crate) fn emit_summary(&self, event: &SummaryEvent) {
        self.inner.on_summary.emit(event);
    }
}

impl PartialEq for Test {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for Test {}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test")
            .field("id", &self.inner.id)
            .field("name", &self.inner.name)
            .field("repeat", &self.inner.repeat)
            .field("group", &self.inner.group_name)
            .finish()
    }
}

impl fmt::Display for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.name)
    }
}

/// Validating constructor for [`Test`].
///
/// Every field is checked before anything is stored: name, action, count,
/// then group. On success the test is registered with its group.
///
/// ```
/// use speedtest::{TestBuilder, TestGroup};
///
/// let group = TestGroup::new("parsing").unwrap();
/// let test = TestBuilder::new("noop")
///     .action(|| ())
///     .repeat(3)
///     .group(&group)
///     .build()
///     .unwrap();
/// assert_eq!(test.get_result().outcomes().len(), 3);
/// ```
pub struct TestBuilder<'g> {
    name: String,
    work: Option<UnitOfWork>,
    repeat: usize,
    group: Option<&'g TestGroup>,
}

impl<'g> TestBuilder<'g> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            work: None,
            repeat: 1,
            group: None,
        }
    }

    /// The unit of work to time.
    pub fn action<F, R>(mut self, mut action: F) -> Self
    where
        F: FnMut() -> R + Send + 'static,
        R: IntoRunResult,
    {
        self.work = Some(Box::new(move || action().into_run_result()));
        self
    }

    /// Number of runs per result (default: 1).
    pub fn repeat(mut self, count: usize) -> Self {
        self.repeat = count;
        self
    }

    pub fn group(mut self, group: &'g TestGroup) -> Self {
        self.group = Some(group);
        self
    }

    /// Validate and register the test with its group.
    pub fn build(self) -> Result<Test> {
        if self.name.trim().is_empty() {
            return Err(Error::invalid("name", "test name cannot be empty"));
        }
        let Some(work) = self.work else {
            return Err(Error::invalid("action", "unit of work is required"));
        };
        if self.repeat < 1 {
            return Err(Error::out_of_range(
                "count",
                self.repeat as i64,
                "execution count must be at least 1",
            ));
        }
        let Some(group) = self.group else {
            return Err(Error::invalid("group", "test group is required"));
        };

        let test = Test {
            inner: Arc::new(TestInner {
                id: TestId::next(),
                name: self.name,
                repeat: self.repeat,
                work: Mutex::new(work),
                group: group.downgrade(),
                group_name: group.name().to_string(),
                on_outcome: Subscribers::new(),
                on_result: Subscribers::new(),
                on_summary: Subscribers::new(),
            }),
        };
        group.register(&test);
        Ok(test)
    }
}

#[cfg(test)]
#[path = "test_case_tests.rs"]
mod tests;
