//! Shared unit test utilities.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tempfile::TempDir;

use crate::group::TestGroup;
use crate::outcome::{Failure, Outcome};
use crate::result::TestResult;

pub const GROUP_NAME: &str = "unit";
pub const TEST_NAME: &str = "noop";

/// A group with the default test name.
pub fn group() -> TestGroup {
    TestGroup::new(GROUP_NAME).unwrap()
}

/// A result with hand-picked outcomes, attached to a fresh no-op test.
pub fn result_with(group: &TestGroup, outcomes: Vec<Outcome>) -> TestResult {
    let test = group.plan(TEST_NAME, || (), outcomes.len().max(1)).unwrap();
    TestResult::new(test, outcomes)
}

pub fn ok_ms(ms: u64) -> Outcome {
    Outcome::success(Duration::from_millis(ms))
}

pub fn failed_ms(ms: u64) -> Outcome {
    Outcome::failed(
        Duration::from_millis(ms),
        Failure::from_error(&anyhow::anyhow!("failed after {}ms", ms)),
    )
}

/// Counts how many times each notification kind reached a group.
#[derive(Clone, Default)]
pub struct EventCounters {
    pub outcomes: Arc<AtomicUsize>,
    pub results: Arc<AtomicUsize>,
    pub summaries: Arc<AtomicUsize>,
}

impl EventCounters {
    pub fn attach(group: &TestGroup) -> Self {
        let counters = Self::default();
        let c = counters.outcomes.clone();
        group.on_outcome(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = counters.results.clone();
        group.on_result(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        let c = counters.summaries.clone();
        group.on_summary(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        counters
    }

    /// (outcomes, results, summaries)
    pub fn get(&self) -> (usize, usize, usize) {
        (
            self.outcomes.load(Ordering::SeqCst),
            self.results.load(Ordering::SeqCst),
            self.summaries.load(Ordering::SeqCst),
        )
    }
}

/// Creates a temp directory with custom config content.
pub fn temp_project_with_config(config: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("speedtest.toml"), config).unwrap();
    dir
}
