// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Built-in benchmark demos run by the `speedtest` binary.

use std::collections::{LinkedList, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::{DefaultFilter, ExceptionOnly, ExcludeMinAndMax, FilterKind, OutcomeFilter};
use crate::group::TestGroup;
use crate::output::{GroupReport, SummaryCollector};

/// Items pushed and popped per run by the collections demo.
pub const COLLECTION_ITEMS: u64 = 2_000;

/// Records serialized per run by the serialization demo.
pub const SERIALIZATION_RECORDS: u32 = 1_000;

/// Sleep lengths cycled through by the sleep demo. The outliers make the
/// effect of excluding min and max visible.
pub const SLEEPS_MS: &[u64] = &[2, 3, 4, 5, 11];

/// Settings shared by every demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSettings {
    pub repeat: usize,
    pub filter: FilterKind,
}

/// A named demo.
#[derive(Debug)]
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    run: fn(&DemoSettings) -> Result<Vec<GroupReport>>,
}

impl Demo {
    /// Run the demo, returning one report per group it created.
    pub fn run(&self, settings: &DemoSettings) -> Result<Vec<GroupReport>> {
        tracing::debug!(demo = self.name, repeat = settings.repeat, "running demo");
        (self.run)(settings)
    }
}

/// All demos, in the order `speedtest run` executes them by default.
pub const DEMOS: &[Demo] = &[
    Demo {
        name: "collections",
        description: "Push and pop-front on Vec, VecDeque and LinkedList",
        run: run_collections,
    },
    Demo {
        name: "serialization",
        description: "serde_json round trip of a batch of records",
        run: run_serialization,
    },
    Demo {
        name: "sleep",
        description: "Fixed sleeps of uneven length, with and without min/max",
        run: run_sleep,
    },
    Demo {
        name: "failures",
        description: "A unit of work that fails every other run",
        run: run_failures,
    },
];

pub fn find_demo(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|d| d.name == name)
}

/// Resolve demo names, keeping the order given. An empty list selects all.
pub fn select(names: &[String]) -> Result<Vec<&'static Demo>> {
    if names.is_empty() {
        return Ok(DEMOS.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            find_demo(name).ok_or_else(|| {
                let known: Vec<_> = DEMOS.iter().map(|d| d.name).collect();
                Error::Argument(format!(
                    "unknown demo `{}` (available: {})",
                    name,
                    known.join(", ")
                ))
            })
        })
        .collect()
}

// =============================================================================
// collections
// =============================================================================

fn run_collections(settings: &DemoSettings) -> Result<Vec<GroupReport>> {
    let filter = settings.filter.build();
    Ok(vec![
        collection_group(
            "Vec<u64>",
            Vec::new(),
            settings.repeat,
            &*filter,
            Vec::push,
            vec_pop_front,
        )?,
        collection_group(
            "VecDeque<u64>",
            VecDeque::new(),
            settings.repeat,
            &*filter,
            VecDeque::push_back,
            VecDeque::pop_front,
        )?,
        collection_group(
            "LinkedList<u64>",
            LinkedList::new(),
            settings.repeat,
            &*filter,
            LinkedList::push_back,
            LinkedList::pop_front,
        )?,
    ])
}

fn vec_pop_front(v: &mut Vec<u64>) -> Option<u64> {
    if v.is_empty() {
        None
    } else {
        Some(v.remove(0))
    }
}

/// "Add" then "Remove From Head" against one shared collection.
fn collection_group<C: Send + 'static>(
    name: &str,
    collection: C,
    repeat: usize,
    filter: &dyn OutcomeFilter,
    push: fn(&mut C, u64),
    pop_front: fn(&mut C) -> Option<u64>,
) -> Result<GroupReport> {
    let group = TestGroup::new(name)?;
    let collector = SummaryCollector::attach(&group);
    let shared = Arc::new(Mutex::new(collection));

    group.plan_with_and_execute_with_filter(
        "Add",
        move |c: &mut Arc<Mutex<C>>| {
            let mut c = c.lock().unwrap_or_else(PoisonError::into_inner);
            for i in 0..COLLECTION_ITEMS {
                push(&mut *c, i);
            }
        },
        Arc::clone(&shared),
        repeat,
        filter,
    )?;

    group.plan_with_and_execute_with_filter(
        "Remove From Head",
        move |c: &mut Arc<Mutex<C>>| {
            let mut c = c.lock().unwrap_or_else(PoisonError::into_inner);
            for _ in 0..COLLECTION_ITEMS {
                if pop_front(&mut *c).is_none() {
                    anyhow::bail!("collection drained early");
                }
            }
            Ok(())
        },
        shared,
        repeat,
        filter,
    )?;

    Ok(collector.finish())
}

// =============================================================================
// serialization
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    id: u32,
    name: String,
    address: String,
    scores: Vec<u32>,
}

fn sample_records() -> Vec<Record> {
    (0..SERIALIZATION_RECORDS)
        .map(|id| Record {
            id,
            name: "Simple".to_string(),
            address: "Planet Earth".to_string(),
            scores: (0..10).collect(),
        })
        .collect()
}

fn run_serialization(settings: &DemoSettings) -> Result<Vec<GroupReport>> {
    let filter = settings.filter.build();
    let group = TestGroup::new("serde_json")?;
    let collector = SummaryCollector::attach(&group);

    let records = Arc::new(sample_records());
    let payloads: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&payloads);
    group.plan_and_execute_with_filter(
        "Serialization",
        move || -> serde_json::Result<()> {
            let encoded = records
                .iter()
                .map(serde_json::to_string)
                .collect::<serde_json::Result<Vec<_>>>()?;
            *sink.lock().unwrap_or_else(PoisonError::into_inner) = encoded;
            Ok(())
        },
        settings.repeat,
        &*filter,
    )?;

    group.plan_and_execute_with_filter(
        "Deserialization",
        move || -> serde_json::Result<Vec<Record>> {
            payloads
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|p| serde_json::from_str(p))
                .collect()
        },
        settings.repeat,
        &*filter,
    )?;

    Ok(vec![collector.finish()])
}

// =============================================================================
// sleep
// =============================================================================

/// Always reports the default and exclude-min-max summaries side by side.
fn run_sleep(settings: &DemoSettings) -> Result<Vec<GroupReport>> {
    let group = TestGroup::new("Sleep")?;
    let collector = SummaryCollector::attach(&group);

    let test = group.plan_with(
        "Uneven sleeps",
        |run: &mut usize| {
            thread::sleep(Duration::from_millis(SLEEPS_MS[*run % SLEEPS_MS.len()]));
            *run += 1;
        },
        0usize,
        settings.repeat,
    )?;
    let result = test.get_result();
    result.get_summary_with(&DefaultFilter);
    result.get_summary_with(&ExcludeMinAndMax);

    Ok(vec![collector.finish()])
}

// =============================================================================
// failures
// =============================================================================

/// Always reports the default and exception-only summaries side by side.
fn run_failures(settings: &DemoSettings) -> Result<Vec<GroupReport>> {
    let group = TestGroup::new("Failures")?;
    let collector = SummaryCollector::attach(&group);

    let test = group.plan_with(
        "Every other run fails",
        |run: &mut usize| {
            *run += 1;
            if *run % 2 == 0 {
                anyhow::bail!("run {} failed on purpose", run);
            }
            Ok(())
        },
        0usize,
        settings.repeat,
    )?;
    let result = test.get_result();
    result.get_summary_with(&DefaultFilter);
    result.get_summary_with(&ExceptionOnly);

    Ok(vec![collector.finish()])
}

#[cfg(test)]
#[path = "demos_tests.rs"]
mod tests;
