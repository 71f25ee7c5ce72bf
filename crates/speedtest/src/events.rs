// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle notifications.
//!
//! Handlers run synchronously on the emitting thread, in the order they
//! were registered. The handler list is snapshotted before dispatch, so a
//! handler may subscribe or unsubscribe without deadlocking.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::outcome::Outcome;
use crate::result::TestResult;
use crate::summary::TestResultSummary;
use crate::test_case::Test;

/// Raised after each run of a unit of work.
#[derive(Debug, Clone)]
pub struct OutcomeEvent {
    pub test: Test,
    pub outcome: Outcome,
}

/// Raised once all runs of a `get_result` call have finished.
#[derive(Debug, Clone)]
pub struct ResultEvent {
    pub test: Test,
    pub result: TestResult,
}

/// Raised whenever a summary is computed from a result.
#[derive(Debug, Clone)]
pub struct SummaryEvent {
    pub test: Test,
    pub result: TestResult,
    /// Name of the filter the summary was computed with.
    pub filter: String,
    pub summary: TestResultSummary,
}

/// Handle returned by [`Subscribers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A list of handlers for one kind of event.
pub struct Subscribers<E> {
    next_id: AtomicU64,
    handlers: Mutex<BTreeMap<SubscriptionId, Handler<E>>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            handlers: Mutex::new(BTreeMap::new()),
        }
    }
}

impl<E> Subscribers<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Ids increase monotonically, so iteration order
    /// over the map is registration order.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().insert(id, Arc::new(handler));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Deliver an event to every handler registered at the time of the call.
    pub fn emit(&self, event: &E) {
        let handlers: Vec<Handler<E>> = self.lock().values().cloned().collect();
        for handler in handlers {
            handler(event);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<SubscriptionId, Handler<E>>> {
        // Handlers never run under this lock, so poisoning only follows a
        // panic inside BTreeMap itself; the map is still consistent.
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> std::fmt::Debug for Subscribers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
