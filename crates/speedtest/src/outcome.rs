// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run outcomes and captured failures.

use std::any::Any;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// How a failed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The unit of work returned an error.
    Error,
    /// The unit of work panicked.
    Panic,
}

/// A failure captured from one run, stored as data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    causes: Vec<String>,
}

impl Failure {
    /// Capture an error returned by a unit of work, including its source chain.
    pub fn from_error(err: &anyhow::Error) -> Self {
        Self {
            kind: FailureKind::Error,
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
        }
    }

    /// Capture a panic payload.
    ///
    /// `panic!` payloads are either `&'static str` or `String`; anything
    /// else is recorded with a generic message.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unit of work panicked".to_string()
        };
        Self {
            kind: FailureKind::Panic,
            message,
            causes: Vec::new(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Messages of the underlying causes, outermost first.
    pub fn causes(&self) -> &[String] {
        &self.causes
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Error => write!(f, "error: {}", self.message)?,
            FailureKind::Panic => write!(f, "panic: {}", self.message)?,
        }
        for cause in &self.causes {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

/// One timed execution of a unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    elapsed: Duration,
    failure: Option<Failure>,
}

impl Outcome {
    pub fn new(elapsed: Duration, failure: Option<Failure>) -> Self {
        Self { elapsed, failure }
    }

    /// A run that completed without failure.
    pub fn success(elapsed: Duration) -> Self {
        Self::new(elapsed, None)
    }

    /// A run that failed.
    pub fn failed(elapsed: Duration, failure: Failure) -> Self {
        Self::new(elapsed, Some(failure))
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in fractional milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_nanos() as f64 / 1_000_000.0
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
