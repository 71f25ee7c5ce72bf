// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome filters.
//!
//! A filter picks the outcomes that feed a summary's average execution time.
//! Built-in filters:
//! - `default`: every run that did not fail, in execution order
//! - `exclude-min-max`: successful runs minus the fastest and the slowest
//! - `exception-only`: only the failed runs

use std::sync::Arc;

use serde::Deserialize;

use crate::outcome::Outcome;

/// Selects which outcomes contribute to a summary's average.
///
/// Object-safe so callers can supply their own policies as
/// `&dyn OutcomeFilter` or `Arc<dyn OutcomeFilter>`.
pub trait OutcomeFilter: Send + Sync {
    /// Identifier reported alongside summaries (e.g., "default").
    fn name(&self) -> &str;

    /// Return the eligible outcomes. Must not depend on anything but the input.
    fn filter(&self, outcomes: &[Outcome]) -> Vec<Outcome>;
}

/// Keeps every outcome without a failure, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFilter;

impl OutcomeFilter for DefaultFilter {
    fn name(&self) -> &str {
        FilterKind::Default.as_str()
    }

    fn filter(&self, outcomes: &[Outcome]) -> Vec<Outcome> {
        outcomes.iter().filter(|o| o.is_success()).cloned().collect()
    }
}

/// Drops one fastest and one slowest successful outcome.
///
/// Successful outcomes are sorted by elapsed time (stable, so ties keep
/// execution order). With two or fewer there is nothing to trim and all of
/// them are returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeMinAndMax;

impl OutcomeFilter for ExcludeMinAndMax {
    fn name(&self) -> &str {
        FilterKind::ExcludeMinMax.as_str()
    }

    fn filter(&self, outcomes: &[Outcome]) -> Vec<Outcome> {
        let mut ordered: Vec<Outcome> = outcomes.iter().filter(|o| o.is_success()).cloned().collect();
        ordered.sort_by_key(Outcome::elapsed);

        let count = ordered.len();
        if count <= 2 {
            return ordered;
        }
        ordered.into_iter().skip(1).take(count - 2).collect()
    }
}

/// Keeps only failed outcomes, in input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionOnly;

impl OutcomeFilter for ExceptionOnly {
    fn name(&self) -> &str {
        FilterKind::ExceptionOnly.as_str()
    }

    fn filter(&self, outcomes: &[Outcome]) -> Vec<Outcome> {
        outcomes.iter().filter(|o| o.is_failure()).cloned().collect()
    }
}

/// Built-in filter selection for config files and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Successful runs only.
    #[default]
    Default,
    /// Successful runs without the fastest and slowest.
    ExcludeMinMax,
    /// Failed runs only.
    ExceptionOnly,
}

impl FilterKind {
    /// All built-in filters in canonical order.
    pub const ALL: &'static [FilterKind] = &[
        FilterKind::Default,
        FilterKind::ExcludeMinMax,
        FilterKind::ExceptionOnly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Default => "default",
            FilterKind::ExcludeMinMax => "exclude-min-max",
            FilterKind::ExceptionOnly => "exception-only",
        }
    }

    /// Instantiate the filter.
    pub fn build(self) -> Arc<dyn OutcomeFilter> {
        match self {
            FilterKind::Default => Arc::new(DefaultFilter),
            FilterKind::ExcludeMinMax => Arc::new(ExcludeMinAndMax),
            FilterKind::ExceptionOnly => Arc::new(ExceptionOnly),
        }
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
