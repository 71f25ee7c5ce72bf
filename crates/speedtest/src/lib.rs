// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repeated-run timing harness.
//!
//! A [`TestGroup`] plans named [`Test`]s. Asking a test for its result runs
//! the unit of work `count` times, recording an [`Outcome`] per run. A
//! [`TestResult`] reduces its outcomes to a [`TestResultSummary`] under an
//! [`OutcomeFilter`]. Every step raises a notification that bubbles from the
//! test up to its group.

pub mod cli;
pub mod color;
pub mod config;
pub mod demos;
pub mod error;
pub mod events;
pub mod filter;
pub mod group;
pub mod outcome;
pub mod output;
pub mod result;
pub mod summary;
pub mod test_case;

pub use cli::{Cli, Command, OutputFormat, RunArgs};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use events::{OutcomeEvent, ResultEvent, Subscribers, SubscriptionId, SummaryEvent};
pub use filter::{DefaultFilter, ExceptionOnly, ExcludeMinAndMax, FilterKind, OutcomeFilter};
pub use group::TestGroup;
pub use outcome::{Failure, FailureKind, Outcome};
pub use result::TestResult;
pub use summary::TestResultSummary;
pub use test_case::{IntoRunResult, Test, TestBuilder, TestId};

#[cfg(test)]
pub mod test_utils;
