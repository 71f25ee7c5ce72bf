// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <group>
//!   <test> (<filter>): Successes [n] Failures [n] Average Exec Time [x] ms
//! ```

use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::GroupReport;
use crate::color::scheme;
use crate::summary::TestResultSummary;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
    groups_written: usize,
}

impl TextFormatter<StandardStream> {
    /// Create a formatter writing to stdout.
    pub fn new(color_choice: ColorChoice) -> Self {
        Self::with_writer(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            groups_written: 0,
        }
    }

    /// Write a group header followed by one line per summary.
    pub fn write_group(&mut self, report: &GroupReport) -> std::io::Result<()> {
        if self.groups_written > 0 {
            writeln!(self.out)?;
        }
        self.groups_written += 1;

        self.out.set_color(&scheme::group_name())?;
        write!(self.out, "{}", report.name())?;
        self.out.reset()?;
        writeln!(self.out)?;

        for summary in report.summaries() {
            self.write_summary(summary)?;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &TestResultSummary) -> std::io::Result<()> {
        write!(self.out, "  ")?;
        self.out.set_color(&scheme::test_name())?;
        write!(self.out, "{}", summary.test().name())?;
        self.out.reset()?;

        write!(self.out, " ")?;
        self.out.set_color(&scheme::filter())?;
        write!(self.out, "({})", summary.filter_name())?;
        self.out.reset()?;
        write!(self.out, ": ")?;

        write!(self.out, "Successes [")?;
        self.out.set_color(&scheme::successes())?;
        write!(self.out, "{}", summary.successes())?;
        self.out.reset()?;

        write!(self.out, "] Failures [")?;
        if summary.failures() > 0 {
            self.out.set_color(&scheme::failures())?;
        }
        write!(self.out, "{}", summary.failures())?;
        self.out.reset()?;

        write!(self.out, "] Average Exec Time [")?;
        self.out.set_color(&scheme::average())?;
        write!(self.out, "{}", summary.format_average())?;
        self.out.reset()?;
        writeln!(self.out, "] ms")?;
        Ok(())
    }

    /// Write the closing totals line.
    pub fn write_totals(&mut self, reports: &[GroupReport]) -> std::io::Result<()> {
        let summaries: usize = reports.iter().map(|r| r.summaries().len()).sum();
        let failures: usize = reports.iter().map(GroupReport::total_failures).sum();
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} summar{}, {} failed run{}",
            summaries,
            if summaries == 1 { "y" } else { "ies" },
            failures,
            if failures == 1 { "" } else { "s" }
        )
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
