// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Report struct and public API for presenting the duplicates of a run.

mod console;
mod totals;
mod utils;

pub use console::summarize_report;

use serde::Serialize;

use crate::stats::{Duplicates, RuntimeSizePolicy, Stats};
use totals::ReportTotals;

#[derive(Debug, Serialize)]
pub struct Report {
    archives: Vec<String>,
    runtime_sizes: RuntimeSizePolicy,
    totals: ReportTotals,
    duplicates: Duplicates,
}

impl Report {
    /// Create a new report, resolving the duplicates of `stats`.
    #[must_use]
    pub fn new(stats: Stats, runtime_sizes: RuntimeSizePolicy) -> Self {
        let totals = ReportTotals::new(&stats);
        Self {
            archives: stats.runtimes().keys().cloned().collect(),
            runtime_sizes,
            totals,
            duplicates: stats.into_duplicates(runtime_sizes),
        }
    }

    /// Names of the analyzed archives, sorted.
    #[must_use]
    pub fn archives(&self) -> &[String] {
        &self.archives
    }

    #[must_use]
    pub fn duplicates(&self) -> &Duplicates {
        &self.duplicates
    }
}
