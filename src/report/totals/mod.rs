// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Statistics over the base OS, package and runtime categories of a run.

mod category;

use serde::Serialize;

use crate::stats::{global_runtime_counts, InfoMap, Stats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReportTotals {
    pub(crate) archives: usize,
    pub(crate) base_os: category::Totals,
    pub(crate) packages: category::Totals,
    pub(crate) runtimes: category::Totals,
}

impl ReportTotals {
    #[must_use]
    pub(crate) fn new(stats: &Stats) -> Self {
        let runtime_counts: Vec<usize> = global_runtime_counts(stats.runtimes())
            .into_values()
            .collect();
        Self {
            archives: stats.archives(),
            base_os: category::Totals::calculate(&counts(stats.base_os())),
            packages: category::Totals::calculate(&counts(stats.packages())),
            runtimes: category::Totals::calculate(&runtime_counts),
        }
    }
}

fn counts(entries: &InfoMap) -> Vec<usize> {
    entries.values().map(|info| info.count).collect()
}
