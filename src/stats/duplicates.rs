// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Reduces aggregated statistics to the identities shared by two or more archives.

use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{Info, InfoMap, RuntimeMap};

/// How the size of a runtime found in several archives is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeSizePolicy {
    /// Sum the sizes of all archives containing the runtime.
    #[default]
    Sum,
    /// Take the size from the archive with the greatest name.
    LastWins,
}

/// Identities observed at least twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Duplicates {
    pub base_os: InfoMap,
    pub packages: InfoMap,
    pub runtimes: InfoMap,
}

/// Keep the entries with a count of at least two, unmodified.
#[must_use]
pub fn resolve(entries: InfoMap) -> InfoMap {
    entries
        .into_iter()
        .filter(|(_, info)| info.count >= 2)
        .collect()
}

/// Sum of the per-archive counts of each runtime.
pub(crate) fn global_runtime_counts(entries: &RuntimeMap) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for runtimes in entries.values() {
        for (runtime, info) in runtimes {
            *counts.entry(runtime.as_str()).or_insert(0) += info.count;
        }
    }
    counts
}

/// Flatten the per-archive runtimes, keeping runtimes counted at least twice overall.
///
/// The count of a kept runtime is its count summed over all archives. Its sizes follow
/// `policy`.
#[must_use]
pub fn resolve_runtimes(entries: &RuntimeMap, policy: RuntimeSizePolicy) -> InfoMap {
    let counts = global_runtime_counts(entries);

    let mut duplicates = InfoMap::new();
    for runtimes in entries.values() {
        for (runtime, info) in runtimes {
            let count = counts.get(runtime.as_str()).copied().unwrap_or_default();
            if count < 2 {
                continue;
            }
            match policy {
                RuntimeSizePolicy::Sum => {
                    let entry = duplicates.entry(runtime.clone()).or_insert(Info {
                        count,
                        size: 0,
                        installed_size: 0,
                    });
                    entry.size = entry.size.saturating_add(info.size);
                    entry.installed_size =
                        entry.installed_size.saturating_add(info.installed_size);
                }
                RuntimeSizePolicy::LastWins => {
                    duplicates.insert(
                        runtime.clone(),
                        Info {
                            count,
                            size: info.size,
                            installed_size: info.installed_size,
                        },
                    );
                }
            }
        }
    }
    duplicates
}
