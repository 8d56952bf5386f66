// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Utility functions for output formatting.

use crate::stats::{Info, InfoMap};

/// Order entries for display and keep the first `top_n`.
///
/// Entries are sorted by count, highest first; equal counts are ordered by identity.
///
/// # Examples
///
/// ```ignore
/// let entries: InfoMap = [("b", 2), ("a", 2), ("c", 9)].map(...).collect();
/// let names: Vec<&str> = ranked(&entries, 2).into_iter().map(|(n, _)| n).collect();
/// assert_eq!(names, vec!["c", "a"]);
/// ```
#[must_use]
pub(crate) fn ranked(entries: &InfoMap, top_n: usize) -> Vec<(&str, &Info)> {
    let mut ranked: Vec<(&str, &Info)> = entries
        .iter()
        .map(|(identity, info)| (identity.as_str(), info))
        .collect();
    ranked.sort_by(|(a_identity, a), (b_identity, b)| {
        b.count.cmp(&a.count).then_with(|| a_identity.cmp(b_identity))
    });
    ranked.truncate(top_n);
    ranked
}
