// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Formats and prints report summaries to the console.

use comfy_table::{Cell, CellAlignment, Table};
use tracing::warn;

use super::totals::ReportTotals;
use super::utils::ranked;
use super::Report;
use crate::size::format_bytes;
use crate::stats::InfoMap;

/// Summarize the report to the console.
///
/// Prints the category totals followed by one table per category listing the `top_n`
/// most duplicated identities.
pub fn summarize_report(report: &Report, top_n: usize) {
    println!("Archives: {}\n", report.archives.len());
    println!("{}\n", totals_table(&report.totals));

    for (title, label, entries) in [
        ("Base OS Statistics", "Base OS", &report.duplicates.base_os),
        ("Package Statistics", "Package", &report.duplicates.packages),
        ("Runtime Statistics", "Runtime", &report.duplicates.runtimes),
    ] {
        if entries.is_empty() {
            warn!("No duplicates to generate stats for: {title}");
            continue;
        }
        println!("{title}");
        println!("{}\n", duplicates_table(label, entries, top_n));
    }
}

/// Create a table with the default preset styling.
fn default_table_preset() -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL_CONDENSED)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
    table
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(comfy_table::Attribute::Bold))
        .collect()
}

/// Create a table showing distinct, observed and duplicated identities per category.
fn totals_table(totals: &ReportTotals) -> Table {
    let mut table = default_table_preset();
    table.set_header(header(&["Category", "Distinct", "Observed", "Duplicated"]));
    for (name, category) in [
        ("Base OS", &totals.base_os),
        ("Packages", &totals.packages),
        ("Runtimes", &totals.runtimes),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(category.distinct),
            Cell::new(category.observations),
            Cell::new(category.duplicates),
        ]);
    }
    table
}

/// Create a table of the most duplicated identities of one category.
fn duplicates_table(label: &str, entries: &InfoMap, top_n: usize) -> Table {
    let mut table = default_table_preset();
    table.set_header(header(&["#", label, "Count", "Size", "Installed Size"]));
    for (rank, (identity, info)) in ranked(entries, top_n).into_iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(identity),
            Cell::new(info.count).set_alignment(CellAlignment::Right),
            Cell::new(format_bytes(info.size)).set_alignment(CellAlignment::Right),
            Cell::new(format_bytes(info.installed_size)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
