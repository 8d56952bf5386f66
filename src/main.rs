// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
mod args;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::Args;
use sbom_stats::report::{summarize_report, Report};
use sbom_stats::sbom::{discover_archives, load_archives, ArchiveRecord};
use sbom_stats::stats::Stats;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let records = load(&args.input)?;
    let stats = Stats::from_records(&records);
    let report = Report::new(stats, args.runtime_sizes);
    write_report_to_file(&report, &args.report)?;
    summarize_report(&report, args.top_n);
    Ok(())
}

/// Discover and load all archives in the input directory.
///
/// # Errors
/// Returns an error if the directory holds no usable archives or any document fails to load.
fn load(input: &Path) -> Result<Vec<ArchiveRecord>> {
    info!(input = %input.display(), "Discovering archives");
    let archives = discover_archives(input)
        .with_context(|| format!("Failed to discover archives: {}", input.display()))?;

    let records = load_archives(&archives)
        .with_context(|| format!("Failed to load archives: {}", input.display()))?;

    info!(
        archives = records.len(),
        packages = records.iter().map(|r| r.packages.len()).sum::<usize>(),
        "Loading completed"
    );
    Ok(records)
}

/// Write the report to a file.
///
/// # Errors
/// Returns an error if the report cannot be serialized to JSON or if the file cannot be created.
fn write_report_to_file(report: &Report, dest: &Path) -> Result<()> {
    info!(file = %dest.display(), "Writing report to file");
    let file = File::create(dest)
        .with_context(|| format!("Failed to create JSON output file: {}", dest.display()))?;
    serde_json::to_writer_pretty(file, report)
        .with_context(|| format!("Failed to serialize report to JSON: {}", dest.display()))?;
    Ok(())
}
