// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.
use clap::Parser;
use std::path::PathBuf;

use sbom_stats::stats::RuntimeSizePolicy;

#[derive(Parser)]
#[command(name = "sbom_stats")]
#[command(version)]
#[command(about = "Finds base OSes, packages and runtimes duplicated across container image SBOMs")]
pub(crate) struct Args {
    #[arg(long_help = "Directory containing the per-archive documents.\n\
                <archive>.syft.json is the syft JSON SBOM of an archive (required).\n\
                <archive>.github.json is its syft GitHub-JSON output (optional).\n\
                <archive>.dive.json is its dive image inspection (optional).")]
    pub input: PathBuf,

    /// Path to the file to write the report in JSON format.
    pub report: PathBuf,

    /// Number of entries to show per category.
    #[arg(long, default_value_t = 10)]
    pub top_n: usize,

    /// How to size a runtime found in several archives.
    #[arg(long, value_enum, default_value_t = RuntimeSizePolicy::Sum)]
    pub runtime_sizes: RuntimeSizePolicy,
}
