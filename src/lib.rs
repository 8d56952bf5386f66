// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! A tool for finding size-optimization opportunities across the images of a container bundle.
//!
//! This crate provides functionality to:
//! - Load syft SBOMs and dive image inspections of the individual archives
//! - Aggregate base OSes, packages and language runtimes across archives
//! - Resolve which of them are duplicated in two or more archives
//! - Generate reports on the duplicates and their sizes

pub mod identity;
pub mod report;
pub mod runtime;
pub mod sbom;
pub mod size;
pub mod stats;

// Re-export key types for convenience
pub use report::Report;
pub use sbom::{ArchiveRecord, PackageRecord};
pub use stats::{Duplicates, Info, RuntimeSizePolicy, Stats};
