// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Loads syft and dive documents and normalizes them into one record per archive.

mod discovery;
mod dive;
mod error;
mod github;
mod metadata;
mod syft;

use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

pub use discovery::{discover_archives, ArchiveFiles};
use dive::DiveJson;
pub use error::{SbomError, SbomResult};
use error::read_json;
use github::SyftGithubJson;
pub use metadata::{
    AlpmEntry, ApkEntry, DpkgEntry, GenericEntry, PackageMetadata, RpmEntry, SizeInfo,
};
use syft::SyftJson;

use crate::identity::extract_package_name;

/// A file installed by a package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(default, deserialize_with = "metadata::deserialize_file_size")]
    pub size: u64,
}

/// A package as seen in one archive, independent of the SBOM schema it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    pub purl: String,
    pub size: u64,
    pub installed_size: u64,
    pub files: Vec<FileRecord>,
}

/// Everything the aggregator needs to know about one archive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveRecord {
    pub name: String,
    pub distro: String,
    pub base_size: u64,
    pub packages: Vec<PackageRecord>,
}

impl ArchiveRecord {
    /// Load and normalize the documents of one archive.
    ///
    /// The distro comes from the GitHub document if present, otherwise from the native SBOM.
    /// With a GitHub document, its resolved packages define the package list and the native
    /// SBOM only contributes sizes and files; without one, the native artifacts are used.
    ///
    /// # Errors
    /// Returns an error if any of the documents cannot be read or parsed.
    pub fn load(files: &ArchiveFiles) -> SbomResult<Self> {
        let native: SyftJson = read_json(&files.native)?;
        let github: Option<SyftGithubJson> =
            files.github.as_deref().map(read_json).transpose()?;
        let base_size = files
            .dive
            .as_deref()
            .map(read_json::<DiveJson>)
            .transpose()?
            .map_or(0, |dive| dive.base_size());

        let native_distro = native.distro_identifier();
        let native_packages = native.into_packages(&files.native)?;

        let (distro, packages) = match github {
            Some(github) => (
                github.distro().to_string(),
                Self::resolve_manifest_packages(&github, native_packages),
            ),
            None => (native_distro.unwrap_or_default(), native_packages),
        };

        debug!(
            archive = %files.name,
            distro = %distro,
            packages = packages.len(),
            base_size,
            "Loaded archive"
        );
        Ok(Self {
            name: files.name.clone(),
            distro,
            base_size,
            packages,
        })
    }

    /// Pair each package listed in the GitHub manifests with the native record of the same
    /// identity. Packages without a native record get zero sizes and no files.
    fn resolve_manifest_packages(
        github: &SyftGithubJson,
        native_packages: Vec<PackageRecord>,
    ) -> Vec<PackageRecord> {
        let by_identity: HashMap<String, PackageRecord> = native_packages
            .into_iter()
            .filter_map(|package| Some((extract_package_name(&package.purl)?, package)))
            .collect();

        github
            .package_urls()
            .map(|purl| {
                let native = extract_package_name(purl).and_then(|name| by_identity.get(&name));
                match native {
                    Some(native) => PackageRecord {
                        purl: purl.to_string(),
                        ..native.clone()
                    },
                    None => PackageRecord {
                        purl: purl.to_string(),
                        ..PackageRecord::default()
                    },
                }
            })
            .collect()
    }
}

/// Load all archives in parallel, preserving the order of `archives`.
///
/// # Errors
/// Returns the first error encountered; a single unreadable archive aborts the run.
pub fn load_archives(archives: &[ArchiveFiles]) -> SbomResult<Vec<ArchiveRecord>> {
    archives.par_iter().map(ArchiveRecord::load).collect()
}
