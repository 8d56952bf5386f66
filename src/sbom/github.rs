// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! GitHub dependency-snapshot documents (`syft -o github-json`).

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SyftGithubJson {
    #[serde(default)]
    metadata: Metadata,
    // BTreeMap keeps manifest and package order stable between runs.
    #[serde(default)]
    manifests: BTreeMap<String, Manifest>,
}

#[derive(Debug, Default, Deserialize)]
struct Metadata {
    #[serde(rename = "syft:distro", default)]
    distro: String,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    resolved: BTreeMap<String, ResolvedPackage>,
}

#[derive(Debug, Default, Deserialize)]
struct ResolvedPackage {
    #[serde(default)]
    package_url: String,
}

impl SyftGithubJson {
    pub(crate) fn distro(&self) -> &str {
        &self.metadata.distro
    }

    /// Package URLs of all resolved packages across all manifests.
    pub(crate) fn package_urls(&self) -> impl Iterator<Item = &str> {
        self.manifests
            .values()
            .flat_map(|manifest| manifest.resolved.values())
            .map(|package| package.package_url.as_str())
    }
}
