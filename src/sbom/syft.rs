// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Native syft JSON documents (`syft -o json`).

use serde::Deserialize;
use std::path::Path;
use tracing::warn;

use super::error::{SbomError, SbomResult};
use super::metadata::{PackageMetadata, SizeInfo};
use super::PackageRecord;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SyftJson {
    #[serde(default)]
    artifacts: Vec<Artifact>,
    #[serde(default)]
    distro: Option<Distro>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(default)]
    purl: String,
    #[serde(rename = "metadataType", default)]
    metadata_type: Option<String>,
    #[serde(default)]
    metadata: serde_json::Value,
}

#[derive(Debug, Default, Deserialize)]
struct Distro {
    #[serde(default)]
    id: String,
    #[serde(rename = "versionID", default)]
    version_id: String,
}

impl SyftJson {
    /// The distro as a `pkg:generic/<id>@<version>` identifier, if the document has one.
    pub(crate) fn distro_identifier(&self) -> Option<String> {
        self.distro
            .as_ref()
            .filter(|d| !d.id.is_empty() && !d.version_id.is_empty())
            .map(|d| format!("pkg:generic/{}@{}", d.id, d.version_id))
    }

    /// Normalize the artifacts into package records.
    ///
    /// Artifacts with unsupported metadata are skipped with a warning.
    ///
    /// # Errors
    /// Returns an error if the metadata of a recognized type cannot be decoded.
    pub(crate) fn into_packages(self, path: &Path) -> SbomResult<Vec<PackageRecord>> {
        let mut packages = Vec::with_capacity(self.artifacts.len());
        for artifact in self.artifacts {
            let metadata = PackageMetadata::from_tagged(
                artifact.metadata_type.as_deref(),
                artifact.metadata,
            )
            .map_err(|e| SbomError::InvalidMetadata {
                path: path.to_path_buf(),
                purl: artifact.purl.clone(),
                metadata_type: artifact.metadata_type.clone().unwrap_or_default(),
                source: e,
            })?;

            let Some((size, installed_size)) = metadata.size_info() else {
                warn!(
                    purl = %artifact.purl,
                    metadata_type = artifact.metadata_type.as_deref().unwrap_or_default(),
                    sbom = %path.display(),
                    "Skipping package with unsupported metadata"
                );
                continue;
            };
            packages.push(PackageRecord {
                purl: artifact.purl,
                size,
                installed_size,
                files: metadata.into_files(),
            });
        }
        Ok(packages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> SyftJson {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_distro_identifier() {
        let sbom = parse(json!({"distro": {"id": "debian", "versionID": "12", "name": "Debian"}}));
        assert_eq!(
            sbom.distro_identifier(),
            Some("pkg:generic/debian@12".to_string())
        );
    }

    #[test]
    fn test_distro_identifier_missing_version() {
        assert_eq!(parse(json!({"distro": {"id": "debian"}})).distro_identifier(), None);
        assert_eq!(parse(json!({})).distro_identifier(), None);
    }

    #[test]
    fn test_into_packages_skips_unsupported() {
        let sbom = parse(json!({"artifacts": [
            {
                "purl": "pkg:apk/alpine/curl@8.5.0-r0",
                "metadataType": "apk-db-entry",
                "metadata": {"size": 100, "installedSize": 200, "files": [{"path": "/usr/bin/curl"}]}
            },
            {
                "purl": "pkg:maven/org.slf4j/slf4j-api@2.0.9",
                "metadataType": "java-archive",
                "metadata": {"virtualPath": "/app/lib/slf4j-api.jar"}
            },
            {
                "purl": "pkg:generic/tool@1.0",
                "metadata": {"size": 7, "installedSize": 8}
            }
        ]}));
        let packages = sbom.into_packages(Path::new("test.syft.json")).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].purl, "pkg:apk/alpine/curl@8.5.0-r0");
        assert_eq!((packages[0].size, packages[0].installed_size), (100, 200));
        assert_eq!(packages[0].files.len(), 1);
        assert_eq!((packages[1].size, packages[1].installed_size), (7, 8));
    }

    #[test]
    fn test_into_packages_invalid_metadata() {
        let sbom = parse(json!({"artifacts": [{
            "purl": "pkg:rpm/redhat/bash@5.1",
            "metadataType": "rpm-db-entry",
            "metadata": {"size": "not a number"}
        }]}));
        let error = sbom.into_packages(Path::new("test.syft.json")).unwrap_err();
        assert!(matches!(error, SbomError::InvalidMetadata { .. }));
        assert!(error.to_string().contains("pkg:rpm/redhat/bash@5.1"));
    }
}
