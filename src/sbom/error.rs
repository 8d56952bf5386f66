// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Defines the error type for loading SBOM and image inspection documents.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for SBOM operations.
pub type SbomResult<T> = std::result::Result<T, SbomError>;

/// Errors that can occur while discovering or loading archive documents.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Failed to read file: {path:?}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse JSON document: {path:?}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid {metadata_type} metadata for package {purl} in {path:?}")]
    InvalidMetadata {
        path: PathBuf,
        purl: String,
        metadata_type: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to walk input directory: {path:?}")]
    WalkDirFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("No archive SBOMs found in input directory: {path:?}")]
    NoArchives { path: PathBuf },
    #[error("Archive {archive} has no native SBOM (expected {expected:?})")]
    MissingNativeSbom { archive: String, expected: PathBuf },
}

/// Read and deserialize a JSON document.
///
/// # Errors
/// Returns an error if the file cannot be read or does not match the expected schema.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> SbomResult<T> {
    let content = fs::read(path).map_err(|e| SbomError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_slice(&content).map_err(|e| SbomError::ParseFailed {
        path: path.to_path_buf(),
        source: e,
    })
}
