// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Package metadata variants reported by syft and the sizes each variant can provide.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::FileRecord;

/// Access to the `(size, installed_size)` a metadata variant knows about.
///
/// Returns `None` when the variant carries no usable size information at all.
/// A size the variant does not record is reported as `0`.
pub trait SizeInfo {
    fn size_info(&self) -> Option<(u64, u64)>;
}

/// Alpine `apk` database entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApkEntry {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub installed_size: u64,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Debian `dpkg` status entry. Has no archive size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DpkgEntry {
    #[serde(default)]
    pub installed_size: u64,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Arch Linux `alpm` database entry. Has no installed size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AlpmEntry {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// RPM database entry. Has no installed size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RpmEntry {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Untagged metadata, taken at face value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericEntry {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub installed_size: u64,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl SizeInfo for ApkEntry {
    fn size_info(&self) -> Option<(u64, u64)> {
        Some((self.size, self.installed_size))
    }
}

impl SizeInfo for DpkgEntry {
    fn size_info(&self) -> Option<(u64, u64)> {
        Some((0, self.installed_size))
    }
}

impl SizeInfo for AlpmEntry {
    fn size_info(&self) -> Option<(u64, u64)> {
        Some((self.size, 0))
    }
}

impl SizeInfo for RpmEntry {
    fn size_info(&self) -> Option<(u64, u64)> {
        Some((self.size, 0))
    }
}

impl SizeInfo for GenericEntry {
    fn size_info(&self) -> Option<(u64, u64)> {
        Some((self.size, self.installed_size))
    }
}

/// Package metadata, selected by the artifact's `metadataType` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageMetadata {
    Apk(ApkEntry),
    Dpkg(DpkgEntry),
    Alpm(AlpmEntry),
    Rpm(RpmEntry),
    Generic(GenericEntry),
    Unsupported(String), // Stores the unrecognized tag.
}

impl PackageMetadata {
    /// Decode a metadata body according to its tag.
    ///
    /// Both the current (`apk-db-entry`) and legacy (`ApkMetadata`) syft tag names are
    /// recognized. A missing tag selects [`PackageMetadata::Generic`].
    ///
    /// # Errors
    /// Returns an error if the body does not match the schema of a recognized tag.
    pub fn from_tagged(
        metadata_type: Option<&str>,
        body: serde_json::Value,
    ) -> serde_json::Result<Self> {
        // syft emits `null` metadata for packages it found no database entry for.
        let body = if body.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            body
        };
        let metadata = match metadata_type {
            None | Some("") => Self::Generic(serde_json::from_value(body)?),
            Some("apk-db-entry" | "ApkMetadata") => Self::Apk(serde_json::from_value(body)?),
            Some("dpkg-db-entry" | "DpkgMetadata") => Self::Dpkg(serde_json::from_value(body)?),
            Some("alpm-db-entry" | "AlpmMetadata") => Self::Alpm(serde_json::from_value(body)?),
            Some("rpm-db-entry" | "rpm-archive" | "RpmMetadata" | "RpmdbMetadata") => {
                Self::Rpm(serde_json::from_value(body)?)
            }
            Some(other) => Self::Unsupported(other.to_string()),
        };
        Ok(metadata)
    }

    /// Consume the metadata, returning the installed files.
    #[must_use]
    pub fn into_files(self) -> Vec<FileRecord> {
        match self {
            Self::Apk(entry) => entry.files,
            Self::Dpkg(entry) => entry.files,
            Self::Alpm(entry) => entry.files,
            Self::Rpm(entry) => entry.files,
            Self::Generic(entry) => entry.files,
            Self::Unsupported(_) => Vec::new(),
        }
    }
}

impl SizeInfo for PackageMetadata {
    fn size_info(&self) -> Option<(u64, u64)> {
        match self {
            Self::Apk(entry) => entry.size_info(),
            Self::Dpkg(entry) => entry.size_info(),
            Self::Alpm(entry) => entry.size_info(),
            Self::Rpm(entry) => entry.size_info(),
            Self::Generic(entry) => entry.size_info(),
            Self::Unsupported(_) => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFileSize {
    Number(u64),
    Text(String),
}

/// File sizes are numbers for most package types and decimal strings for others (alpm).
///
/// # Errors
/// Fails on strings that are not a non-negative decimal integer.
pub(crate) fn deserialize_file_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFileSize>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawFileSize::Number(size)) => Ok(size),
        Some(RawFileSize::Text(text)) => text
            .trim()
            .parse()
            .map_err(|e| D::Error::custom(format!("invalid file size {text:?}: {e}"))),
    }
}
