// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Groups the per-archive documents found in an input directory by archive name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::{SbomError, SbomResult};

const NATIVE_SUFFIX: &str = ".syft.json";
const GITHUB_SUFFIX: &str = ".github.json";
const DIVE_SUFFIX: &str = ".dive.json";

/// The documents describing one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveFiles {
    pub name: String,
    pub native: PathBuf,
    pub github: Option<PathBuf>,
    pub dive: Option<PathBuf>,
}

#[derive(Default)]
struct Found {
    native: Option<PathBuf>,
    github: Option<PathBuf>,
    dive: Option<PathBuf>,
}

/// Find all archives in `dir`, sorted by name.
///
/// Only direct children of `dir` are considered. Files named
/// `<archive>.syft.json`, `<archive>.github.json` and `<archive>.dive.json` belong to
/// `<archive>`; anything else is ignored.
///
/// # Errors
/// Returns an error if the directory cannot be read, contains no archives, or an
/// archive has companion documents but no native SBOM.
pub fn discover_archives(dir: &Path) -> SbomResult<Vec<ArchiveFiles>> {
    let mut found: BTreeMap<String, Found> = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let e = entry.map_err(|e| SbomError::WalkDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if !e.file_type().is_file() {
            continue;
        }
        let Some(file_name) = e.file_name().to_str() else {
            continue;
        };
        let path = e.path().to_path_buf();
        if let Some(name) = file_name.strip_suffix(NATIVE_SUFFIX) {
            found.entry(name.to_string()).or_default().native = Some(path);
        } else if let Some(name) = file_name.strip_suffix(GITHUB_SUFFIX) {
            found.entry(name.to_string()).or_default().github = Some(path);
        } else if let Some(name) = file_name.strip_suffix(DIVE_SUFFIX) {
            found.entry(name.to_string()).or_default().dive = Some(path);
        }
    }

    if found.is_empty() {
        return Err(SbomError::NoArchives {
            path: dir.to_path_buf(),
        });
    }

    found
        .into_iter()
        .map(|(name, files)| {
            let native = files.native.ok_or_else(|| SbomError::MissingNativeSbom {
                expected: dir.join(format!("{name}{NATIVE_SUFFIX}")),
                archive: name.clone(),
            })?;
            Ok(ArchiveFiles {
                name,
                native,
                github: files.github,
                dive: files.dive,
            })
        })
        .collect()
}
