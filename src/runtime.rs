// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Detects language runtimes from the install locations of package files.

use regex::Regex;
use std::sync::LazyLock;

use crate::sbom::FileRecord;

// Java distributions live under `lib/jvm/<distribution>/{lib,bin}/`, Python
// interpreters are installed as `bin/python<version>`. The capture is the runtime name.
static INSTALL_LOCATIONS: LazyLock<[Regex; 2]> = LazyLock::new(|| {
    [
        Regex::new(r"/lib/jvm/([^/]+)/(?:lib|bin)/").expect("JVM location is a valid regex"),
        Regex::new(r"/bin/(python[^/]*)$").expect("Python location is a valid regex"),
    ]
});

const RUNTIME_MARKERS: [&str; 5] = ["jdk", "jre", "python", "rust", "golang"];

/// A file attributed to a runtime, e.g. `zulu-openjdk-17` with the file's size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeObservation {
    pub runtime: String,
    pub size: u64,
}

/// Attribute each file installed in a runtime location to that runtime.
///
/// Java runtimes are named after their distribution directory below `lib/jvm/`
/// (`zulu-openjdk-17` vs. `java-11-openjdk`), Python runtimes after the interpreter file
/// (`python3.11`). Files in a runtime location whose path names no runtime marker are
/// ignored.
#[must_use]
pub fn detect_runtimes(files: &[FileRecord]) -> Vec<RuntimeObservation> {
    files
        .iter()
        .filter(|file| has_marker(&file.path))
        .filter_map(|file| {
            runtime_name(&file.path).map(|runtime| RuntimeObservation {
                runtime: runtime.to_string(),
                size: file.size,
            })
        })
        .collect()
}

fn runtime_name(path: &str) -> Option<&str> {
    INSTALL_LOCATIONS
        .iter()
        .find_map(|location| location.captures(path))
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str())
}

fn has_marker(path: &str) -> bool {
    path.split('/')
        .any(|segment| RUNTIME_MARKERS.iter().any(|marker| segment.contains(marker)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, size: u64) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size,
        }
    }

    fn observation(runtime: &str, size: u64) -> RuntimeObservation {
        RuntimeObservation {
            runtime: runtime.to_string(),
            size,
        }
    }

    #[test]
    fn test_java_distribution_lib_and_bin() {
        let files = vec![
            file("/usr/lib/jvm/zulu-openjdk-17/lib/libjava.so", 100),
            file("/usr/lib/jvm/zulu-openjdk-17/bin/java", 20),
        ];
        assert_eq!(
            detect_runtimes(&files),
            vec![
                observation("zulu-openjdk-17", 100),
                observation("zulu-openjdk-17", 20)
            ]
        );
    }

    #[test]
    fn test_distribution_preferred_over_file_name() {
        let files = vec![file("/usr/lib/jvm/java-11-openjdk-amd64/lib/jrt-fs-jdk.jar", 5)];
        assert_eq!(
            detect_runtimes(&files),
            vec![observation("java-11-openjdk-amd64", 5)]
        );
    }

    #[test]
    fn test_distribution_with_nested_jre() {
        let files = vec![file("/usr/lib/jvm/java-8-openjdk-amd64/jre/lib/rt.jar", 64)];
        assert_eq!(
            detect_runtimes(&files),
            vec![observation("java-8-openjdk-amd64", 64)]
        );
    }

    #[test]
    fn test_python_versions_under_generic_parent_stay_apart() {
        let files = vec![
            file("/opt/python/3.8.12/bin/python3.8", 10),
            file("/opt/python/3.11.8/bin/python3.11", 20),
        ];
        assert_eq!(
            detect_runtimes(&files),
            vec![observation("python3.8", 10), observation("python3.11", 20)]
        );
    }

    #[test]
    fn test_python_interpreter() {
        let files = vec![
            file("/usr/bin/python3.11", 6_000_000),
            file("/usr/local/bin/python3", 16),
        ];
        assert_eq!(
            detect_runtimes(&files),
            vec![observation("python3.11", 6_000_000), observation("python3", 16)]
        );
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let files = vec![
            file("/usr/bin/curl", 250_000),
            file("/usr/lib/python3.11/os.py", 40_000),
            file("/usr/lib/jvm/README", 10),
            file("/etc/ssl/certs/ca-certificates.crt", 200_000),
        ];
        assert!(detect_runtimes(&files).is_empty());
    }

    #[test]
    fn test_runtime_location_without_marker() {
        // Matches the JVM layout but names no known runtime.
        let files = vec![file("/usr/lib/jvm/temurin-21/lib/modules", 1024)];
        assert!(detect_runtimes(&files).is_empty());
    }

    #[test]
    fn test_empty_files() {
        assert!(detect_runtimes(&[]).is_empty());
    }
}
