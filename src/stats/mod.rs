// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Running per-identity counts and sizes across all archives of a run.

mod duplicates;

pub use duplicates::{resolve, resolve_runtimes, Duplicates, RuntimeSizePolicy};
pub(crate) use duplicates::global_runtime_counts;

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::identity::{extract_os, extract_package_name};
use crate::runtime::{detect_runtimes, RuntimeObservation};
use crate::sbom::ArchiveRecord;
use crate::size::format_bytes;

/// Occurrence count and size of one identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    pub count: usize,
    pub size: u64,
    pub installed_size: u64,
}

impl Info {
    /// First observation of an identity.
    #[must_use]
    pub fn new(size: u64, installed_size: u64) -> Self {
        Self {
            count: 1,
            size,
            installed_size,
        }
    }
}

impl Serialize for Info {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Info", 5)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("size_human", &format_bytes(self.size))?;
        state.serialize_field("installed_size", &self.installed_size)?;
        state.serialize_field("installed_size_human", &format_bytes(self.installed_size))?;
        state.end()
    }
}

/// Identity to info, ordered by identity.
pub type InfoMap = BTreeMap<String, Info>;
/// Archive to runtime to info.
pub type RuntimeMap = BTreeMap<String, InfoMap>;

/// A package occurrence in one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageObservation {
    pub identity: String,
    pub size: u64,
    pub installed_size: u64,
}

/// Aggregated statistics of a run.
///
/// Not safe for concurrent writers: feed archives one at a time, in a stable order,
/// since the first observation of an identity decides its size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    base_os: InfoMap,
    packages: InfoMap,
    runtimes: RuntimeMap,
}

impl Stats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate all records, in ascending archive-name order.
    #[must_use]
    pub fn from_records(records: &[ArchiveRecord]) -> Self {
        let mut sorted: Vec<&ArchiveRecord> = records.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        let mut stats = Self::new();
        for record in sorted {
            stats.ingest(record);
        }
        stats
    }

    #[must_use]
    pub fn base_os(&self) -> &InfoMap {
        &self.base_os
    }

    #[must_use]
    pub fn packages(&self) -> &InfoMap {
        &self.packages
    }

    #[must_use]
    pub fn runtimes(&self) -> &RuntimeMap {
        &self.runtimes
    }

    /// Number of archives processed so far.
    #[must_use]
    pub fn archives(&self) -> usize {
        self.runtimes.len()
    }

    /// Record one archive.
    ///
    /// Base OS and package sizes are taken from the first observation of an identity;
    /// later observations only increment the count. Runtime sizes are summed per archive.
    pub fn process_archive(
        &mut self,
        archive: &str,
        os_identity: &str,
        os_size: u64,
        packages: &[PackageObservation],
        runtimes: &[RuntimeObservation],
    ) {
        self.base_os
            .entry(os_identity.to_string())
            .and_modify(|info| info.count += 1)
            .or_insert_with(|| Info::new(os_size, 0));

        for package in packages {
            self.packages
                .entry(package.identity.clone())
                .and_modify(|info| info.count += 1)
                .or_insert_with(|| Info::new(package.size, package.installed_size));
        }

        let archive_runtimes = self.runtimes.entry(archive.to_string()).or_default();
        for observation in runtimes {
            archive_runtimes
                .entry(observation.runtime.clone())
                .and_modify(|info| {
                    info.count += 1;
                    info.size = info.size.saturating_add(observation.size);
                })
                .or_insert_with(|| Info::new(observation.size, 0));
        }
    }

    /// Extract identities from a normalized archive and record it.
    ///
    /// Packages whose URL cannot be decoded are skipped with a warning.
    pub fn ingest(&mut self, record: &ArchiveRecord) {
        let os_identity = extract_os(&record.distro);
        if os_identity.is_empty() {
            debug!(
                archive = %record.name,
                distro = %record.distro,
                "Unrecognized distro identifier, counting under empty base OS"
            );
        }

        let mut packages = Vec::with_capacity(record.packages.len());
        let mut runtimes = Vec::new();
        for package in &record.packages {
            let Some(identity) = extract_package_name(&package.purl) else {
                warn!(
                    archive = %record.name,
                    purl = %package.purl,
                    "Skipping package: unable to decode package URL"
                );
                continue;
            };
            packages.push(PackageObservation {
                identity,
                size: package.size,
                installed_size: package.installed_size,
            });
            runtimes.extend(detect_runtimes(&package.files));
        }

        debug!(
            archive = %record.name,
            base_os = %os_identity,
            packages = packages.len(),
            runtime_files = runtimes.len(),
            "Aggregating archive"
        );
        self.process_archive(
            &record.name,
            &os_identity,
            record.base_size,
            &packages,
            &runtimes,
        );
    }

    /// Consume the statistics, keeping only identities seen at least twice.
    #[must_use]
    pub fn into_duplicates(self, policy: RuntimeSizePolicy) -> Duplicates {
        Duplicates {
            base_os: resolve(self.base_os),
            packages: resolve(self.packages),
            runtimes: resolve_runtimes(&self.runtimes, policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom::{FileRecord, PackageRecord};

    fn package(identity: &str, size: u64, installed_size: u64) -> PackageObservation {
        PackageObservation {
            identity: identity.to_string(),
            size,
            installed_size,
        }
    }

    fn runtime(name: &str, size: u64) -> RuntimeObservation {
        RuntimeObservation {
            runtime: name.to_string(),
            size,
        }
    }

    fn record(name: &str, distro: &str, packages: Vec<PackageRecord>) -> ArchiveRecord {
        ArchiveRecord {
            name: name.to_string(),
            distro: distro.to_string(),
            base_size: 1000,
            packages,
        }
    }

    fn package_record(purl: &str, size: u64, files: Vec<FileRecord>) -> PackageRecord {
        PackageRecord {
            purl: purl.to_string(),
            size,
            installed_size: size * 2,
            files,
        }
    }

    #[test]
    fn test_first_observation_creates_entries() {
        let mut stats = Stats::new();
        stats.process_archive(
            "a",
            "ubuntu:22.04",
            77,
            &[package("curl", 10, 20)],
            &[runtime("jdk-11", 5)],
        );

        assert_eq!(stats.base_os()["ubuntu:22.04"], Info::new(77, 0));
        assert_eq!(stats.packages()["curl"], Info::new(10, 20));
        assert_eq!(stats.runtimes()["a"]["jdk-11"], Info::new(5, 0));
        assert_eq!(stats.archives(), 1);
    }

    #[test]
    fn test_repeated_package_keeps_first_size() {
        let mut stats = Stats::new();
        stats.process_archive("a", "ubuntu:22.04", 77, &[package("curl", 10, 20)], &[]);
        stats.process_archive("b", "ubuntu:22.04", 99, &[package("curl", 30, 40)], &[]);

        let curl = stats.packages()["curl"];
        assert_eq!(curl.count, 2);
        assert_eq!((curl.size, curl.installed_size), (10, 20));

        let os = stats.base_os()["ubuntu:22.04"];
        assert_eq!(os.count, 2);
        assert_eq!(os.size, 77);
    }

    #[test]
    fn test_runtime_sizes_accumulate_within_archive() {
        let mut stats = Stats::new();
        stats.process_archive(
            "a",
            "",
            0,
            &[],
            &[runtime("jdk-11", 5), runtime("jdk-11", 7), runtime("python3", 1)],
        );

        assert_eq!(
            stats.runtimes()["a"]["jdk-11"],
            Info {
                count: 2,
                size: 12,
                installed_size: 0
            }
        );
        assert_eq!(stats.runtimes()["a"]["python3"].count, 1);
    }

    #[test]
    fn test_runtime_size_within_archive_saturates() {
        let mut stats = Stats::new();
        stats.process_archive(
            "a",
            "",
            0,
            &[],
            &[runtime("jdk", u64::MAX - 1), runtime("jdk", 10)],
        );

        let jdk = stats.runtimes()["a"]["jdk"];
        assert_eq!((jdk.count, jdk.size), (2, u64::MAX));
    }

    #[test]
    fn test_runtimes_are_scoped_per_archive() {
        let mut stats = Stats::new();
        stats.process_archive("a", "", 0, &[], &[runtime("jdk-11", 5)]);
        stats.process_archive("b", "", 0, &[], &[runtime("jdk-11", 9)]);

        assert_eq!(stats.runtimes()["a"]["jdk-11"], Info::new(5, 0));
        assert_eq!(stats.runtimes()["b"]["jdk-11"], Info::new(9, 0));
    }

    #[test]
    fn test_archive_without_runtimes_is_tracked() {
        let mut stats = Stats::new();
        stats.process_archive("a", "alpine:3.19", 0, &[], &[]);
        assert!(stats.runtimes()["a"].is_empty());
    }

    #[test]
    fn test_empty_os_identity_is_a_bucket() {
        let mut stats = Stats::new();
        stats.process_archive("a", "", 1, &[], &[]);
        stats.process_archive("b", "", 2, &[], &[]);
        assert_eq!(stats.base_os()[""].count, 2);
    }

    #[test]
    fn test_ingest_extracts_identities() {
        let mut stats = Stats::new();
        stats.ingest(&record(
            "a",
            "pkg:generic/debian@12?arch=amd64",
            vec![
                package_record("pkg:deb/debian/curl@7.88.1?arch=amd64", 10, vec![]),
                package_record(
                    "pkg:deb/debian/openjdk-17-jre-headless@17.0.9",
                    500,
                    vec![
                        FileRecord {
                            path: "/usr/lib/jvm/java-17-openjdk-amd64/lib/libjvm.so".to_string(),
                            size: 300,
                        },
                        FileRecord {
                            path: "/usr/lib/jvm/java-17-openjdk-amd64/bin/java".to_string(),
                            size: 12,
                        },
                    ],
                ),
            ],
        ));

        assert_eq!(stats.base_os()["debian:12"], Info::new(1000, 0));
        assert_eq!(stats.packages()["curl@7.88.1"], Info::new(10, 20));
        assert_eq!(
            stats.runtimes()["a"]["java-17-openjdk-amd64"],
            Info {
                count: 2,
                size: 312,
                installed_size: 0
            }
        );
    }

    #[test]
    fn test_ingest_skips_undecodable_package() {
        let mut stats = Stats::new();
        stats.ingest(&record(
            "a",
            "pkg:generic/debian@12",
            vec![
                package_record("pkg:npm/broken%zz@1.0.0", 10, vec![]),
                package_record("pkg:npm/left-pad@1.3.0", 1, vec![]),
            ],
        ));

        assert_eq!(stats.packages().len(), 1);
        assert!(stats.packages().contains_key("left-pad@1.3.0"));
    }

    #[test]
    fn test_from_records_orders_by_archive_name() {
        // Both report curl with different sizes; "a" sorts first and wins.
        let records = vec![
            record(
                "b",
                "pkg:generic/debian@12",
                vec![package_record("pkg:deb/debian/curl", 30, vec![])],
            ),
            record(
                "a",
                "pkg:generic/debian@12",
                vec![package_record("pkg:deb/debian/curl", 10, vec![])],
            ),
        ];

        let stats = Stats::from_records(&records);
        assert_eq!(stats.packages()["curl"].count, 2);
        assert_eq!(stats.packages()["curl"].size, 10);
        assert_eq!(stats.archives(), 2);
    }

    #[test]
    fn test_end_to_end_duplicate_package() {
        let records = vec![
            record(
                "a",
                "pkg:generic/ubuntu@22.04",
                vec![package_record("pkg:generic/curl", 10, vec![])],
            ),
            record(
                "b",
                "pkg:generic/alpine@3.19",
                vec![
                    package_record("pkg:generic/curl", 10, vec![]),
                    package_record("pkg:generic/busybox", 3, vec![]),
                ],
            ),
        ];
        let stats = Stats::from_records(&records);
        assert_eq!(stats.packages()["curl"].count, 2);

        let duplicates = stats.into_duplicates(RuntimeSizePolicy::Sum);
        assert_eq!(duplicates.packages.len(), 1);
        assert_eq!(duplicates.packages["curl"].count, 2);
        assert!(duplicates.base_os.is_empty());
        assert!(duplicates.runtimes.is_empty());
    }

    #[test]
    fn test_info_serialization() {
        let info = Info {
            count: 3,
            size: 1536,
            installed_size: 0,
        };
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["size"], 1536);
        assert_eq!(json["size_human"], "1.50KB");
        assert_eq!(json["installed_size_human"], "0B");
    }
}
