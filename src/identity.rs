// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Derives the canonical identities used as aggregation keys from raw SBOM fields.

use regex::Regex;
use std::sync::LazyLock;

// Version stops at the query suffix, e.g. `pkg:generic/ubuntu@22.04?arch=amd64`.
static DISTRO_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pkg:generic/([^@]+)@([^?]+)").expect("distro pattern is a valid regex")
});

/// Extract `"<name>:<version>"` from a distro identifier.
///
/// Returns an empty string if the identifier does not look like
/// `pkg:generic/<name>@<version>`. Callers aggregate the empty identity like any other.
#[must_use]
pub fn extract_os(distro: &str) -> String {
    DISTRO_PATTERN
        .captures(distro)
        .map(|captures| format!("{}:{}", &captures[1], &captures[2]))
        .unwrap_or_default()
}

/// Extract the decoded `name@version` from a package URL.
///
/// Takes the last path segment, drops the query suffix and percent-decodes the rest.
/// Returns `None` if the segment is not validly percent-encoded.
#[must_use]
pub fn extract_package_name(purl: &str) -> Option<String> {
    let segment = purl.rsplit('/').next().unwrap_or(purl);
    let encoded = segment.split('?').next().unwrap_or(segment);
    percent_decode(encoded)
}

/// Strict percent-decoding: every `%` must be followed by two hex digits and
/// the decoded bytes must be UTF-8.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            decoded.push((hex_value(hex[0]) << 4) | hex_value(hex[1]));
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
