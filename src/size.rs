// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Converts byte counts into human-readable strings using binary (1024) units.

use thiserror::Error;

const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Errors that can occur when formatting a size.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SizeError {
    #[error("Invalid size: {bytes} (sizes must not be negative)")]
    InvalidInput { bytes: i64 },
}

/// Format a byte count, e.g. `1536` becomes `"1.50KB"`.
///
/// # Errors
/// Returns `SizeError::InvalidInput` if `bytes` is negative.
pub fn format_size(bytes: i64) -> Result<String, SizeError> {
    u64::try_from(bytes)
        .map(format_bytes)
        .map_err(|_| SizeError::InvalidInput { bytes })
}

/// Format an unsigned byte count. See [`format_size`].
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0B".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2}{}", UNITS[unit])
}
