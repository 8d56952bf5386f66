// Copyright (C) 2026 Checkmk GmbH - License: GNU General Public License v2
// This file is part of Checkmk (https://checkmk.com). It is subject to the terms and
// conditions defined in the file COPYING, which is part of this source code package.

//! Image layer inspection documents (`dive --json`).

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DiveJson {
    #[serde(rename = "layer", default)]
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
struct Layer {
    #[serde(rename = "sizeBytes", default)]
    size_bytes: u64,
}

impl DiveJson {
    /// Size of the first (base) layer, `0` if the image has no layers.
    pub(crate) fn base_size(&self) -> u64 {
        self.layers.first().map_or(0, |layer| layer.size_bytes)
    }
}
