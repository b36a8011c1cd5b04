/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::client::ParamMap;

/// Granularity of the statistics returned by `accel_mlx5_dump_stats`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatsLevel {
    // Totals across all devices and channels.
    Total,
    // Per channel, each channel broken down by device.
    Channel,
    // Per device, aggregated across channels.
    Device,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DumpStatsParams {
    pub level: Option<StatsLevel>,
}

impl DumpStatsParams {
    pub fn with_level(level: StatsLevel) -> Self {
        Self { level: Some(level) }
    }

    pub fn build(&self) -> ParamMap {
        let mut params = ParamMap::new();
        if let Some(level) = self.level {
            params.insert("level".to_string(), Value::from(level.as_ref()));
        }
        params
    }
}
