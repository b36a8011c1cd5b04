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

// src/lib.rs
// Client bindings for the mlx5 accel module RPCs exposed by the storage
// target: mlx5_scan_accel_module and accel_mlx5_dump_stats.
pub mod api;
pub mod client;
pub mod config;
pub mod deprecation;
pub mod error;
pub mod jsonrpc;
pub mod params;
pub mod stats;

// Re-export main types for convenience
pub use api::{AccelMlx5Client, Method};
pub use client::{ParamMap, RpcCall};
pub use config::ClientConfig;
pub use deprecation::{
    DEPRECATED_PARAMS, DeprecatedParam, DeprecationNotice, Polarity, upgrade_legacy_params,
};
pub use error::{ConfigError, JsonRpcError, JsonRpcResult};
pub use jsonrpc::JsonRpcClient;
pub use params::{BuiltParams, ScanAccelModuleParams};
pub use stats::{DumpStatsParams, StatsLevel};
