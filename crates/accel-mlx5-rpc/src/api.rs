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

// src/api.rs
// AccelMlx5Client issues the mlx5 accel module RPCs over any RpcCall
// implementation.

use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::client::RpcCall;
use crate::deprecation;
use crate::params::ScanAccelModuleParams;
use crate::stats::DumpStatsParams;

// Method is the set of wire method names handled by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, EnumString)]
pub enum Method {
    #[strum(serialize = "mlx5_scan_accel_module")]
    ScanAccelModule,
    #[strum(serialize = "accel_mlx5_dump_stats")]
    DumpStats,
}

#[derive(Debug, Clone)]
pub struct AccelMlx5Client<C> {
    client: C,
}

impl<C> AccelMlx5Client<C>
where
    C: RpcCall,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    /// Enables the mlx5 accel module and has the target scan for mlx5 devices
    /// able to perform the requested operations.
    ///
    /// Deprecated inputs are logged at `warn` and otherwise accepted. Errors
    /// come straight from the underlying [`RpcCall`].
    pub async fn scan_accel_module(
        &self,
        params: &ScanAccelModuleParams,
    ) -> Result<Value, C::Error> {
        let method = Method::ScanAccelModule;
        let built = params.build();
        deprecation::emit(method.as_ref(), &built.notices);
        self.client.call(method.as_ref(), built.params).await
    }

    /// Dumps accel module statistics at the requested level.
    pub async fn dump_stats(&self, params: &DumpStatsParams) -> Result<Value, C::Error> {
        self.client
            .call(Method::DumpStats.as_ref(), params.build())
            .await
    }
}
