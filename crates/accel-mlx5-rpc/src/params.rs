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

// src/params.rs
// ScanAccelModuleParams describes the optional inputs of
// mlx5_scan_accel_module and builds the wire parameter mapping from them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ParamMap;
use crate::deprecation::{self, DeprecatedParam, DeprecationNotice};

/// Inputs of `mlx5_scan_accel_module`.
///
/// Every field is optional. A field left as `None` is omitted from the
/// request entirely, so the server keeps its own default for it; a field set
/// to any value, including `0` or `false`, is always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanAccelModuleParams {
    // qp_size is the qpair size.
    pub qp_size: Option<u32>,
    // cq_size is the completion queue size.
    pub cq_size: Option<u32>,
    // num_requests is the size of the global request pool per device.
    pub num_requests: Option<u32>,
    // crypto_split_blocks is the number of data blocks processed per
    // crypto UMR. 0 means no limit.
    pub crypto_split_blocks: Option<u32>,
    // allowed_devs restricts the module to these device names. Sent as a
    // single comma separated string; a name containing a comma is not
    // escaped and reaches the server as several names.
    pub allowed_devs: Option<Vec<String>>,
    // merge is a deprecated alias of enable_driver.
    pub merge: Option<bool>,
    pub qp_per_domain: Option<bool>,
    pub enable_driver: Option<bool>,
    pub enable_module: Option<bool>,
    pub disable_signature: Option<bool>,
    pub disable_crypto: Option<bool>,
}

/// A parameter mapping together with the deprecation notices raised while
/// building it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltParams {
    pub params: ParamMap,
    pub notices: Vec<DeprecationNotice>,
}

macro_rules! with_setters {
    ($($(#[$meta:meta])* $fn_name:ident => $field:ident: $ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $fn_name(mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

impl ScanAccelModuleParams {
    pub fn new() -> Self {
        Self::default()
    }

    with_setters! {
        with_qp_size => qp_size: u32,
        with_cq_size => cq_size: u32,
        with_num_requests => num_requests: u32,
        with_crypto_split_blocks => crypto_split_blocks: u32,
        #[deprecated(note = "use with_enable_driver")]
        with_merge => merge: bool,
        with_qp_per_domain => qp_per_domain: bool,
        with_enable_driver => enable_driver: bool,
        with_enable_module => enable_module: bool,
        with_disable_signature => disable_signature: bool,
        with_disable_crypto => disable_crypto: bool,
    }

    /// Restricts the scan to the named devices.
    ///
    /// Names are joined with `,` on the wire without escaping, so a name
    /// must not itself contain a comma.
    pub fn with_allowed_devs<I, S>(mut self, devs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_devs = Some(devs.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the wire parameter mapping.
    ///
    /// Present fields are inserted in declaration order. `merge` is stored
    /// under `enable_driver` and raises a notice; when `enable_driver` is
    /// also given, its value wins. Nothing is logged here, see
    /// [`deprecation::emit`].
    pub fn build(&self) -> BuiltParams {
        let mut params = ParamMap::new();
        let mut notices = Vec::new();

        insert(&mut params, "qp_size", self.qp_size);
        insert(&mut params, "cq_size", self.cq_size);
        insert(&mut params, "num_requests", self.num_requests);
        insert(&mut params, "crypto_split_blocks", self.crypto_split_blocks);
        insert(
            &mut params,
            "allowed_devs",
            self.allowed_devs.as_ref().map(|devs| devs.join(",")),
        );
        if let Some(merge) = self.merge {
            let alias: &'static DeprecatedParam = &deprecation::MERGE;
            params.insert(alias.canonical.to_string(), Value::from(merge));
            notices.push(DeprecationNotice {
                param: alias,
                renamed: true,
            });
        }
        insert(&mut params, "qp_per_domain", self.qp_per_domain);
        insert(&mut params, "enable_driver", self.enable_driver);
        insert(&mut params, "enable_module", self.enable_module);
        insert(&mut params, "disable_signature", self.disable_signature);
        insert(&mut params, "disable_crypto", self.disable_crypto);

        BuiltParams { params, notices }
    }
}

fn insert<T: Into<Value>>(params: &mut ParamMap, key: &str, value: Option<T>) {
    if let Some(value) = value {
        params.insert(key.to_string(), value.into());
    }
}
