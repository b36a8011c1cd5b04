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

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const DEFAULT_SERVER_ADDR: &str = "/var/tmp/spdk.sock";
const DEFAULT_PORT: u16 = 5260;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for [`crate::JsonRpcClient`].
///
/// `server_addr` is either a Unix socket path or a host name / IP address.
/// `port` is only used in the latter case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "Defaults::server_addr")]
    pub server_addr: String,
    #[serde(default = "Defaults::port")]
    pub port: u16,
    #[serde(default = "Defaults::timeout", with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(default)]
    pub conn_retries: usize,
}

pub struct Defaults;

impl Defaults {
    pub fn server_addr() -> String {
        DEFAULT_SERVER_ADDR.to_string()
    }
    pub fn port() -> u16 {
        DEFAULT_PORT
    }
    pub fn timeout() -> Duration {
        DEFAULT_TIMEOUT
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: Defaults::server_addr(),
            port: Defaults::port(),
            timeout: Defaults::timeout(),
            conn_retries: 0,
        }
    }
}

impl ClientConfig {
    pub fn new(server_addr: impl Into<String>) -> Self {
        Self {
            server_addr: server_addr.into(),
            ..Default::default()
        }
    }

    // is_unix_socket reports whether server_addr names a filesystem path
    // rather than a network host.
    pub fn is_unix_socket(&self) -> bool {
        self.server_addr.starts_with('/') || self.server_addr.starts_with('.')
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let cfg = std::fs::read_to_string(path).map_err(|error| ConfigError::CouldNotRead {
            path: path.to_string_lossy().to_string(),
            error,
        })?;
        Self::from_toml(&cfg).map_err(|error| ConfigError::InvalidToml {
            path: path.to_string_lossy().to_string(),
            error,
        })
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<Self>(toml_str)
    }
}
