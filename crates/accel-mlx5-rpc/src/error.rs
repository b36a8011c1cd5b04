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

use std::time::Duration;

use thiserror::Error;

// JsonRpcError is the error type of the JSON-RPC transport.
#[derive(Error, Debug)]
pub enum JsonRpcError {
    #[error("Could not connect to RPC server at {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    #[error("I/O error talking to RPC server: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out after {timeout:?} waiting for response to {method}")]
    Timeout { method: String, timeout: Duration },

    #[error("Could not serialize request for {method}: {source}")]
    Serialize {
        method: String,
        source: serde_json::Error,
    },

    #[error("Could not deserialize response. Body: {body}. {source}")]
    Deserialize {
        body: String,
        source: serde_json::Error,
    },

    #[error("RPC server returned error {code}: {message}")]
    Remote { code: i64, message: String },

    #[error("Response id {actual} does not match request id {expected}")]
    IdMismatch { expected: u64, actual: String },

    #[error("RPC server closed the connection before a full response arrived")]
    ConnectionClosed,

    #[error("Response carries neither a result nor an error")]
    MissingResult,
}

// JsonRpcResult is a result type alias for operations that
// can fail with JsonRpcError.
pub type JsonRpcResult<T> = Result<T, JsonRpcError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {path}: {error}")]
    CouldNotRead { path: String, error: std::io::Error },
    #[error("Invalid TOML in config file: {path}: {error}")]
    InvalidToml {
        path: String,
        error: toml::de::Error,
    },
}
