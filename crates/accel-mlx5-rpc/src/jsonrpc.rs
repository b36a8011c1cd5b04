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

// src/jsonrpc.rs
// JsonRpcClient is an RpcCall implementation speaking JSON-RPC 2.0 to the
// storage target over a Unix domain socket or TCP.
//
// The server does not frame its responses; a response is complete once
// the bytes received so far hold one whole JSON value. Any exchange that
// does not end with the matching response (timeout, cancellation, id
// mismatch, unparsable bytes) leaves the stream out of sync, so the
// connection is marked stale and reopened before the next request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use backon::{ConstantBuilder, Retryable};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, UnixStream};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::client::{ParamMap, RpcCall};
use crate::config::ClientConfig;
use crate::error::{JsonRpcError, JsonRpcResult};

const CONNECT_RETRY_DELAY: Duration = Duration::from_millis(200);
const READ_CHUNK_SIZE: usize = 4096;

trait Io: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T> Io for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

#[derive(Serialize)]
struct Request<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<ParamMap>,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    id: Value,
    #[serde(default, deserialize_with = "present")]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RemoteError>,
}

#[derive(Deserialize)]
struct RemoteError {
    code: i64,
    #[serde(default)]
    message: String,
}

// present distinguishes `"result": null` from a missing result.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

struct Connection {
    stream: Box<dyn Io>,
    buf: Vec<u8>,
    // stale is set while a request is outstanding and cleared once its
    // response has been matched.
    stale: bool,
}

impl Connection {
    async fn exchange(&mut self, request: &[u8]) -> JsonRpcResult<Value> {
        self.stream.write_all(request).await?;
        self.stream.flush().await?;

        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            if let Some(value) = take_value(&mut self.buf)? {
                return Ok(value);
            }
            let n = self.stream.read(&mut chunk).await?;
            if n == 0 {
                return Err(JsonRpcError::ConnectionClosed);
            }
            self.buf.extend_from_slice(&chunk[..n]);
        }
    }
}

// take_value removes the first complete JSON value from buf. Returns None
// while the value is still incomplete.
fn take_value(buf: &mut Vec<u8>) -> JsonRpcResult<Option<Value>> {
    let (next, consumed) = {
        let mut values = serde_json::Deserializer::from_slice(&buf[..]).into_iter::<Value>();
        let next = values.next();
        (next, values.byte_offset())
    };
    match next {
        None => Ok(None),
        Some(Ok(value)) => {
            buf.drain(..consumed);
            Ok(Some(value))
        }
        Some(Err(e)) if e.is_eof() => Ok(None),
        Some(Err(e)) => Err(JsonRpcError::Deserialize {
            body: String::from_utf8_lossy(&buf[..]).to_string(),
            source: e,
        }),
    }
}

pub struct JsonRpcClient {
    addr: String,
    unix: bool,
    timeout: Duration,
    next_id: AtomicU64,
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonRpcClient")
            .field("addr", &self.addr)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl JsonRpcClient {
    /// Connects to the RPC server described by `config`, retrying a failed
    /// connect `config.conn_retries` times.
    pub async fn connect(config: &ClientConfig) -> JsonRpcResult<Self> {
        let addr = server_address(config);
        let unix = config.is_unix_socket();

        let stream = (|| open(&addr, unix))
            .retry(
                ConstantBuilder::default()
                    .with_delay(CONNECT_RETRY_DELAY)
                    .with_max_times(config.conn_retries),
            )
            .notify(|err: &std::io::Error, dur: Duration| {
                warn!(addr = %addr, error = %err, "Connect failed, retrying in {dur:?}");
            })
            .await
            .map_err(|source| JsonRpcError::Connect {
                addr: addr.clone(),
                source,
            })?;

        info!(addr = %addr, "Connected to RPC server");

        Ok(Self {
            addr,
            unix,
            timeout: config.timeout,
            next_id: AtomicU64::new(1),
            conn: Mutex::new(Connection {
                stream,
                buf: Vec::new(),
                stale: false,
            }),
        })
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    pub async fn call(&self, method: &str, params: ParamMap) -> JsonRpcResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = Request {
            jsonrpc: "2.0",
            method,
            id,
            params: (!params.is_empty()).then_some(params),
        };
        let body = serde_json::to_vec(&request).map_err(|source| JsonRpcError::Serialize {
            method: method.to_string(),
            source,
        })?;
        debug!(method, id, request = %String::from_utf8_lossy(&body), "RPC request");

        let mut conn = self.conn.lock().await;
        if conn.stale {
            self.reconnect(&mut conn).await?;
        }
        conn.stale = true;
        let raw = match tokio::time::timeout(self.timeout, conn.exchange(&body)).await {
            Ok(raw) => raw?,
            Err(_) => {
                return Err(JsonRpcError::Timeout {
                    method: method.to_string(),
                    timeout: self.timeout,
                });
            }
        };
        debug!(method, id, response = %raw, "RPC response");

        let response: Response =
            serde_json::from_value(raw.clone()).map_err(|source| JsonRpcError::Deserialize {
                body: raw.to_string(),
                source,
            })?;

        // An error answering a request the server could not parse carries a
        // null id; it still pairs with this request.
        let in_sync = response.id.as_u64() == Some(id)
            || (response.id.is_null() && response.error.is_some());
        if !in_sync {
            return Err(JsonRpcError::IdMismatch {
                expected: id,
                actual: response.id.to_string(),
            });
        }
        conn.stale = false;
        drop(conn);

        if let Some(error) = response.error {
            return Err(JsonRpcError::Remote {
                code: error.code,
                message: error.message,
            });
        }
        response.result.ok_or(JsonRpcError::MissingResult)
    }

    async fn reconnect(&self, conn: &mut Connection) -> JsonRpcResult<()> {
        warn!(addr = %self.addr, "Connection out of sync with RPC server, reconnecting");
        conn.stream = open(&self.addr, self.unix)
            .await
            .map_err(|source| JsonRpcError::Connect {
                addr: self.addr.clone(),
                source,
            })?;
        conn.buf.clear();
        conn.stale = false;
        Ok(())
    }
}

#[async_trait]
impl RpcCall for JsonRpcClient {
    type Error = JsonRpcError;

    async fn call(&self, method: &str, params: ParamMap) -> Result<Value, Self::Error> {
        JsonRpcClient::call(self, method, params).await
    }
}

fn server_address(config: &ClientConfig) -> String {
    if config.is_unix_socket() {
        config.server_addr.clone()
    } else if config.server_addr.contains(':') {
        format!("[{}]:{}", config.server_addr, config.port)
    } else {
        format!("{}:{}", config.server_addr, config.port)
    }
}

async fn open(addr: &str, unix: bool) -> std::io::Result<Box<dyn Io>> {
    if unix {
        Ok(Box::new(UnixStream::connect(addr).await?))
    } else {
        Ok(Box::new(TcpStream::connect(addr).await?))
    }
}
