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
// Shared helpers for the integration tests: a recording RpcCall fake and a
// scripted JSON-RPC server on a Unix socket.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use accel_mlx5_rpc::{ParamMap, RpcCall};
use async_trait::async_trait;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::task::JoinHandle;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// CapturedLogs collects the output of a thread-local test subscriber.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    pub fn warnings(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock().unwrap())
            .lines()
            .filter(|line| line.contains("WARN"))
            .map(str::to_string)
            .collect()
    }
}

// capture_logs routes WARN and above on the current thread into the
// returned buffer until the guard is dropped.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FakeError {
    #[error("connection reset")]
    ConnectionReset,
    #[error("remote rejected {0}")]
    Rejected(String),
}

// RecordingClient records every call and answers with a canned outcome.
pub struct RecordingClient {
    pub calls: Mutex<Vec<(String, ParamMap)>>,
    outcome: Result<Value, FakeError>,
}

impl RecordingClient {
    pub fn ok(result: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Ok(result),
        }
    }

    pub fn failing(error: FakeError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Err(error),
        }
    }

    pub fn only_call(&self) -> (String, Value) {
        let calls = self.calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "expected exactly one call");
        (calls[0].0.clone(), Value::Object(calls[0].1.clone()))
    }
}

#[async_trait]
impl RpcCall for RecordingClient {
    type Error = FakeError;

    async fn call(&self, method: &str, params: ParamMap) -> Result<Value, Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        self.outcome.clone()
    }
}

// Reply is one scripted response: raw chunks written with a flush in
// between, after an optional delay.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    pub delay: Duration,
    pub chunks: Vec<String>,
}

impl Reply {
    pub fn new(chunks: Vec<String>) -> Self {
        Self {
            delay: Duration::ZERO,
            chunks,
        }
    }

    pub fn delayed(delay: Duration, body: &str) -> Self {
        Self {
            delay,
            chunks: vec![body.to_string()],
        }
    }
}

// MockServer accepts one connection per scripted session and answers each
// request on it with the session's next reply. Requests received over all
// sessions are returned from the join handle, in session order.
pub struct MockServer {
    pub path: PathBuf,
    _dir: tempfile::TempDir,
    handle: JoinHandle<Vec<Value>>,
}

impl MockServer {
    pub fn start(replies: Vec<Vec<String>>) -> Self {
        Self::start_sessions(vec![replies.into_iter().map(Reply::new).collect()])
    }

    pub fn start_sessions(sessions: Vec<Vec<Reply>>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rpc.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let handle = tokio::spawn(async move {
            let mut served = Vec::new();
            for replies in sessions {
                let (stream, _) = listener.accept().await.unwrap();
                served.push(tokio::spawn(serve(stream, replies)));
            }
            let mut received = Vec::new();
            for session in served {
                received.extend(session.await.unwrap());
            }
            received
        });
        Self {
            path,
            _dir: dir,
            handle,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn received(self) -> Vec<Value> {
        self.handle.await.unwrap()
    }
}

// serve stops quietly once the client goes away, including when a delayed
// reply is written to a connection the client already dropped.
async fn serve(mut stream: UnixStream, replies: Vec<Reply>) -> Vec<Value> {
    let mut received = Vec::new();
    for reply in replies {
        let Some(request) = read_request(&mut stream).await else {
            break;
        };
        received.push(request);
        tokio::time::sleep(reply.delay).await;
        for chunk in reply.chunks {
            if stream.write_all(chunk.as_bytes()).await.is_err()
                || stream.flush().await.is_err()
            {
                return received;
            }
            tokio::task::yield_now().await;
        }
    }
    received
}

async fn read_request(stream: &mut UnixStream) -> Option<Value> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        if let Some(Ok(value)) = serde_json::Deserializer::from_slice(&buf)
            .into_iter::<Value>()
            .next()
        {
            return Some(value);
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}
