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

use async_trait::async_trait;
use serde_json::Value;

/// Parameter mapping sent with a single RPC. Keys are wire parameter names.
pub type ParamMap = serde_json::Map<String, Value>;

/// The call capability the bindings are written against.
///
/// An implementation performs one request/response exchange with the RPC
/// server and reports failures with its own error type. The bindings never
/// inspect or wrap that error; it reaches the caller exactly as produced here.
#[async_trait]
pub trait RpcCall: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn call(&self, method: &str, params: ParamMap) -> Result<Value, Self::Error>;
}

#[async_trait]
impl<T> RpcCall for &T
where
    T: RpcCall + ?Sized,
{
    type Error = T::Error;

    async fn call(&self, method: &str, params: ParamMap) -> Result<Value, Self::Error> {
        (**self).call(method, params).await
    }
}

#[async_trait]
impl<T> RpcCall for std::sync::Arc<T>
where
    T: RpcCall + ?Sized,
{
    type Error = T::Error;

    async fn call(&self, method: &str, params: ParamMap) -> Result<Value, Self::Error> {
        (**self).call(method, params).await
    }
}
