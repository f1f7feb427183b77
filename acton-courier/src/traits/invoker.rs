/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::future::Future;

use async_trait::async_trait;

use crate::message::Message;

/// The runtime's central invocation entry point.
///
/// The receive loop calls [`invoke`](Invoker::invoke) for every message delivered to
/// an actor. Whatever happens inside (an error or a panic) is logged by the loop and
/// never terminates it.
///
/// Invokers are expected to honor the reserved [`SystemMessage`](crate::message::SystemMessage)
/// types; [`ControlInvoker`](crate::actor::ControlInvoker) implements that convention
/// around any other invoker.
///
/// Any `Fn(Message) -> impl Future<Output = anyhow::Result<()>>` closure is an invoker.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Applies the actor's behavior to `message`.
    ///
    /// # Errors
    ///
    /// Any error is logged by the receive loop and the message is considered handled.
    async fn invoke(&self, message: Message) -> anyhow::Result<()>;
}

#[async_trait]
impl<F, Fut> Invoker for F
where
    F: Fn(Message) -> Fut + Send + Sync,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    async fn invoke(&self, message: Message) -> anyhow::Result<()> {
        (self)(message).await
    }
}
