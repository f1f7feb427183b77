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

use std::fmt;
use std::panic::{resume_unwind, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tracing::trace;

use crate::actor::Options;
use crate::common::Dispatcher;
use crate::message::{Message, MessageData, SystemMessage, HEARTBEAT_REPLY};
use crate::traits::Invoker;

/// Wraps an [`Invoker`] and applies the effects of the reserved system messages.
///
/// | Message type        | Effect                                                   |
/// |---------------------|----------------------------------------------------------|
/// | `poison-pill`       | passed to the inner invoker, then the receiver is closed |
/// | `child-closed`      | passed to the inner invoker                              |
/// | `heartbeat-request` | a `heartbeat-reply` is dispatched back to the sender     |
/// | `heartbeat-reply`   | passed to the inner invoker                              |
///
/// All other message types go straight to the inner invoker.
pub struct ControlInvoker<I: ?Sized> {
    dispatcher: Dispatcher,
    reply_options: Options,
    inner: Arc<I>,
}

impl<I: ?Sized> fmt::Debug for ControlInvoker<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlInvoker")
            .field("reply_options", &self.reply_options)
            .finish_non_exhaustive()
    }
}

impl<I: Invoker + ?Sized> ControlInvoker<I> {
    /// Wraps `inner`. Heartbeat replies are sent through `dispatcher` with local routing.
    ///
    /// A heartbeat request that arrived over a transport names a sender with no
    /// local mailbox, so a locally routed reply to it is dropped as undeliverable.
    /// Actors answering remote peers need [`with_reply_options`](Self::with_reply_options)
    /// with a remote destination.
    #[must_use]
    pub fn new(inner: Arc<I>, dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            reply_options: Options::local(),
            inner,
        }
    }

    /// Sets the routing used for heartbeat replies.
    #[must_use]
    pub fn with_reply_options(mut self, options: Options) -> Self {
        self.reply_options = options;
        self
    }
}

#[async_trait]
impl<I: Invoker + ?Sized> Invoker for ControlInvoker<I> {
    async fn invoke(&self, message: Message) -> anyhow::Result<()> {
        match message.system_message() {
            Some(SystemMessage::PoisonPill) => {
                let receiver = message.receiver.clone();
                let outcome = AssertUnwindSafe(self.inner.invoke(message))
                    .catch_unwind()
                    .await;
                trace!(actor = %receiver, "Poison pill received, closing");
                // The actor closes even when its own handling of the pill fails.
                receiver.close();
                outcome.unwrap_or_else(|payload| resume_unwind(payload))
            }
            Some(SystemMessage::HeartbeatRequest) => {
                trace!(actor = %message.receiver, requester = %message.sender, "Answering heartbeat");
                self.dispatcher
                    .dispatch(
                        HEARTBEAT_REPLY,
                        MessageData::Empty,
                        &message.sender,
                        &message.receiver,
                        &self.reply_options,
                        message.trace_context(),
                    )
                    .await?;
                Ok(())
            }
            _ => self.inner.invoke(message).await,
        }
    }
}
