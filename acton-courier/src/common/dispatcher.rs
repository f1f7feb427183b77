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

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, instrument, trace};

use crate::actor::ActorRef;
use crate::common::{panic_message, ActorRegistry, RemoteConnections};
use crate::message::{codec, DispatchError, Message, MessageData};
use crate::traits::{ActiveSpan, RoutingPolicy};

/// Delivers messages to local mailboxes or remote transports.
///
/// The dispatcher is cheap to clone and safe to share between tasks. It holds the
/// registry used to resolve local recipients and the connection table used to
/// reach remote ones. Faults during delivery, including panics, never escape
/// [`dispatch`](Dispatcher::dispatch): they are logged and the message is lost.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ActorRegistry>,
    connections: Arc<RemoteConnections>,
}

impl Dispatcher {
    /// Creates a dispatcher over a registry and a connection table.
    #[must_use]
    pub const fn new(registry: Arc<ActorRegistry>, connections: Arc<RemoteConnections>) -> Self {
        Self {
            registry,
            connections,
        }
    }

    /// The registry used to resolve local recipients.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ActorRegistry> {
        &self.registry
    }

    /// The table of remote connections.
    #[must_use]
    pub const fn connections(&self) -> &Arc<RemoteConnections> {
        &self.connections
    }

    /// Sends a message of `message_type` carrying `data` from `sender` to `receiver`.
    ///
    /// If `span` yields a tracing carrier it travels with the message. Locally
    /// routed messages also keep the span handle itself.
    ///
    /// Local delivery waits for space when the receiver's mailbox is full. Remote
    /// delivery encodes the message and hands it to the transport registered for
    /// the receiver, addressed to [`RoutingPolicy::destination`].
    ///
    /// # Errors
    ///
    /// * [`DispatchError::UnknownActor`] if a locally routed message names an
    ///   unregistered sender or receiver.
    /// * [`DispatchError::TransportUnavailable`] if no connection exists for a remote
    ///   receiver or the transport rejects the payload.
    /// * [`DispatchError::EncodeFailed`] if the message cannot be encoded.
    ///
    /// A receiver whose mailbox is already closed, or a panic anywhere during
    /// delivery, is logged and reported as `Ok(())`.
    pub async fn dispatch<P: RoutingPolicy + ?Sized>(
        &self,
        message_type: impl Into<String>,
        data: MessageData,
        receiver: &ActorRef,
        sender: &ActorRef,
        policy: &P,
        span: Option<Arc<dyn ActiveSpan>>,
    ) -> Result<(), DispatchError> {
        self.dispatch_isolated(message_type.into(), data, receiver, sender, policy, span)
            .await
    }

    #[instrument(
        name = "dispatch",
        skip(self, data, receiver, sender, policy, span),
        fields(sender = %sender, receiver = %receiver, remote = policy.is_remote())
    )]
    async fn dispatch_isolated<P: RoutingPolicy + ?Sized>(
        &self,
        message_type: String,
        data: MessageData,
        receiver: &ActorRef,
        sender: &ActorRef,
        policy: &P,
        span: Option<Arc<dyn ActiveSpan>>,
    ) -> Result<(), DispatchError> {
        info!(message_type = %message_type, "Dispatching message");
        let delivery = AssertUnwindSafe(self.deliver(
            message_type.clone(),
            data,
            receiver,
            sender,
            policy,
            span,
        ))
        .catch_unwind()
        .await;

        match delivery {
            Ok(Ok(())) => {
                info!(message_type = %message_type, "Message dispatched");
                Ok(())
            }
            Ok(Err(err)) => {
                error!(message_type = %message_type, error = %err, "Dispatch failed");
                Err(err)
            }
            Err(payload) => {
                error!(
                    message_type = %message_type,
                    panic = %panic_message(payload.as_ref()),
                    "Dispatch panicked, message dropped"
                );
                Ok(())
            }
        }
    }

    async fn deliver<P: RoutingPolicy + ?Sized>(
        &self,
        message_type: String,
        data: MessageData,
        receiver: &ActorRef,
        sender: &ActorRef,
        policy: &P,
        span: Option<Arc<dyn ActiveSpan>>,
    ) -> Result<(), DispatchError> {
        let carrier = span.as_ref().and_then(|span| span.inject());

        if policy.is_remote() {
            let transport = self.connections.connection(receiver.name())?;
            let message = Message::new(message_type, data, sender.clone(), receiver.clone())
                .with_carrier(carrier);
            let bytes = codec::encode(&message)?;
            trace!(
                destination = policy.destination(),
                bytes = bytes.len(),
                "Sending encoded message"
            );
            transport.send(policy.destination(), bytes).await?;
            return Ok(());
        }

        let target = self.registry.resolve(receiver.name())?;
        let sender = self.registry.resolve(sender.name())?;
        let message = Message::new(message_type, data, sender, target.clone())
            .with_carrier(carrier)
            .with_span(span);

        // A closed mailbox means the receiver already terminated.
        if target.outbox().send(message).await.is_err() {
            error!(recipient = %target, "Recipient mailbox is closed, message dropped");
        }
        Ok(())
    }
}
