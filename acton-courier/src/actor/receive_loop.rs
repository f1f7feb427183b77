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
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, instrument, trace, warn};

use crate::actor::{ActorRef, Mailbox};
use crate::common::{panic_message, ActorRegistry, RemoteConnections};
use crate::message::{codec, Message, TransportError};
use crate::traits::{Invoker, RoutingPolicy};

/// The message loop of a single actor.
///
/// With local routing the loop waits on the actor's data queue and its close queue
/// at the same time, with no priority between them, and hands every message to the
/// invoker. With remote routing it waits on the actor's transport instead and
/// decodes every payload against the registry. In both modes a close signal ends
/// the loop.
///
/// Errors returned by the invoker and panics raised inside it are logged; the loop
/// keeps going.
pub struct ReceiveLoop<I: ?Sized> {
    mailbox: Mailbox,
    invoker: Arc<I>,
    registry: Arc<ActorRegistry>,
    connections: Arc<RemoteConnections>,
}

impl<I: ?Sized> fmt::Debug for ReceiveLoop<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiveLoop")
            .field("actor", self.mailbox.owner())
            .finish_non_exhaustive()
    }
}

impl<I: Invoker + ?Sized> ReceiveLoop<I> {
    /// Prepares a loop for `mailbox`. Nothing runs until [`run`](ReceiveLoop::run).
    pub const fn new(
        mailbox: Mailbox,
        invoker: Arc<I>,
        registry: Arc<ActorRegistry>,
        connections: Arc<RemoteConnections>,
    ) -> Self {
        Self {
            mailbox,
            invoker,
            registry,
            connections,
        }
    }

    /// Runs the loop until the actor is closed.
    ///
    /// When the loop ends both queues of the mailbox are closed, so
    /// [`ActorRef::is_closed`] reports `true` and further local dispatches to the
    /// actor are dropped. Messages still queued at that point are abandoned.
    #[instrument(skip_all, fields(actor = %self.mailbox.owner(), remote = policy.is_remote()))]
    pub async fn run<P: RoutingPolicy + ?Sized>(self, policy: &P) {
        let Self {
            mut mailbox,
            invoker,
            registry,
            connections,
        } = self;
        let owner = mailbox.owner().clone();

        if policy.is_remote() {
            receive_remote(
                &mut mailbox,
                invoker.as_ref(),
                &registry,
                &connections,
                policy.destination(),
            )
            .await;
        } else {
            receive_local(&mut mailbox, invoker.as_ref()).await;
        }

        mailbox.close_queues();
        trace!(actor = %owner, "Receive loop finished");
    }
}

async fn receive_local<I: Invoker + ?Sized>(mailbox: &mut Mailbox, invoker: &I) {
    let owner = mailbox.owner().clone();
    loop {
        tokio::select! {
            message = mailbox.data.recv() => match message {
                Some(message) => invoke_isolated(invoker, &owner, message).await,
                None => break,
            },
            _ = mailbox.close.recv() => {
                trace!(actor = %owner, "Close signal received");
                break;
            }
        }
    }
}

async fn receive_remote<I: Invoker + ?Sized>(
    mailbox: &mut Mailbox,
    invoker: &I,
    registry: &ActorRegistry,
    connections: &RemoteConnections,
    destination: &str,
) {
    let owner = mailbox.owner().clone();
    let transport = match connections.connection(owner.name()) {
        Ok(transport) => transport,
        Err(err) => {
            error!(actor = %owner, error = %err, "No remote connection for actor");
            return;
        }
    };

    loop {
        let received = tokio::select! {
            received = transport.receive(destination) => received,
            _ = mailbox.close.recv() => {
                trace!(actor = %owner, "Close signal received");
                break;
            }
        };
        match received {
            Ok(bytes) => match codec::decode(&bytes, registry) {
                Ok(message) => invoke_isolated(invoker, &owner, message).await,
                Err(err) => warn!(actor = %owner, error = %err, "Discarding undecodable payload"),
            },
            Err(TransportError::Closed(destination)) => {
                trace!(actor = %owner, destination = %destination, "Transport destination closed");
                break;
            }
            Err(err) => {
                error!(actor = %owner, error = %err, "Transport receive failed");
                break;
            }
        }
    }
}

async fn invoke_isolated<I: Invoker + ?Sized>(invoker: &I, owner: &ActorRef, message: Message) {
    let message_type = message.message_type.clone();
    match AssertUnwindSafe(invoker.invoke(message)).catch_unwind().await {
        Ok(Ok(())) => trace!(actor = %owner, message_type = %message_type, "Message handled"),
        Ok(Err(err)) => {
            error!(actor = %owner, message_type = %message_type, error = ?err, "Message handler failed");
        }
        Err(payload) => {
            error!(
                actor = %owner,
                message_type = %message_type,
                panic = %panic_message(payload.as_ref()),
                "Message handler panicked"
            );
        }
    }
}
