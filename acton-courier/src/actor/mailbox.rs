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

use crate::actor::ActorRef;
use crate::common::{CloseReceiver, MailboxReceiver};
use crate::message::Message;

/// The receiving side of an actor: a bounded data queue and a close queue.
///
/// A mailbox is consumed by exactly one [`ReceiveLoop`](crate::actor::ReceiveLoop).
/// Dropping it closes both queues.
#[derive(Debug)]
pub struct Mailbox {
    owner: ActorRef,
    pub(crate) data: MailboxReceiver,
    pub(crate) close: CloseReceiver,
}

impl Mailbox {
    /// Creates the queues for an actor named `name` whose data queue holds up to
    /// `capacity` messages (at least one). Returns the handle for senders together
    /// with the mailbox.
    ///
    /// The actor is not registered anywhere; use
    /// [`ActorRegistry::register`](crate::common::ActorRegistry::register) to make it
    /// resolvable by name.
    #[must_use]
    pub fn new(name: &str, capacity: usize) -> (ActorRef, Self) {
        let (outbox, data) = tokio::sync::mpsc::channel(capacity.max(1));
        let (close_tx, close) = tokio::sync::mpsc::channel(1);
        let owner = ActorRef::new(name, outbox, close_tx);
        (
            owner.clone(),
            Self { owner, data, close },
        )
    }

    /// The actor this mailbox belongs to.
    #[must_use]
    pub const fn owner(&self) -> &ActorRef {
        &self.owner
    }

    /// Takes the next queued message without waiting.
    pub fn try_recv(&mut self) -> Option<Message> {
        self.data.try_recv().ok()
    }

    pub(crate) fn close_queues(&mut self) {
        self.data.close();
        self.close.close();
    }
}
