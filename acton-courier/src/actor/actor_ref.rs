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
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;
use tracing::trace;

use crate::common::{CloseSender, MailboxSender};

/// A handle to an actor, identified by its unique name.
///
/// Cloning is cheap. Two references are equal when they name the same actor.
/// The handle owns the sending halves of the actor's data and close queues; the
/// receiving halves live in its [`Mailbox`](crate::actor::Mailbox).
#[derive(Clone)]
pub struct ActorRef {
    name: Arc<str>,
    outbox: MailboxSender,
    close: CloseSender,
}

impl ActorRef {
    pub(crate) fn new(name: &str, outbox: MailboxSender, close: CloseSender) -> Self {
        Self {
            name: Arc::from(name),
            outbox,
            close,
        }
    }

    /// The actor's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) const fn outbox(&self) -> &MailboxSender {
        &self.outbox
    }

    #[cfg(test)]
    pub(crate) const fn close_signal(&self) -> &CloseSender {
        &self.close
    }

    /// Returns `true` once the actor's mailbox has been closed or dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.outbox.is_closed() || self.close.is_closed()
    }

    /// Signals the actor to stop. Never blocks.
    ///
    /// The receive loop closes both queues when it sees the signal. Signalling an
    /// actor that is already closing, or already closed, has no further effect.
    pub fn close(&self) {
        match self.close.try_send(()) {
            Ok(()) => trace!(actor = %self.name, "Close signal sent"),
            Err(TrySendError::Full(())) => trace!(actor = %self.name, "Close already pending"),
            Err(TrySendError::Closed(())) => trace!(actor = %self.name, "Actor already closed"),
        }
    }
}

impl PartialEq for ActorRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ActorRef {}

impl Hash for ActorRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl fmt::Display for ActorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
