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

/// Message type of a graceful self-termination request.
pub const POISON_PILL: &str = "poison-pill";
/// Message type notifying a supervisor that one of its children terminated.
pub const CHILD_CLOSED: &str = "child-closed";
/// Message type of a liveness probe.
pub const HEARTBEAT_REQUEST: &str = "heartbeat-request";
/// Message type acknowledging a liveness probe.
pub const HEARTBEAT_REPLY: &str = "heartbeat-reply";

/// The reserved message types with a fixed meaning across all actors.
///
/// These travel through the same dispatch and receive path as application
/// messages; only the message type string distinguishes them. Application code
/// must not reuse these strings. Nothing enforces that beyond
/// [`SystemMessage::is_reserved`].
///
/// | Variant | Expected effect |
/// |---|---|
/// | `PoisonPill` | the receiving actor signals its own close queue after processing |
/// | `ChildClosed` | the supervising actor updates its bookkeeping, no reply |
/// | `HeartbeatRequest` | the receiver replies with `HeartbeatReply` to the sender |
/// | `HeartbeatReply` | the requester updates its liveness state |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemMessage {
    /// Graceful self-termination request.
    PoisonPill,
    /// A subordinate actor terminated.
    ChildClosed,
    /// Liveness probe.
    HeartbeatRequest,
    /// Liveness acknowledgment.
    HeartbeatReply,
}

impl SystemMessage {
    /// Every reserved message, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::PoisonPill,
        Self::ChildClosed,
        Self::HeartbeatRequest,
        Self::HeartbeatReply,
    ];

    /// Classifies a message type string, returning `None` for application types.
    #[must_use]
    pub fn from_type(message_type: &str) -> Option<Self> {
        match message_type {
            POISON_PILL => Some(Self::PoisonPill),
            CHILD_CLOSED => Some(Self::ChildClosed),
            HEARTBEAT_REQUEST => Some(Self::HeartbeatRequest),
            HEARTBEAT_REPLY => Some(Self::HeartbeatReply),
            _ => None,
        }
    }

    /// The wire value of this message type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PoisonPill => POISON_PILL,
            Self::ChildClosed => CHILD_CLOSED,
            Self::HeartbeatRequest => HEARTBEAT_REQUEST,
            Self::HeartbeatReply => HEARTBEAT_REPLY,
        }
    }

    /// Returns `true` if `message_type` collides with a reserved type.
    #[must_use]
    pub fn is_reserved(message_type: &str) -> bool {
        Self::from_type(message_type).is_some()
    }
}

impl fmt::Display for SystemMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
