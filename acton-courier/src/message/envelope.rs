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

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use static_assertions::assert_impl_all;

use crate::actor::ActorRef;
use crate::common::TracingCarrier;
use crate::message::SystemMessage;
use crate::traits::{ActiveSpan, Payload};

/// The data carried by a [`Message`].
///
/// A payload is typed while it stays in the process that created it
/// ([`MessageData::Local`]). Encoding captures it by its string rendering, so after
/// a round trip through the wire codec it is always [`MessageData::Decoded`] and the
/// original type is gone: a payload of `42i32` comes back as the JSON string `"42"`.
/// Consumers of remote messages must treat the data as weakly typed.
#[derive(Clone, Debug, Default)]
pub enum MessageData {
    /// No payload.
    #[default]
    Empty,
    /// A typed payload created in this process.
    Local(Arc<dyn Payload>),
    /// The generic value produced by decoding a remote message.
    Decoded(Value),
}

impl MessageData {
    /// Wraps a typed payload.
    pub fn new(payload: impl Payload) -> Self {
        Self::Local(Arc::new(payload))
    }

    /// Downcasts a local payload to its concrete type.
    ///
    /// Always `None` for decoded data, even when the rendering looks like a `T`.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Local(payload) => (**payload).as_any().downcast_ref::<T>(),
            Self::Empty | Self::Decoded(_) => None,
        }
    }

    /// The decoded generic value, if this data arrived from the wire.
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Decoded(value) => Some(value),
            Self::Empty | Self::Local(_) => None,
        }
    }

    /// Returns `true` if there is no payload.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The string rendering written to the wire.
    ///
    /// Local payloads use their `Display` implementation. Decoded strings are passed
    /// through unquoted so a forwarded message does not gain a layer of quoting on
    /// every hop; other decoded values use their JSON text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Empty | Self::Decoded(Value::Null) => String::new(),
            Self::Local(payload) => payload.to_string(),
            Self::Decoded(Value::String(text)) => text.clone(),
            Self::Decoded(other) => other.to_string(),
        }
    }
}

/// The unit of communication between actors.
///
/// `sender` and `receiver` are shared [`ActorRef`]s; the message does not own the
/// actors it references. The receiver travels on the wire under the key `self`.
///
/// The tracing carrier is present only when a span was active at dispatch time.
/// The span handle itself never leaves the process: it is attached on local
/// delivery and is never produced by decoding.
#[derive(Clone)]
pub struct Message {
    /// A reserved [`SystemMessage`] type or an application-defined type.
    pub message_type: String,
    /// The payload.
    pub data: MessageData,
    /// The originating actor.
    pub sender: ActorRef,
    /// The target actor at the time of dispatch.
    pub receiver: ActorRef,
    pub(crate) carrier: Option<TracingCarrier>,
    pub(crate) span: Option<Arc<dyn ActiveSpan>>,
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("message_type", &self.message_type)
            .field("data", &self.data)
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("carrier", &self.carrier)
            .field("span", &self.span.is_some())
            .finish()
    }
}

impl Message {
    /// Creates a message without tracing context.
    pub fn new(
        message_type: impl Into<String>,
        data: MessageData,
        sender: ActorRef,
        receiver: ActorRef,
    ) -> Self {
        Self {
            message_type: message_type.into(),
            data,
            sender,
            receiver,
            carrier: None,
            span: None,
        }
    }

    /// Replaces the tracing carrier. `Some` of an empty map is kept as such and is
    /// encoded differently from `None`.
    #[must_use]
    pub fn with_carrier(mut self, carrier: Option<TracingCarrier>) -> Self {
        self.carrier = carrier;
        self
    }

    /// Attaches an in-process span handle.
    #[must_use]
    pub fn with_span(mut self, span: Option<Arc<dyn ActiveSpan>>) -> Self {
        self.span = span;
        self
    }

    /// The tracing carrier, if one was attached at dispatch time.
    #[must_use]
    pub const fn carrier(&self) -> Option<&TracingCarrier> {
        self.carrier.as_ref()
    }

    /// The in-process span handle. Always `None` for decoded messages.
    #[must_use]
    pub const fn span(&self) -> Option<&Arc<dyn ActiveSpan>> {
        self.span.as_ref()
    }

    /// The context to continue when dispatching onward from this message: the
    /// local span if there is one, otherwise the carrier that came with it.
    #[must_use]
    pub fn trace_context(&self) -> Option<Arc<dyn ActiveSpan>> {
        self.span.clone().or_else(|| {
            self.carrier
                .clone()
                .map(|carrier| Arc::new(carrier) as Arc<dyn ActiveSpan>)
        })
    }

    /// Classifies the message type as a reserved [`SystemMessage`].
    #[must_use]
    pub fn system_message(&self) -> Option<SystemMessage> {
        SystemMessage::from_type(&self.message_type)
    }
}

assert_impl_all!(Message: Send, Sync);
assert_impl_all!(MessageData: Send, Sync);
