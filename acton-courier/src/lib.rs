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

#![forbid(unsafe_code)]
#![forbid(missing_docs)]

//! # Acton Courier
//!
//! The message-passing core of the Acton actor runtime. Actors are addressed by
//! unique names and exchange messages whose meaning is carried by a string
//! message type. Delivery is location transparent: a recipient in the same
//! process receives the message through its mailbox, a recipient in another
//! process receives it through a [`Transport`](crate::traits::Transport) as JSON.
//!
//! ## Key Concepts
//!
//! - **Messages (`Message`)**: the envelope carrying a message type, a payload,
//!   the sender and receiver references and an optional tracing carrier.
//! - **Codec (`codec`)**: the JSON wire format. Payloads are captured by their
//!   string rendering, so a decoded payload is always weakly typed.
//! - **Registry (`ActorRegistry`)**: resolves actor names to live references.
//! - **Dispatcher (`Dispatcher`)**: routes a message to a local mailbox or a
//!   remote transport and never lets a delivery fault escape.
//! - **Receive loop (`ReceiveLoop`)**: the per-actor task that multiplexes the
//!   mailbox against its close signal and hands messages to an [`Invoker`](crate::traits::Invoker).
//! - **System messages (`SystemMessage`)**: the reserved poison pill,
//!   child-closed and heartbeat message types.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use acton_courier::prelude::*;
//!
//! let courier = Courier::new();
//! let mailbox = courier.register("greeter");
//! let greeter = mailbox.owner().clone();
//! courier.spawn(mailbox, Arc::new(|message: Message| async move {
//!     println!("{} sent {}", message.sender, message.message_type);
//!     Ok(())
//! }), Options::local());
//! ```

/// Internal utilities and structures: configuration, registry, dispatcher and runtime.
pub(crate) mod common;

/// Actor references, mailboxes, routing options and the receive loop.
pub(crate) mod actor;

/// The message envelope, its codec, the reserved system messages and error types.
pub(crate) mod message;

/// Traits for the collaborators the core consumes.
pub mod traits;

/// The JSON wire codec for messages.
pub mod codec {
    pub use crate::message::codec::{
        decode, encode, DATA_KEY, MESSAGE_TYPE_KEY, SELF_KEY, SENDER_KEY, TRACING_KEY,
    };
}

/// A prelude module for conveniently importing the most commonly used items.
///
/// # Re-exports
///
/// *   [`crate::actor::ActorRef`], [`crate::actor::Mailbox`], [`crate::actor::Options`],
///     [`crate::actor::ReceiveLoop`], [`crate::actor::ControlInvoker`]
/// *   [`crate::common::Courier`], [`crate::common::ActorRegistry`], [`crate::common::Dispatcher`],
///     [`crate::common::RemoteConnections`], [`crate::common::LoopbackTransport`],
///     [`crate::common::CourierConfig`]
/// *   [`crate::message::Message`], [`crate::message::MessageData`], [`crate::message::SystemMessage`]
///     and the error types
/// *   the traits from [`crate::traits`]
pub mod prelude {
    pub use async_trait::async_trait;
    pub use std::sync::Arc;

    pub use crate::actor::{ActorRef, ControlInvoker, Mailbox, Options, ReceiveLoop};
    pub use crate::common::{
        ActorRegistry, Courier, CourierConfig, Dispatcher, LoopbackTransport, RemoteConnections,
        TracingCarrier, CONFIG,
    };
    pub use crate::message::{
        DecodingError, DispatchError, EncodingError, Message, MessageData, SystemMessage,
        TransportError, UnknownActorError, CHILD_CLOSED, HEARTBEAT_REPLY, HEARTBEAT_REQUEST,
        POISON_PILL,
    };
    pub use crate::traits::{ActiveSpan, Invoker, Payload, RoutingPolicy, Transport};
}
