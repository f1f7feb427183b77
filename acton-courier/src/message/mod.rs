//! Defines the message envelope, its wire codec, the reserved system message types
//! and the error taxonomy of the messaging core.
//!
//! # Key Components
//!
//! *   [`Message`]: The envelope exchanged between actors, local or remote.
//! *   [`MessageData`]: The payload of a message, typed locally and weakly typed
//!     once it has crossed a process boundary.
//! *   [`codec`]: JSON encoding and decoding of envelopes, resolving actor names
//!     through the [`ActorRegistry`](crate::common::ActorRegistry).
//! *   [`SystemMessage`]: The four reserved message types (poison pill, child closed,
//!     heartbeat request and reply).
//! *   Error types: [`EncodingError`], [`DecodingError`], [`UnknownActorError`],
//!     [`DispatchError`] and [`TransportError`].

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

// --- Public Re-exports ---
pub use envelope::{Message, MessageData};
pub use message_error::{
    DecodingError, DispatchError, EncodingError, TransportError, UnknownActorError,
};
pub use signal::{SystemMessage, CHILD_CLOSED, HEARTBEAT_REPLY, HEARTBEAT_REQUEST, POISON_PILL};

// --- Submodules ---

/// JSON wire codec for [`Message`].
pub mod codec;
/// Defines [`Message`] and [`MessageData`].
mod envelope;
/// Defines the error types.
mod message_error;
/// Defines [`SystemMessage`] and the reserved message type strings.
mod signal;
