//! Defines the traits for the collaborators the messaging core consumes.
//!
//! The core never owns a transport, an actor behavior or a tracing backend. It
//! talks to them through the narrow contracts defined here:
//!
//! *   [`Payload`]: Marker trait for any value that can travel as message data.
//! *   [`Invoker`]: The runtime's invocation entry point, called by the receive loop
//!     for every delivered message.
//! *   [`Transport`]: Moves encoded message bytes to and from a remote destination.
//! *   [`RoutingPolicy`]: The local-versus-remote decision for a dispatch or receive.
//! *   [`ActiveSpan`]: Extracts a tracing carrier from an in-process span.

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
pub use active_span::{ActiveSpan, SPAN_ID_KEY, SPAN_NAME_KEY};
pub use invoker::Invoker;
pub use payload::Payload;
pub use routing_policy::RoutingPolicy;
pub use transport::Transport;

// --- Submodules ---

/// Defines the [`ActiveSpan`] trait and its `tracing` adapter.
mod active_span;
/// Defines the [`Invoker`] trait.
mod invoker;
/// Defines the [`Payload`] marker trait.
mod payload;
/// Defines the [`RoutingPolicy`] trait.
mod routing_policy;
/// Defines the [`Transport`] trait.
mod transport;
