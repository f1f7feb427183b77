//! Shared runtime pieces of the messaging core.
//!
//! # Key Re-exported Components:
//!
//! *   [`Courier`]: owns a registry, a connection table and the spawned receive loops.
//! *   [`Dispatcher`]: delivers messages locally or through a transport.
//! *   [`ActorRegistry`]: resolves actor names to live references.
//! *   [`RemoteConnections`] and [`LoopbackTransport`]: the remote side of routing.
//! *   [`CourierConfig`] and the global [`CONFIG`].

//! Provides the runtime-side building blocks of the messaging core.
//!
//! # Key Re-exported Components:
//!
//! *   [`ActorRegistry`]: Process-wide mapping from actor names to live references.
//! *   [`Dispatcher`]: Routes a message to a local mailbox or a remote transport.
//! *   [`RemoteConnections`]: Maps actor names to the transport that reaches them.
//! *   [`LoopbackTransport`]: In-memory [`Transport`](crate::traits::Transport) with
//!     one queue per destination.
//! *   [`Courier`]: Owns all of the above and the spawned receive loops.
//! *   [`CourierConfig`]: Configuration loaded from XDG-compliant locations.

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
pub use config::{CourierConfig, LimitsConfig, TimeoutConfig, CONFIG};
pub use connections::RemoteConnections;
pub use courier::Courier;
pub use dispatcher::Dispatcher;
pub use loopback::LoopbackTransport;
pub use registry::ActorRegistry;
pub use types::*;

// --- Crate-Internal Re-exports ---
pub(crate) use fault::panic_message;

// --- Submodules ---

/// Defines common type aliases.
mod types;

/// Defines the configuration system.
pub mod config;
/// Defines [`RemoteConnections`].
mod connections;
/// Defines the [`Courier`] runtime facade.
mod courier;
/// Defines the [`Dispatcher`].
mod dispatcher;
/// Helpers for contained faults.
mod fault;
/// Defines [`LoopbackTransport`].
mod loopback;
/// Defines [`ActorRegistry`].
mod registry;
