//! Actor-side building blocks of the messaging core.
//!
//! # Key Components
//!
//! *   [`ActorRef`]: the cloneable, name-identified handle other actors send to.
//! *   [`Mailbox`]: the receiving side of an actor, a bounded data queue paired with
//!     a close queue.
//! *   [`Options`]: per-message routing, local or remote to a destination address.
//! *   [`ReceiveLoop`]: the task body that drains a mailbox (or a transport) into an
//!     [`Invoker`](crate::traits::Invoker).
//! *   [`ControlInvoker`]: an invoker wrapper that honors the reserved system messages.

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

pub use actor_ref::ActorRef;
pub use control_invoker::ControlInvoker;
pub use mailbox::Mailbox;
pub use options::Options;
pub use receive_loop::ReceiveLoop;

/// Contains the [`ActorRef`] handle.
mod actor_ref;

/// Contains the reserved-message handling invoker.
mod control_invoker;

/// Contains the receiving half of an actor.
mod mailbox;

/// Contains per-message routing options.
mod options;

/// Contains the per-actor receive loop.
mod receive_loop;
