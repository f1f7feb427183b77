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
use std::sync::Arc;

use dashmap::DashMap;
use tracing::trace;

use crate::message::TransportError;
use crate::traits::Transport;

/// Maps actor names to the transport that reaches them.
///
/// The dispatcher looks up the receiver's name here before sending a remote
/// message, and a remote receive loop looks up its own actor's name before
/// waiting on the transport. A missing entry is a connection failure, reported
/// as [`TransportError::Unreachable`].
#[derive(Default)]
pub struct RemoteConnections {
    connections: DashMap<String, Arc<dyn Transport>>,
}

impl fmt::Debug for RemoteConnections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConnections")
            .field("connections", &self.connections.len())
            .finish()
    }
}

impl RemoteConnections {
    /// Creates an empty connection table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes messages for `actor_name` through `transport`, replacing any previous route.
    pub fn connect(&self, actor_name: impl Into<String>, transport: Arc<dyn Transport>) {
        let actor_name = actor_name.into();
        trace!("Connecting actor {} to transport {:?}", actor_name, transport);
        self.connections.insert(actor_name, transport);
    }

    /// Removes the route for `actor_name`.
    pub fn disconnect(&self, actor_name: &str) -> Option<Arc<dyn Transport>> {
        self.connections.remove(actor_name).map(|(_, transport)| transport)
    }

    /// Looks up the transport that reaches `actor_name`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Unreachable`] if no route exists.
    pub fn connection(&self, actor_name: &str) -> Result<Arc<dyn Transport>, TransportError> {
        self.connections
            .get(actor_name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TransportError::Unreachable(actor_name.to_string()))
    }

    /// Returns `true` if a route exists for `actor_name`.
    #[must_use]
    pub fn is_connected(&self, actor_name: &str) -> bool {
        self.connections.contains_key(actor_name)
    }
}
