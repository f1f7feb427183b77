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

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use tokio::sync::{mpsc, Mutex};
use tracing::trace;

use crate::message::TransportError;
use crate::traits::Transport;

/// One bound destination: the sending half lives only here, so removing the
/// queue from the map ends every pending receive.
#[derive(Debug)]
struct Destination {
    sender: mpsc::UnboundedSender<Vec<u8>>,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<Vec<u8>>>>,
}

impl Destination {
    fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }
}

/// An in-memory [`Transport`] with one FIFO queue per destination address.
///
/// Useful when "remote" actors share a process (tests, single-node deployments)
/// but should still exercise the wire codec. A destination must be bound, either
/// explicitly or by a first [`receive`](Transport::receive), before anything can
/// be sent to it; sending to an unbound destination fails with
/// [`TransportError::Unreachable`]. A closed destination stays closed until it is
/// bound again.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    destinations: DashMap<String, Destination>,
    closed: DashSet<String>,
}

impl LoopbackTransport {
    /// Creates a transport with no bound destinations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `destination` so that it accepts messages. Binding twice is a no-op.
    /// Binding a closed destination reopens it.
    pub fn bind(&self, destination: impl Into<String>) {
        let destination = destination.into();
        trace!("Binding loopback destination {}", destination);
        self.closed.remove(&destination);
        self.destinations
            .entry(destination)
            .or_insert_with(Destination::new);
    }

    /// Unbinds `destination`. Queued messages are discarded, and pending or future
    /// sends and receives on it report [`TransportError::Closed`].
    pub fn close(&self, destination: &str) {
        self.closed.insert(destination.to_string());
        if self.destinations.remove(destination).is_some() {
            trace!("Closed loopback destination {}", destination);
        }
    }

    /// Returns `true` if `destination` is bound.
    #[must_use]
    pub fn is_bound(&self, destination: &str) -> bool {
        self.destinations.contains_key(destination)
    }
}

#[async_trait]
impl Transport for LoopbackTransport {
    async fn send(&self, destination: &str, payload: Vec<u8>) -> Result<(), TransportError> {
        if self.closed.contains(destination) {
            return Err(TransportError::Closed(destination.to_string()));
        }
        let sender = self
            .destinations
            .get(destination)
            .map(|entry| entry.sender.clone())
            .ok_or_else(|| TransportError::Unreachable(destination.to_string()))?;
        sender
            .send(payload)
            .map_err(|_| TransportError::Closed(destination.to_string()))
    }

    async fn receive(&self, destination: &str) -> Result<Vec<u8>, TransportError> {
        if self.closed.contains(destination) {
            return Err(TransportError::Closed(destination.to_string()));
        }
        let receiver = self
            .destinations
            .entry(destination.to_string())
            .or_insert_with(Destination::new)
            .receiver
            .clone();
        let mut receiver = receiver.lock().await;
        receiver
            .recv()
            .await
            .ok_or_else(|| TransportError::Closed(destination.to_string()))
    }
}
