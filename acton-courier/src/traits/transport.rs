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

use std::fmt::Debug;

use async_trait::async_trait;

use crate::message::TransportError;

/// Moves encoded messages between processes.
///
/// Framing, handshakes and retries are the transport's business. The dispatcher
/// calls [`send`](Transport::send) exactly once per remote message and drops the
/// message if it fails; the remote receive loop calls [`receive`](Transport::receive)
/// until it reports an error.
#[async_trait]
pub trait Transport: Debug + Send + Sync {
    /// Sends one encoded message to `destination`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the destination cannot be reached.
    async fn send(&self, destination: &str, payload: Vec<u8>) -> Result<(), TransportError>;

    /// Waits for the next encoded message addressed to `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] once the destination will never yield
    /// another message, or another [`TransportError`] on failure.
    async fn receive(&self, destination: &str) -> Result<Vec<u8>, TransportError>;
}
