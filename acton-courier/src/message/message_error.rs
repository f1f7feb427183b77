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

/// No actor is registered under the given name.
///
/// Returned by [`ActorRegistry::resolve`](crate::common::ActorRegistry::resolve) and
/// surfaced through decoding and local dispatch. A name is never replaced by a
/// placeholder reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownActorError(pub String);

impl UnknownActorError {
    /// The name that failed to resolve.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownActorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No actor registered under name: {}", self.0)
    }
}

impl std::error::Error for UnknownActorError {}

/// Errors raised while encoding a [`Message`](super::Message) for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// The named side of the envelope (`sender` or `self`) has no usable actor name.
    MissingActorName(&'static str),
    /// The JSON serializer failed.
    Serialization(String),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingActorName(field) => write!(f, "Actor name unavailable for field: {field}"),
            Self::Serialization(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for EncodingError {}

impl From<serde_json::Error> for EncodingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Errors raised while decoding wire bytes into a [`Message`](super::Message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    /// The bytes are not a well-formed JSON object.
    Malformed(String),
    /// A required key is absent.
    MissingField(&'static str),
    /// A key is present but holds a value of the wrong shape.
    InvalidField(&'static str),
    /// The `sender` or `self` name does not resolve to a registered actor.
    UnknownActor(UnknownActorError),
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(e) => write!(f, "Malformed message: {e}"),
            Self::MissingField(field) => write!(f, "Missing field: {field}"),
            Self::InvalidField(field) => write!(f, "Invalid value for field: {field}"),
            Self::UnknownActor(e) => write!(f, "Unresolved actor reference: {e}"),
        }
    }
}

impl std::error::Error for DecodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownActor(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<UnknownActorError> for DecodingError {
    fn from(err: UnknownActorError) -> Self {
        Self::UnknownActor(err)
    }
}

/// Errors a transport reports for a send or receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No connection exists for the actor or destination.
    Unreachable(String),
    /// The destination was closed and will not yield further messages.
    Closed(String),
    /// Socket or I/O failure.
    Io(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(target) => write!(f, "Unreachable: {target}"),
            Self::Closed(destination) => write!(f, "Destination closed: {destination}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<std::io::Error> for TransportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Errors returned by [`Dispatcher::dispatch`](crate::common::Dispatcher::dispatch).
///
/// The caller decides whether to retry. Faults that happen while delivering are
/// not represented here: they are logged and the message is lost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The envelope could not be encoded for a remote destination.
    EncodeFailed(EncodingError),
    /// No transport reaches the receiver, or the transport rejected the message.
    TransportUnavailable(String),
    /// The receiver or sender of a local message is not registered.
    UnknownActor(UnknownActorError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EncodeFailed(e) => write!(f, "Failed to encode message: {e}"),
            Self::TransportUnavailable(e) => write!(f, "Transport unavailable: {e}"),
            Self::UnknownActor(e) => write!(f, "Cannot deliver locally: {e}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EncodeFailed(e) => Some(e),
            Self::UnknownActor(e) => Some(e),
            Self::TransportUnavailable(_) => None,
        }
    }
}

impl From<EncodingError> for DispatchError {
    fn from(err: EncodingError) -> Self {
        Self::EncodeFailed(err)
    }
}

impl From<TransportError> for DispatchError {
    fn from(err: TransportError) -> Self {
        Self::TransportUnavailable(err.to_string())
    }
}

impl From<UnknownActorError> for DispatchError {
    fn from(err: UnknownActorError) -> Self {
        Self::UnknownActor(err)
    }
}
