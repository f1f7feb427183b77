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

//! JSON wire codec for [`Message`].
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "messageType": "greet",
//!   "data": "42",
//!   "sender": "alice",
//!   "self": "bob",
//!   "tracing": { "span_id": "7", "span_name": "checkout" }
//! }
//! ```
//!
//! `data` is always written as the string rendering of the payload, never as a
//! structural encoding, and `tracing` is written only when the message carries a
//! carrier. Remote peers depend on exactly this shape.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{error, trace};

use crate::common::{ActorRegistry, TracingCarrier};
use crate::message::{DecodingError, EncodingError, Message, MessageData};

/// Key of the message type.
pub const MESSAGE_TYPE_KEY: &str = "messageType";
/// Key of the rendered payload.
pub const DATA_KEY: &str = "data";
/// Key of the sender's actor name.
pub const SENDER_KEY: &str = "sender";
/// Key of the receiver's actor name.
pub const SELF_KEY: &str = "self";
/// Key of the optional tracing carrier.
pub const TRACING_KEY: &str = "tracing";

#[derive(Serialize)]
struct WireMessage<'a> {
    #[serde(rename = "messageType")]
    message_type: &'a str,
    data: String,
    sender: &'a str,
    #[serde(rename = "self")]
    receiver: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tracing: Option<&'a TracingCarrier>,
}

/// Encodes a message into its JSON wire form.
///
/// # Errors
///
/// * [`EncodingError::MissingActorName`] - If the sender or receiver has an empty name.
/// * [`EncodingError::Serialization`] - If the JSON serializer fails.
pub fn encode(message: &Message) -> Result<Vec<u8>, EncodingError> {
    let sender = message.sender.name();
    if sender.is_empty() {
        return Err(EncodingError::MissingActorName(SENDER_KEY));
    }
    let receiver = message.receiver.name();
    if receiver.is_empty() {
        return Err(EncodingError::MissingActorName(SELF_KEY));
    }

    let wire = WireMessage {
        message_type: &message.message_type,
        data: message.data.render(),
        sender,
        receiver,
        tracing: message.carrier.as_ref(),
    };
    let bytes = serde_json::to_vec(&wire).map_err(|e| {
        error!("JSON marshalling error: {}", e);
        EncodingError::from(e)
    })?;
    trace!(message_type = %message.message_type, len = bytes.len(), "Encoded message");
    Ok(bytes)
}

/// Decodes wire bytes into a message, resolving `sender` and `self` through `registry`.
///
/// `data` becomes whatever JSON value the field holds ([`Value::Null`] when the key is
/// absent) and is never converted back to a concrete type. A missing or `null`
/// `tracing` key yields no carrier. The span handle is never populated.
///
/// # Errors
///
/// * [`DecodingError::Malformed`] - If the bytes are not a JSON object.
/// * [`DecodingError::MissingField`] - If `messageType`, `sender` or `self` is absent.
/// * [`DecodingError::InvalidField`] - If a field has the wrong shape, including a
///   non-string value inside `tracing`.
/// * [`DecodingError::UnknownActor`] - If `sender` or `self` is not registered.
pub fn decode(bytes: &[u8], registry: &ActorRegistry) -> Result<Message, DecodingError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| {
        error!("Unmarshalling error: {}", e);
        DecodingError::from(e)
    })?;
    let Value::Object(mut object) = value else {
        return Err(DecodingError::Malformed(
            "expected a JSON object".to_string(),
        ));
    };

    let message_type = take_string(&mut object, MESSAGE_TYPE_KEY)?;
    let data = MessageData::Decoded(object.remove(DATA_KEY).unwrap_or(Value::Null));
    let receiver = registry.resolve(&take_string(&mut object, SELF_KEY)?)?;
    let sender = registry.resolve(&take_string(&mut object, SENDER_KEY)?)?;
    let carrier = take_carrier(&mut object)?;

    trace!(%message_type, %sender, %receiver, "Decoded message");
    Ok(Message::new(message_type, data, sender, receiver).with_carrier(carrier))
}

fn take_string(object: &mut Map<String, Value>, key: &'static str) -> Result<String, DecodingError> {
    match object.remove(key) {
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(DecodingError::InvalidField(key)),
        None => Err(DecodingError::MissingField(key)),
    }
}

fn take_carrier(object: &mut Map<String, Value>) -> Result<Option<TracingCarrier>, DecodingError> {
    match object.remove(TRACING_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(entries)) => entries
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(text) => Ok((key, text)),
                _ => Err(DecodingError::InvalidField(TRACING_KEY)),
            })
            .collect::<Result<TracingCarrier, _>>()
            .map(Some),
        Some(_) => Err(DecodingError::InvalidField(TRACING_KEY)),
    }
}
