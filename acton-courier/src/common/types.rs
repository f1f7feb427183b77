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

//! Defines common type aliases used throughout `acton-courier`.

use std::collections::HashMap;

use tokio::sync::mpsc::{Receiver, Sender};

use crate::message::Message;

/// Flat string-to-string context continuing a distributed trace across processes.
pub type TracingCarrier = HashMap<String, String>;

/// Sending half of an actor's data queue.
pub type MailboxSender = Sender<Message>;

/// Receiving half of an actor's data queue.
pub type MailboxReceiver = Receiver<Message>;

/// Sending half of an actor's close queue. Carries no payload.
pub type CloseSender = Sender<()>;

/// Receiving half of an actor's close queue.
pub type CloseReceiver = Receiver<()>;
