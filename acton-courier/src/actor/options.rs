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

use serde::{Deserialize, Serialize};

use crate::traits::RoutingPolicy;

/// Routing options for a dispatch or a receive loop.
///
/// Local routing delivers through mailboxes in this process. Remote routing
/// goes through the [`Transport`](crate::traits::Transport) connected for the
/// actor, addressed to `destination`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Whether messages cross a process boundary.
    pub remote: bool,
    /// Transport address used when `remote` is set.
    pub destination: String,
}

impl Options {
    /// Options for in-process delivery.
    #[must_use]
    pub fn local() -> Self {
        Self::default()
    }

    /// Options for delivery through a transport to `destination`.
    #[must_use]
    pub fn remote(destination: impl Into<String>) -> Self {
        Self {
            remote: true,
            destination: destination.into(),
        }
    }
}

impl RoutingPolicy for Options {
    fn is_remote(&self) -> bool {
        self.remote
    }

    fn destination(&self) -> &str {
        &self.destination
    }
}
