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

/// The local-versus-remote decision for a single dispatch or receive call.
///
/// The policy is supplied by the caller; the core never stores it.
pub trait RoutingPolicy: Send + Sync {
    /// Returns `true` when the message should travel through a transport.
    fn is_remote(&self) -> bool;

    /// The destination address handed to the transport. Only meaningful when
    /// [`is_remote`](RoutingPolicy::is_remote) returns `true`.
    fn destination(&self) -> &str;
}
