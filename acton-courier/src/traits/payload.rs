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

use std::any::Any;
use std::fmt::{Debug, Display};

/// A marker trait for values that can be carried as the data of a [`Message`](crate::message::Message).
///
/// A payload keeps its concrete type only while it stays inside the process that
/// created it. When the message is encoded for a remote peer the payload is
/// captured by its [`Display`] rendering, which is why `Display` is required.
///
/// A blanket implementation is provided, so plain values such as `42`, `"hello"`
/// or any user type implementing `Display + Debug` qualify automatically.
pub trait Payload: Any + Send + Sync + Debug + Display {
    /// Returns a reference to the payload as a dynamic [`Any`] trait object.
    ///
    /// This allows downcasting back to the concrete type on the local delivery path.
    fn as_any(&self) -> &dyn Any;
}

impl<T> Payload for T
where
    T: Any + Send + Sync + Debug + Display,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }
}
