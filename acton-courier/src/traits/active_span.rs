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

use crate::common::TracingCarrier;

/// Carrier key holding the numeric id of the injected span.
pub const SPAN_ID_KEY: &str = "span_id";
/// Carrier key holding the name of the injected span.
pub const SPAN_NAME_KEY: &str = "span_name";

/// An in-process trace span that can be continued on the receiving side.
///
/// The dispatcher calls [`inject`](ActiveSpan::inject) once per message and attaches
/// the returned carrier to the envelope. `None` means there is nothing to continue
/// and the envelope is sent without a `tracing` entry.
pub trait ActiveSpan: Debug + Send + Sync {
    /// Extracts the flat key-value context describing this span.
    fn inject(&self) -> Option<TracingCarrier>;
}

/// Continues a `tracing` span. Disabled spans (no subscriber, or filtered out)
/// have no id and produce no carrier.
impl ActiveSpan for tracing::Span {
    fn inject(&self) -> Option<TracingCarrier> {
        let id = self.id()?;
        let mut carrier = TracingCarrier::new();
        carrier.insert(SPAN_ID_KEY.to_string(), id.into_u64().to_string());
        if let Some(metadata) = self.metadata() {
            carrier.insert(SPAN_NAME_KEY.to_string(), metadata.name().to_string());
        }
        Some(carrier)
    }
}

/// A carrier decoded from an inbound message continues the trace as-is.
impl ActiveSpan for TracingCarrier {
    fn inject(&self) -> Option<TracingCarrier> {
        Some(self.clone())
    }
}
