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
use std::sync::Once;
use std::time::Duration;

use acton_courier::prelude::*;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// Ensures tracing initialization happens only once across all tests.
static INIT: Once = Once::new();

/// Initializes the global tracing subscriber for tests, writing to `logs/courier_tests.txt`.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        std::fs::create_dir_all("logs").expect("could not create logs dir");

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "courier_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // Leak the guard so the non-blocking writer is not dropped before process exit
        Box::leak(Box::new(guard));

        let filter = EnvFilter::new("trace")
            .add_directive("acton_courier::common::dispatcher=trace".parse().unwrap())
            .add_directive("acton_courier::actor::receive_loop=trace".parse().unwrap())
            .add_directive("acton_courier::message::codec=trace".parse().unwrap())
            .add_directive("tokio=info".parse().unwrap())
            .add_directive(tracing_subscriber::filter::LevelFilter::TRACE.into());

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .with_max_level(Level::TRACE)
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    });
}

/// Invoker that forwards every message into a channel the test can await.
#[derive(Debug)]
pub struct Forwarder {
    sender: mpsc::UnboundedSender<Message>,
}

impl Forwarder {
    /// Creates the invoker together with the receiving end of its channel.
    pub fn channel() -> (Arc<Self>, mpsc::UnboundedReceiver<Message>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }
}

#[async_trait]
impl Invoker for Forwarder {
    async fn invoke(&self, message: Message) -> anyhow::Result<()> {
        self.sender
            .send(message)
            .map_err(|_| anyhow::anyhow!("test receiver dropped"))
    }
}

/// Invoker that records the message types it sees.
#[derive(Debug, Default)]
pub struct Recorder {
    seen: Mutex<Vec<String>>,
}

impl Recorder {
    /// The message types recorded so far, in arrival order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl Invoker for Recorder {
    async fn invoke(&self, message: Message) -> anyhow::Result<()> {
        self.seen.lock().push(message.message_type);
        Ok(())
    }
}

/// Waits for the next forwarded message, failing the test after one second.
pub async fn next_message(receiver: &mut mpsc::UnboundedReceiver<Message>) -> anyhow::Result<Message> {
    tokio::time::timeout(Duration::from_secs(1), receiver.recv())
        .await?
        .ok_or_else(|| anyhow::anyhow!("forwarder closed"))
}

/// A carrier with one entry, for tests that follow a trace across a hop.
pub fn sample_carrier() -> TracingCarrier {
    let mut carrier = TracingCarrier::new();
    carrier.insert("trace_id".to_string(), "4bf92f3577b34da6".to_string());
    carrier
}
