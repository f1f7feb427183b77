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

//! Tests for remote routing over the in-memory loopback transport.

use std::time::Duration;

use acton_courier::prelude::*;
use serde_json::json;

use crate::setup::*;

mod setup;

struct Node {
    courier: Courier,
    transport: Arc<LoopbackTransport>,
}

fn node() -> Node {
    let courier = Courier::new();
    let transport = Arc::new(LoopbackTransport::new());
    transport.bind("node-b");
    Node { courier, transport }
}

#[tokio::test]
async fn test_remote_message_is_decoded_and_invoked() -> anyhow::Result<()> {
    initialize_tracing();
    let Node { courier, transport } = node();
    courier.connections().connect("bob", transport.clone());

    let (forwarder, mut received) = Forwarder::channel();
    let bob = courier.register("bob");
    let bob_ref = bob.owner().clone();
    let handle = courier.spawn(bob, forwarder, Options::remote("node-b"));
    let alice = courier.register("alice");

    let span: Arc<dyn ActiveSpan> = Arc::new(sample_carrier());
    courier
        .dispatcher()
        .dispatch(
            "greet",
            MessageData::new(7_u8),
            &bob_ref,
            alice.owner(),
            &Options::remote("node-b"),
            Some(span),
        )
        .await?;

    let message = next_message(&mut received).await?;
    assert_eq!(message.message_type, "greet");
    assert_eq!(message.sender.name(), "alice");
    assert_eq!(message.receiver, bob_ref);
    assert_eq!(message.data.as_value(), Some(&json!("7")));
    assert_eq!(message.carrier(), Some(&sample_carrier()));
    assert!(message.span().is_none());

    transport.close("node-b");
    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    Ok(())
}

#[tokio::test]
async fn test_remote_loop_skips_undecodable_payloads() -> anyhow::Result<()> {
    initialize_tracing();
    let Node { courier, transport } = node();
    courier.connections().connect("bob", transport.clone());

    let (forwarder, mut received) = Forwarder::channel();
    let bob = courier.register("bob");
    let handle = courier.spawn(bob, forwarder, Options::remote("node-b"));
    let _alice = courier.register("alice");

    transport.send("node-b", b"garbage".to_vec()).await?;
    transport
        .send("node-b", br#"{"messageType":"greet","sender":"nobody","self":"bob"}"#.to_vec())
        .await?;
    transport
        .send("node-b", br#"{"messageType":"greet","data":"hi","sender":"alice","self":"bob"}"#.to_vec())
        .await?;

    let message = next_message(&mut received).await?;
    assert_eq!(message.data.as_value(), Some(&json!("hi")));
    assert!(!handle.is_finished());

    courier.shutdown().await
}

#[tokio::test]
async fn test_poison_pill_ends_remote_loop() -> anyhow::Result<()> {
    initialize_tracing();
    let Node { courier, transport } = node();
    courier.connections().connect("bob", transport.clone());

    let recorder = Arc::new(Recorder::default());
    let bob = courier.register("bob");
    let bob_ref = bob.owner().clone();
    let handle = courier.spawn(
        bob,
        Arc::new(ControlInvoker::new(recorder.clone(), courier.dispatcher().clone())),
        Options::remote("node-b"),
    );
    let alice = courier.register("alice");

    courier
        .dispatcher()
        .dispatch(POISON_PILL, MessageData::Empty, &bob_ref, alice.owner(), &Options::remote("node-b"), None)
        .await?;

    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    assert!(bob_ref.is_closed());
    assert_eq!(recorder.seen(), vec![POISON_PILL.to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_remote_loop_without_connection_returns() -> anyhow::Result<()> {
    initialize_tracing();
    let courier = Courier::new();
    let bob = courier.register("bob");
    let bob_ref = bob.owner().clone();
    let handle = courier.spawn(bob, Arc::new(Recorder::default()), Options::remote("node-b"));

    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    assert!(bob_ref.is_closed());
    Ok(())
}
