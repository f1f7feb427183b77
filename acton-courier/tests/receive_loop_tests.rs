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

//! Tests for the local receive loop: close handling and fault isolation.

use std::time::Duration;

use acton_courier::prelude::*;
use tokio::sync::mpsc;

use crate::setup::*;

mod setup;

fn start_loop<I: Invoker + ?Sized + 'static>(
    courier: &Courier,
    name: &str,
    invoker: Arc<I>,
) -> (ActorRef, tokio::task::JoinHandle<()>) {
    let mailbox = courier.register(name);
    let actor = mailbox.owner().clone();
    (actor, courier.spawn(mailbox, invoker, Options::local()))
}

#[tokio::test]
async fn test_close_signal_ends_loop_promptly() -> anyhow::Result<()> {
    initialize_tracing();
    let courier = Courier::new();
    let (bob, handle) = start_loop(&courier, "bob", Arc::new(Recorder::default()));

    assert!(!bob.is_closed());
    bob.close();
    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    assert!(bob.is_closed());
    Ok(())
}

#[tokio::test]
async fn test_dispatch_after_close_is_dropped() -> anyhow::Result<()> {
    initialize_tracing();
    let courier = Courier::new();
    let recorder = Arc::new(Recorder::default());
    let (bob, handle) = start_loop(&courier, "bob", recorder.clone());
    let alice = courier.register("alice");

    bob.close();
    tokio::time::timeout(Duration::from_secs(1), handle).await??;

    courier
        .dispatcher()
        .dispatch("late", MessageData::Empty, &bob, alice.owner(), &Options::local(), None)
        .await?;
    assert!(recorder.seen().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_message_racing_close_does_not_stall_loop() -> anyhow::Result<()> {
    initialize_tracing();
    let courier = Courier::new();
    let recorder = Arc::new(Recorder::default());
    let (bob, handle) = start_loop(&courier, "bob", recorder.clone());
    let alice = courier.register("alice");

    courier
        .dispatcher()
        .dispatch("racing", MessageData::Empty, &bob, alice.owner(), &Options::local(), None)
        .await?;
    bob.close();

    // Either branch may win; the message is delivered at most once.
    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    assert!(recorder.seen().len() <= 1);
    Ok(())
}

#[tokio::test]
async fn test_faulty_invocations_do_not_stop_the_loop() -> anyhow::Result<()> {
    initialize_tracing();
    let courier = Courier::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let invoker = Arc::new(move |message: Message| {
        let tx = tx.clone();
        async move {
            match message.message_type.as_str() {
                "boom" => panic!("handler exploded"),
                "fail" => anyhow::bail!("handler failed"),
                _ => {
                    tx.send(message.message_type)?;
                    Ok::<(), anyhow::Error>(())
                }
            }
        }
    });
    let (bob, handle) = start_loop(&courier, "bob", invoker);
    let alice = courier.register("alice");

    for message_type in ["boom", "fail", "ok"] {
        courier
            .dispatcher()
            .dispatch(message_type, MessageData::Empty, &bob, alice.owner(), &Options::local(), None)
            .await?;
    }

    let handled = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await?;
    assert_eq!(handled.as_deref(), Some("ok"));
    assert!(!handle.is_finished());

    bob.close();
    tokio::time::timeout(Duration::from_secs(1), handle).await??;
    Ok(())
}

#[tokio::test]
async fn test_messages_from_one_sender_arrive_in_order() -> anyhow::Result<()> {
    initialize_tracing();
    let courier = Courier::new();
    let (forwarder, mut received) = Forwarder::channel();
    let (bob, _handle) = start_loop(&courier, "bob", forwarder);
    let alice = courier.register("alice");

    for n in 0..20 {
        courier
            .dispatcher()
            .dispatch(format!("m{n}"), MessageData::Empty, &bob, alice.owner(), &Options::local(), None)
            .await?;
    }
    for n in 0..20 {
        let message = next_message(&mut received).await?;
        assert_eq!(message.message_type, format!("m{n}"));
        assert_eq!(message.sender.name(), "alice");
    }
    Ok(())
}
