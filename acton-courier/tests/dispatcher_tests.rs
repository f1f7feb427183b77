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

//! Tests for local and remote routing through the dispatcher.

use std::time::Duration;

use acton_courier::prelude::*;

use crate::setup::*;

mod setup;

/// A span whose context extraction fails outright.
#[derive(Debug)]
struct ExplodingSpan;

impl ActiveSpan for ExplodingSpan {
    fn inject(&self) -> Option<TracingCarrier> {
        panic!("span context unavailable")
    }
}

fn dispatcher(capacity: usize) -> Dispatcher {
    Dispatcher::new(
        Arc::new(ActorRegistry::new(capacity)),
        Arc::new(RemoteConnections::new()),
    )
}

#[tokio::test]
async fn test_full_mailbox_blocks_the_caller() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(1);
    let mut bob = dispatcher.registry().register("bob");
    let alice = dispatcher.registry().register("alice");
    let (bob_ref, alice_ref) = (bob.owner().clone(), alice.owner().clone());

    dispatcher
        .dispatch("first", MessageData::Empty, &bob_ref, &alice_ref, &Options::local(), None)
        .await?;

    let blocked = tokio::time::timeout(
        Duration::from_millis(100),
        dispatcher.dispatch("second", MessageData::Empty, &bob_ref, &alice_ref, &Options::local(), None),
    )
    .await;
    assert!(blocked.is_err(), "dispatch to a full mailbox should wait");

    let pending = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            dispatcher
                .dispatch("third", MessageData::Empty, &bob_ref, &alice_ref, &Options::local(), None)
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!pending.is_finished());

    assert_eq!(bob.try_recv().map(|m| m.message_type), Some("first".to_string()));
    tokio::time::timeout(Duration::from_secs(1), pending).await???;
    assert_eq!(bob.try_recv().map(|m| m.message_type), Some("third".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_unregistered_sender_is_reported() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let bob = dispatcher.registry().register("bob");
    let (stranger, _mailbox) = Mailbox::new("stranger", 1);

    let err = dispatcher
        .dispatch("greet", MessageData::Empty, bob.owner(), &stranger, &Options::local(), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::UnknownActor(UnknownActorError("stranger".to_string()))
    );
    Ok(())
}

#[tokio::test]
async fn test_local_dispatch_keeps_span_and_carrier() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let mut bob = dispatcher.registry().register("bob");
    let alice = dispatcher.registry().register("alice");

    let span: Arc<dyn ActiveSpan> = Arc::new(sample_carrier());
    dispatcher
        .dispatch(
            "greet",
            MessageData::new("hi".to_string()),
            bob.owner(),
            alice.owner(),
            &Options::local(),
            Some(span),
        )
        .await?;

    let message = bob.try_recv().expect("message should be queued");
    assert_eq!(message.carrier(), Some(&sample_carrier()));
    assert!(message.span().is_some());
    Ok(())
}

#[tokio::test]
async fn test_tracing_span_is_injected() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let mut bob = dispatcher.registry().register("bob");
    let alice = dispatcher.registry().register("alice");

    let span = tracing::info_span!("checkout");
    dispatcher
        .dispatch(
            "greet",
            MessageData::Empty,
            bob.owner(),
            alice.owner(),
            &Options::local(),
            Some(Arc::new(span)),
        )
        .await?;

    let message = bob.try_recv().expect("message should be queued");
    let carrier = message.carrier().expect("an enabled span yields a carrier");
    assert_eq!(carrier.get("span_name").map(String::as_str), Some("checkout"));
    assert!(carrier.contains_key("span_id"));
    Ok(())
}

#[tokio::test]
async fn test_no_span_means_no_carrier() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let mut bob = dispatcher.registry().register("bob");
    let alice = dispatcher.registry().register("alice");

    dispatcher
        .dispatch("greet", MessageData::Empty, bob.owner(), alice.owner(), &Options::local(), None)
        .await?;

    let message = bob.try_recv().expect("message should be queued");
    assert!(message.carrier().is_none());
    assert!(message.span().is_none());
    Ok(())
}

#[tokio::test]
async fn test_remote_dispatch_to_unbound_destination_fails() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let alice = dispatcher.registry().register("alice");
    let far = dispatcher.registry().register_remote("far");
    dispatcher
        .connections()
        .connect("far", Arc::new(LoopbackTransport::new()));

    let err = dispatcher
        .dispatch("greet", MessageData::Empty, &far, alice.owner(), &Options::remote("node-b"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::TransportUnavailable(_)));
    Ok(())
}

#[tokio::test]
async fn test_remote_dispatch_with_empty_name_fails_to_encode() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let alice = dispatcher.registry().register("alice");
    let (nameless, _mailbox) = Mailbox::new("", 1);
    let transport = Arc::new(LoopbackTransport::new());
    transport.bind("node-b");
    dispatcher.connections().connect("", transport);

    let err = dispatcher
        .dispatch("greet", MessageData::Empty, &nameless, alice.owner(), &Options::remote("node-b"), None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DispatchError::EncodeFailed(EncodingError::MissingActorName(acton_courier::codec::SELF_KEY))
    );
    Ok(())
}

#[tokio::test]
async fn test_panic_during_dispatch_is_contained() -> anyhow::Result<()> {
    initialize_tracing();
    let dispatcher = dispatcher(4);
    let mut bob = dispatcher.registry().register("bob");
    let alice = dispatcher.registry().register("alice");

    let result = dispatcher
        .dispatch(
            "greet",
            MessageData::Empty,
            bob.owner(),
            alice.owner(),
            &Options::local(),
            Some(Arc::new(ExplodingSpan)),
        )
        .await;

    assert_eq!(result, Ok(()));
    assert!(bob.try_recv().is_none());

    // The dispatcher stays usable after a contained fault.
    dispatcher
        .dispatch("greet", MessageData::Empty, bob.owner(), alice.owner(), &Options::local(), None)
        .await?;
    assert!(bob.try_recv().is_some());
    Ok(())
}
