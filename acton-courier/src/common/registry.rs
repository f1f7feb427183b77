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

use dashmap::DashMap;
use tracing::{trace, warn};

use crate::actor::{ActorRef, Mailbox};
use crate::common::CONFIG;
use crate::message::UnknownActorError;

/// Process-wide mapping from actor names to live [`ActorRef`]s.
///
/// The registry is an explicit object, shared through an `Arc` with the codec,
/// the dispatcher and the receive loops. Lookups are safe while other tasks
/// register or deregister actors.
///
/// The dispatch and receive path only ever reads from it. Registration belongs to
/// whatever creates actors (the [`Courier`](crate::common::Courier), a supervisor,
/// or a test).
#[derive(Debug)]
pub struct ActorRegistry {
    actors: DashMap<String, ActorRef>,
    mailbox_capacity: usize,
}

impl Default for ActorRegistry {
    fn default() -> Self {
        Self::new(CONFIG.limits.mailbox_capacity)
    }
}

impl ActorRegistry {
    /// Creates an empty registry whose mailboxes hold up to `mailbox_capacity`
    /// messages. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(mailbox_capacity: usize) -> Self {
        Self {
            actors: DashMap::new(),
            mailbox_capacity: mailbox_capacity.max(1),
        }
    }

    /// Registers an actor under `name` and returns its fresh [`Mailbox`].
    ///
    /// An actor already registered under the same name is replaced and sent a close
    /// signal, so its receive loop ends instead of outliving its registration.
    pub fn register(&self, name: impl Into<String>) -> Mailbox {
        self.register_with_capacity(name, self.mailbox_capacity)
    }

    /// Registers an actor with a mailbox of a specific capacity.
    pub fn register_with_capacity(&self, name: impl Into<String>, capacity: usize) -> Mailbox {
        let name = name.into();
        let (actor, mailbox) = Mailbox::new(&name, capacity.max(1));
        if let Some(replaced) = self.actors.insert(name.clone(), actor) {
            warn!("Replaced existing registration for actor: {}", name);
            replaced.close();
        } else {
            trace!("Registered actor: {}", name);
        }
        mailbox
    }

    /// Registers a reference to an actor that lives in another process.
    ///
    /// The reference has no local mailbox; it exists so that decoded messages can
    /// name the remote actor as their sender or receiver. Messages to it must be
    /// dispatched with a remote routing policy.
    pub fn register_remote(&self, name: impl Into<String>) -> ActorRef {
        let name = name.into();
        let (actor, mailbox) = Mailbox::new(&name, 1);
        drop(mailbox);
        if let Some(replaced) = self.actors.insert(name.clone(), actor.clone()) {
            warn!("Replaced existing registration for actor: {}", name);
            replaced.close();
        }
        trace!("Registered remote actor: {}", name);
        actor
    }

    /// Resolves a name to the currently registered reference.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownActorError`] if no actor is registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<ActorRef, UnknownActorError> {
        self.actors
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| UnknownActorError(name.to_string()))
    }

    /// Removes the registration for `name`, returning the reference it held.
    pub fn deregister(&self, name: &str) -> Option<ActorRef> {
        let removed = self.actors.remove(name).map(|(_, actor)| actor);
        if removed.is_some() {
            trace!("Deregistered actor: {}", name);
        }
        removed
    }

    /// Returns `true` if an actor is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actors.contains_key(name)
    }

    /// Number of registered actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns `true` if no actor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Names of all registered actors, in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.actors.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Snapshot of all registered references.
    #[must_use]
    pub fn actors(&self) -> Vec<ActorRef> {
        self.actors.iter().map(|entry| entry.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_resolve_unknown_name_fails() {
        let registry = ActorRegistry::new(4);
        let err = registry.resolve("ghost").unwrap_err();
        assert_eq!(err, UnknownActorError("ghost".to_string()));
        assert_eq!(err.name(), "ghost");
    }

    #[test]
    fn test_register_resolve_deregister() {
        let registry = ActorRegistry::new(4);
        let mailbox = registry.register("alice");
        assert!(registry.contains("alice"));
        assert_eq!(registry.resolve("alice").unwrap(), *mailbox.owner());
        assert_eq!(registry.len(), 1);

        assert!(registry.deregister("alice").is_some());
        assert!(registry.deregister("alice").is_none());
        assert!(registry.is_empty());
        assert!(registry.resolve("alice").is_err());
    }

    #[test]
    fn test_replaced_registration_is_signalled_to_close() {
        let registry = ActorRegistry::new(4);
        let mut first = registry.register("alice");
        let mut second = registry.register("alice");

        assert!(first.close.try_recv().is_ok());
        assert!(second.close.try_recv().is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remote_reference_has_no_local_mailbox() {
        let registry = ActorRegistry::new(4);
        let remote = registry.register_remote("far-away");
        assert!(remote.is_closed());
        assert_eq!(registry.resolve("far-away").unwrap(), remote);
    }

    #[tokio::test]
    async fn test_concurrent_registration_and_lookup() {
        let registry = Arc::new(ActorRegistry::new(4));
        let mut tasks = Vec::new();
        for i in 0..16 {
            let registry = registry.clone();
            tasks.push(tokio::spawn(async move {
                let name = format!("actor-{i}");
                let mailbox = registry.register(name.clone());
                for _ in 0..100 {
                    assert!(registry.resolve(&name).is_ok());
                    let _ = registry.resolve("actor-0");
                }
                drop(mailbox);
                registry.deregister(&name);
            }));
        }
        for task in tasks {
            task.await.expect("task should not panic");
        }
        assert!(registry.is_empty());
    }
}
