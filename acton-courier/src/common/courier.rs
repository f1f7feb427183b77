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

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout as tokio_timeout;
use tokio_util::task::TaskTracker;
use tracing::{error, trace};

use crate::actor::{Mailbox, Options, ReceiveLoop};
use crate::common::{ActorRegistry, CourierConfig, Dispatcher, RemoteConnections, CONFIG};
use crate::traits::Invoker;

/// Owns the shared state of one messaging node and the receive loops running on it.
///
/// A `Courier` bundles the [`ActorRegistry`], the [`RemoteConnections`] table and a
/// [`Dispatcher`] over both, and tracks every receive loop it spawns so that
/// [`shutdown`](Courier::shutdown) can close all actors and wait for them.
#[derive(Debug, Clone)]
pub struct Courier {
    registry: Arc<ActorRegistry>,
    connections: Arc<RemoteConnections>,
    dispatcher: Dispatcher,
    config: CourierConfig,
    tracker: TaskTracker,
}

impl Default for Courier {
    fn default() -> Self {
        Self::with_config(CONFIG.clone())
    }
}

impl Courier {
    /// Creates a courier using the global [`CONFIG`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a courier with an explicit configuration.
    #[must_use]
    pub fn with_config(config: CourierConfig) -> Self {
        let registry = Arc::new(ActorRegistry::new(config.limits.mailbox_capacity));
        let connections = Arc::new(RemoteConnections::new());
        let dispatcher = Dispatcher::new(registry.clone(), connections.clone());
        Self {
            registry,
            connections,
            dispatcher,
            config,
            tracker: TaskTracker::new(),
        }
    }

    /// The registry of actors on this node.
    #[must_use]
    pub const fn registry(&self) -> &Arc<ActorRegistry> {
        &self.registry
    }

    /// The routes to actors on other nodes.
    #[must_use]
    pub const fn connections(&self) -> &Arc<RemoteConnections> {
        &self.connections
    }

    /// A dispatcher sharing this courier's registry and connections.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The configuration this courier was built with.
    #[must_use]
    pub const fn config(&self) -> &CourierConfig {
        &self.config
    }

    /// Registers an actor and returns its mailbox.
    pub fn register(&self, name: impl Into<String>) -> Mailbox {
        self.registry.register(name)
    }

    /// Spawns the receive loop for `mailbox`, handing each message to `invoker`.
    ///
    /// The loop runs until the actor is closed (or, for remote options, until its
    /// transport destination closes).
    pub fn spawn<I>(&self, mailbox: Mailbox, invoker: Arc<I>, options: Options) -> JoinHandle<()>
    where
        I: Invoker + ?Sized + 'static,
    {
        let receive_loop = ReceiveLoop::new(
            mailbox,
            invoker,
            self.registry.clone(),
            self.connections.clone(),
        );
        self.tracker
            .spawn(async move { receive_loop.run(&options).await })
    }

    /// Closes every registered actor and waits for all spawned receive loops to end.
    ///
    /// # Errors
    ///
    /// Returns an error if the loops have not finished within
    /// [`CourierConfig::system_shutdown_timeout`].
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        trace!("Closing all registered actors");
        for actor in self.registry.actors() {
            actor.close();
        }
        self.tracker.close();

        let timeout: Duration = self.config.system_shutdown_timeout();
        if tokio_timeout(timeout, self.tracker.wait()).await.is_err() {
            error!(
                "Shutdown timeout expired after {} ms with {} receive loops running",
                timeout.as_millis(),
                self.tracker.len()
            );
            return Err(anyhow::anyhow!(
                "Timeout while waiting for receive loops to finish after {} ms",
                timeout.as_millis()
            ));
        }
        trace!("Courier shutdown complete");
        Ok(())
    }
}
