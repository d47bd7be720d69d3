use std::collections::HashMap;
use std::fmt;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::socket::ObserverSink;

/// Identity of a registered observer connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything the hub can be asked to do. Commands are processed one at a time,
/// in the order they were sent.
pub(crate) enum HubCommand {
    Register {
        id: ConnectionId,
        sink: Box<dyn ObserverSink>,
    },
    Unregister {
        id: ConnectionId,
    },
    Broadcast {
        payload: String,
    },
    ConnectionCount {
        reply: oneshot::Sender<usize>,
    },
}

/// Cloneable handle used by everything outside the hub task
#[derive(Clone)]
pub struct HubHandle {
    sender: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    /// Hands a new observer to the hub and returns the id it is registered under
    pub fn register(&self, sink: Box<dyn ObserverSink>) -> ConnectionId {
        let id = ConnectionId::new();
        self.register_with_id(id, sink);
        id
    }

    pub fn register_with_id(&self, id: ConnectionId, sink: Box<dyn ObserverSink>) {
        self.send(HubCommand::Register { id, sink });
    }

    pub fn unregister(&self, id: ConnectionId) {
        self.send(HubCommand::Unregister { id });
    }

    /// Queues `payload` for every observer. Never blocks and never reports delivery failures.
    pub fn publish(&self, payload: String) {
        self.send(HubCommand::Broadcast { payload });
    }

    /// Number of live observers, as seen after every command queued before this call
    pub async fn connection_count(&self) -> usize {
        let (reply, response) = oneshot::channel();
        self.send(HubCommand::ConnectionCount { reply });
        response.await.unwrap_or(0)
    }

    fn send(&self, command: HubCommand) {
        if self.sender.send(command).is_err() {
            warn!("Broadcast hub is not running, dropping command");
        }
    }
}

/// Owns the live observer set. Only the task running [`BroadcastHub::run`] ever touches it.
pub struct BroadcastHub {
    connections: HashMap<ConnectionId, Box<dyn ObserverSink>>,
    receiver: mpsc::UnboundedReceiver<HubCommand>,
}

impl BroadcastHub {
    pub fn new() -> (Self, HubHandle) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let hub = Self {
            connections: HashMap::new(),
            receiver,
        };
        (hub, HubHandle { sender })
    }

    /// Process commands until every handle has been dropped, then close what is left
    pub async fn run(mut self) {
        info!("Broadcast hub started");

        while let Some(command) = self.receiver.recv().await {
            self.handle(command).await;
        }

        for (id, mut sink) in self.connections.drain() {
            let _ = sink.close().await;
            debug!(connection_id = %id, "Closed observer on hub shutdown");
        }

        info!("Broadcast hub stopped");
    }

    async fn handle(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register { id, sink } => {
                if self.connections.contains_key(&id) {
                    debug!(connection_id = %id, "Observer already registered");
                    return;
                }
                self.connections.insert(id, sink);
                info!(
                    connection_id = %id,
                    observers = self.connections.len(),
                    "Observer registered"
                );
            }
            HubCommand::Unregister { id } => {
                if let Some(mut sink) = self.connections.remove(&id) {
                    let _ = sink.close().await;
                    info!(
                        connection_id = %id,
                        observers = self.connections.len(),
                        "Observer unregistered"
                    );
                }
            }
            HubCommand::Broadcast { payload } => self.broadcast(&payload).await,
            HubCommand::ConnectionCount { reply } => {
                let _ = reply.send(self.connections.len());
            }
        }
    }

    async fn broadcast(&mut self, payload: &str) {
        let mut failed = Vec::new();

        for (id, sink) in self.connections.iter_mut() {
            if let Err(e) = sink.send_text(payload.to_string()).await {
                warn!(connection_id = %id, error = %e, "Failed to deliver to observer");
                failed.push(*id);
            }
        }

        for id in &failed {
            if let Some(mut sink) = self.connections.remove(id) {
                let _ = sink.close().await;
            }
        }

        debug!(
            delivered = self.connections.len(),
            dropped = failed.len(),
            "Broadcast delivered"
        );
    }
}

/// Starts a hub on the current runtime and returns its handle
pub fn spawn_hub() -> HubHandle {
    let (hub, handle) = BroadcastHub::new();
    tokio::spawn(hub.run());
    handle
}
