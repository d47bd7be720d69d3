use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::broadcast::{ConnectionId, HubHandle};

/// Write half of an observer connection - all the hub needs is send and close
#[async_trait]
pub trait ObserverSink: Send {
    /// Send a text message to the observer
    async fn send_text(&mut self, message: String) -> Result<(), SocketError>;

    /// Close the connection
    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Read half of an observer connection
#[async_trait]
pub trait ObserverStream: Send {
    /// Receive the next message from the observer (None if connection closed)
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("connection closed")]
    ConnectionClosed,
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl ObserverSink for SplitSink<WebSocket, Message> {
    async fn send_text(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        SinkExt::close(self)
            .await
            .map_err(|_| SocketError::ConnectionClosed)
    }
}

#[async_trait]
impl ObserverStream for SplitStream<WebSocket> {
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) => return Ok(None),
                Some(Ok(_)) => continue, // Ignore binary/ping/pong
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
                None => return Ok(None),
            }
        }
    }
}

/// ObserverConnection is the read loop of a registered observer.
/// Observers only listen, so inbound messages are dropped; the loop exists to notice
/// when the peer goes away and tell the hub.
pub struct ObserverConnection {
    pub id: ConnectionId,
    stream: Box<dyn ObserverStream>,
    hub: HubHandle,
}

impl ObserverConnection {
    pub fn new(id: ConnectionId, stream: Box<dyn ObserverStream>, hub: HubHandle) -> Self {
        Self { id, stream, hub }
    }

    /// Registers `sink` with the hub and returns the read loop for the same connection
    pub fn open(
        sink: Box<dyn ObserverSink>,
        stream: Box<dyn ObserverStream>,
        hub: HubHandle,
    ) -> Self {
        let id = hub.register(sink);
        Self::new(id, stream, hub)
    }

    /// Run until the observer disconnects or errors, then unregister it
    pub async fn run(mut self) {
        loop {
            match self.stream.receive_message().await {
                Ok(Some(message)) => {
                    debug!(
                        connection_id = %self.id,
                        message = %message,
                        "Ignoring observer message"
                    );
                }
                Ok(None) => {
                    info!(connection_id = %self.id, "Observer disconnected");
                    break;
                }
                Err(e) => {
                    warn!(connection_id = %self.id, error = %e, "Observer connection error");
                    break;
                }
            }
        }

        self.hub.unregister(self.id);
    }
}
