// Real-time fan-out of game updates to observers

// Public API
pub use broadcast::{spawn_hub, BroadcastHub, ConnectionId, HubHandle};
pub use handler::{health_check, websocket_handler};
pub use messages::ServerEvent;
pub use socket::{ObserverConnection, ObserverSink, ObserverStream, SocketError};

// Internal modules
mod broadcast;
mod handler;
mod messages;
mod socket;
