use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    response::Response,
    Json,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::socket::ObserverConnection;
use crate::shared::AppState;

/// WebSocket endpoint for observers
/// GET /ws - every registered observer receives every game update
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    info!("Observer connection requested");
    ws.on_upgrade(move |socket| handle_observer_socket(socket, app_state))
}

/// Liveness probe reporting how many observers the hub is serving
/// GET /health
pub async fn health_check(State(app_state): State<AppState>) -> Json<Value> {
    let observers = app_state.hub.connection_count().await;
    debug!(observers = observers, "Health check");
    Json(json!({ "status": "ok", "observers": observers }))
}

/// Hand the write half to the hub and keep reading until the observer leaves
async fn handle_observer_socket(socket: WebSocket, app_state: AppState) {
    let (sink, stream) = socket.split();

    let connection =
        ObserverConnection::open(Box::new(sink), Box::new(stream), app_state.hub.clone());
    info!(connection_id = %connection.id, "Observer connection established");

    connection.run().await;
}
