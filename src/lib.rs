// Library crate for the two-player game server
// This file exposes the public API for integration tests

pub mod config;
pub mod game;
pub mod hub;
pub mod shared;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use game::{
    models::{GameKind, GameSession, GameStatus, Move, MoveAction, Product, Seat},
    repository::{GameRepository, InMemoryGameRepository},
    GameService, PassiveReferee, Referee, ScissorsPaperRockReferee,
};
pub use hub::{spawn_hub, ConnectionId, HubHandle, ObserverSink, ServerEvent, SocketError};
pub use shared::{AppError, AppState};

/// Builds the HTTP router with every route wired to the shared state
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/games", post(game::create_game).get(game::list_joinable_games))
        .route("/games/:game_id", get(game::get_game))
        .route("/games/:game_id/join", post(game::join_game))
        .route("/games/:game_id/moves", post(game::submit_move))
        .route("/ws", get(hub::websocket_handler))
        .route("/health", get(hub::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
