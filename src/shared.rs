use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::game::GameService;
use crate::hub::HubHandle;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub game_service: Arc<GameService>,
    pub hub: HubHandle,
}

impl AppState {
    pub fn new(game_service: Arc<GameService>, hub: HubHandle) -> Self {
        Self { game_service, hub }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Game not found")]
    NotFound,

    #[error("Game already has two players")]
    AlreadyFull,

    #[error("Cannot join your own game")]
    SelfJoin,

    #[error("User not part of this game")]
    NotAParticipant,

    #[error("Move already exists for this round")]
    DuplicateMove,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::AlreadyFull
            | AppError::SelfJoin
            | AppError::DuplicateMove
            | AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotAParticipant => StatusCode::FORBIDDEN,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
