use serde::{Deserialize, Serialize};

use super::models::{GameKind, GameSession, MoveAction, Product};
use crate::shared::AppError;

/// Request payload for creating a new game
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub user_id: String,
    pub kind: GameKind,
    pub product: Product,
}

impl CreateGameRequest {
    /// The owner and every product field must be filled in
    pub fn validate(&self) -> Result<(), AppError> {
        require_id(&self.user_id, "user_id")?;

        if self.product.name.trim().is_empty()
            || self.product.url.trim().is_empty()
            || self.product.price <= 0.0
        {
            return Err(AppError::InvalidPayload(
                "Product details are required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Request payload for joining a game as the second player
#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub user_id: String,
}

/// Request payload for submitting a move
#[derive(Debug, Deserialize)]
pub struct SubmitMoveRequest {
    pub user_id: String,
    pub round: u32,
    pub action: MoveAction,
}

impl SubmitMoveRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        require_id(&self.user_id, "user_id")?;
        if self.round == 0 {
            return Err(AppError::InvalidPayload("round must start at 1".to_string()));
        }
        if !self.action.is_well_formed() {
            return Err(AppError::InvalidPayload(
                "shot score must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn require_id(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidPayload(format!("{} is required", field)));
    }
    Ok(())
}

/// Response for game creation
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub status: String,
    pub message: String,
    pub game_id: String,
}

/// Response carrying a game snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct GameResponse {
    pub status: String,
    pub message: String,
    pub game: GameSession,
}

impl GameResponse {
    pub fn success(message: &str, game: GameSession) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            game,
        }
    }
}

/// Entry in the list of games waiting for an opponent
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinableGameResponse {
    pub game_id: String,
    pub product: Product,
    #[serde(rename = "type")]
    pub kind: GameKind,
}

impl From<GameSession> for JoinableGameResponse {
    fn from(game: GameSession) -> Self {
        Self {
            game_id: game.game_id,
            product: game.product,
            kind: game.kind,
        }
    }
}
