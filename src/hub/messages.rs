use serde::{Deserialize, Serialize};

use crate::game::models::GameSession;

/// Events pushed to every observer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full snapshot of a game after a join or a move
    GameUpdate { session: GameSession },
}

impl ServerEvent {
    pub fn game_update(session: GameSession) -> Self {
        ServerEvent::GameUpdate { session }
    }
}
