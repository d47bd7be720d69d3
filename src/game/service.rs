use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use super::{
    models::{GameSession, GameStatus, Move, MoveAction},
    referee::Referee,
    repository::GameRepository,
    types::{require_id, CreateGameRequest},
};
use crate::hub::{HubHandle, ServerEvent};
use crate::shared::AppError;

/// Service for game lifecycle: create, join, play
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
    referee: Arc<dyn Referee>,
    hub: HubHandle,
}

impl GameService {
    pub fn new(
        repository: Arc<dyn GameRepository + Send + Sync>,
        referee: Arc<dyn Referee>,
        hub: HubHandle,
    ) -> Self {
        Self {
            repository,
            referee,
            hub,
        }
    }

    /// Creates a new game owned by the requester. Nothing is broadcast yet.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, kind = %request.kind))]
    pub async fn create_game(&self, request: CreateGameRequest) -> Result<String, AppError> {
        request.validate()?;

        let game_id = self
            .repository
            .create_game(&request.user_id, request.kind, request.product)
            .await;

        info!(game_id = %game_id, "Game created successfully");
        Ok(game_id)
    }

    /// Takes the second seat of a game and broadcasts the new state
    #[instrument(skip(self))]
    pub async fn join_game(
        &self,
        game_id: &str,
        joiner_id: &str,
    ) -> Result<GameSession, AppError> {
        require_id(joiner_id, "user_id")?;

        let joiner = joiner_id.to_string();
        let game = self
            .repository
            .mutate_game(
                game_id,
                Box::new(move |game: &mut GameSession| -> Result<(), AppError> {
                    if game.player1_id == joiner {
                        return Err(AppError::SelfJoin);
                    }
                    if game.is_full() {
                        return Err(AppError::AlreadyFull);
                    }
                    game.player2_id = Some(joiner);
                    game.advance_status(GameStatus::InProgress);
                    Ok(())
                }),
            )
            .await?;

        info!(game_id = %game_id, joiner_id = %joiner_id, "Player joined game");
        self.publish_update(&game);
        Ok(game)
    }

    /// Records a player's action for a round, lets the referee judge it, and
    /// broadcasts the new state
    #[instrument(skip(self))]
    pub async fn submit_move(
        &self,
        game_id: &str,
        player_id: &str,
        round: u32,
        action: MoveAction,
    ) -> Result<GameSession, AppError> {
        require_id(player_id, "user_id")?;
        if round == 0 {
            return Err(AppError::InvalidPayload("round must start at 1".to_string()));
        }
        if !action.is_well_formed() {
            return Err(AppError::InvalidPayload(
                "shot score must be a finite number".to_string(),
            ));
        }

        let player = player_id.to_string();
        let referee = Arc::clone(&self.referee);
        let game = self
            .repository
            .mutate_game(
                game_id,
                Box::new(move |game: &mut GameSession| -> Result<(), AppError> {
                    let seat = game.seat_of(&player).ok_or(AppError::NotAParticipant)?;
                    if action.kind() != game.kind {
                        return Err(AppError::InvalidPayload(format!(
                            "action does not belong to a {} game",
                            game.kind
                        )));
                    }
                    if game.move_in_round(seat, round).is_some() {
                        return Err(AppError::DuplicateMove);
                    }
                    game.record_move(seat, Move { round, action });
                    referee.judge_round(game, round);
                    Ok(())
                }),
            )
            .await?;

        info!(
            game_id = %game_id,
            player_id = %player_id,
            round,
            status = ?game.status,
            "Move recorded"
        );
        self.publish_update(&game);
        Ok(game)
    }

    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: &str) -> Result<GameSession, AppError> {
        self.repository
            .get_game(game_id)
            .await
            .ok_or(AppError::NotFound)
    }

    /// Games still waiting for a second player
    #[instrument(skip(self))]
    pub async fn list_joinable(&self) -> Vec<GameSession> {
        let games = self.repository.list_joinable(Utc::now()).await;
        debug!(count = games.len(), "Joinable games listed");
        games
    }

    fn publish_update(&self, game: &GameSession) {
        match serde_json::to_string(&ServerEvent::game_update(game.clone())) {
            Ok(payload) => self.hub.publish(payload),
            Err(e) => {
                error!(game_id = %game.game_id, error = %e, "Failed to serialize game update")
            }
        }
    }
}
