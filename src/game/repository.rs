use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::models::{GameKind, GameSession, Product};
use crate::shared::AppError;

/// A state change applied to a game while the store holds its lock.
/// Returning an error discards every change the transition made.
pub type Transition = Box<dyn FnOnce(&mut GameSession) -> Result<(), AppError> + Send>;

/// Trait for game store operations
#[async_trait]
pub trait GameRepository {
    /// Inserts a new game waiting for its second player and returns its id
    async fn create_game(&self, owner_id: &str, kind: GameKind, product: Product) -> String;

    async fn get_game(&self, game_id: &str) -> Option<GameSession>;

    /// Atomically applies `transition` to the stored game and returns the result.
    /// This is the only way a stored game changes after creation.
    async fn mutate_game(
        &self,
        game_id: &str,
        transition: Transition,
    ) -> Result<GameSession, AppError>;

    /// Games that can still be joined at `now`
    async fn list_joinable(&self, now: DateTime<Utc>) -> Vec<GameSession>;
}

/// In-memory implementation of GameRepository
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, GameSession>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, product))]
    async fn create_game(&self, owner_id: &str, kind: GameKind, product: Product) -> String {
        let mut games = self.games.lock().await;

        let mut game_id = Uuid::new_v4().to_string();
        while games.contains_key(&game_id) {
            game_id = Uuid::new_v4().to_string();
        }

        let game = GameSession::new(game_id.clone(), owner_id.to_string(), kind, product);
        games.insert(game_id.clone(), game);

        info!(game_id = %game_id, owner_id = %owner_id, kind = %kind, "Game created in memory");
        game_id
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Option<GameSession> {
        let games = self.games.lock().await;
        let game = games.get(game_id).cloned();

        if game.is_none() {
            debug!(game_id = %game_id, "Game not found in memory");
        }

        game
    }

    #[instrument(skip(self, transition))]
    async fn mutate_game(
        &self,
        game_id: &str,
        transition: Transition,
    ) -> Result<GameSession, AppError> {
        let mut games = self.games.lock().await;

        let game = games.get_mut(game_id).ok_or_else(|| {
            debug!(game_id = %game_id, "Game not found");
            AppError::NotFound
        })?;

        let mut working_copy = game.clone();
        transition(&mut working_copy)?;
        *game = working_copy;

        debug!(game_id = %game_id, status = ?game.status, "Game updated (atomic)");
        Ok(game.clone())
    }

    #[instrument(skip(self))]
    async fn list_joinable(&self, now: DateTime<Utc>) -> Vec<GameSession> {
        let games = self.games.lock().await;
        let joinable: Vec<GameSession> = games
            .values()
            .filter(|game| game.is_joinable(now))
            .cloned()
            .collect();

        debug!(
            total = games.len(),
            joinable = joinable.len(),
            "Listed joinable games"
        );
        joinable
    }
}
