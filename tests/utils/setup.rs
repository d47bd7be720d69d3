#![allow(dead_code)] // Test utilities may not all be used in every test

use std::sync::Arc;

use duelhub::{
    create_router, spawn_hub, AppError, AppState, ConnectionId, GameKind, GameService,
    GameSession, HubHandle, InMemoryGameRepository, MoveAction, PassiveReferee, Product,
    Referee, ScissorsPaperRockReferee,
};
use duelhub::game::types::CreateGameRequest;

use super::mocks::MockObserver;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub hub: HubHandle,
    pub game_service: Arc<GameService>,
    pub app_state: AppState,
    pub observers: Vec<(ConnectionId, MockObserver)>,
}

pub struct TestSetupBuilder {
    healthy_observers: usize,
    broken_observers: usize,
    referee: Arc<dyn Referee>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            healthy_observers: 0,
            broken_observers: 0,
            referee: Arc::new(PassiveReferee),
        }
    }

    pub fn with_observers(mut self, count: usize) -> Self {
        self.healthy_observers = count;
        self
    }

    pub fn with_broken_observers(mut self, count: usize) -> Self {
        self.broken_observers = count;
        self
    }

    pub fn with_scoring(mut self) -> Self {
        self.referee = Arc::new(ScissorsPaperRockReferee::default());
        self
    }

    pub async fn build(self) -> TestSetup {
        let hub = spawn_hub();
        let repository = Arc::new(InMemoryGameRepository::new());
        let game_service = Arc::new(GameService::new(repository, self.referee, hub.clone()));

        let mut observers = Vec::new();
        for _ in 0..self.healthy_observers {
            let observer = MockObserver::new();
            observers.push((hub.register(Box::new(observer.clone())), observer));
        }
        for _ in 0..self.broken_observers {
            let observer = MockObserver::broken();
            observers.push((hub.register(Box::new(observer.clone())), observer));
        }

        // Registration is queued; wait for the hub to see every observer
        assert_eq!(
            hub.connection_count().await,
            self.healthy_observers + self.broken_observers
        );

        let app_state = AppState::new(Arc::clone(&game_service), hub.clone());

        TestSetup {
            hub,
            game_service,
            app_state,
            observers,
        }
    }
}

impl TestSetup {
    pub fn router(&self) -> axum::Router {
        create_router(self.app_state.clone())
    }

    /// Waits until every command sent to the hub so far has been processed
    pub async fn settle(&self) -> usize {
        self.hub.connection_count().await
    }

    pub fn observer(&self, index: usize) -> &MockObserver {
        &self.observers[index].1
    }

    pub async fn create_game(&self, owner: &str, kind: GameKind) -> String {
        self.game_service
            .create_game(CreateGameRequest {
                user_id: owner.to_string(),
                kind,
                product: sample_product(),
            })
            .await
            .unwrap()
    }

    /// Creates an rps game owned by `owner` and seats `opponent`
    pub async fn start_game(&self, owner: &str, opponent: &str) -> String {
        let game_id = self.create_game(owner, GameKind::Rps).await;
        self.game_service
            .join_game(&game_id, opponent)
            .await
            .unwrap();
        game_id
    }

    pub async fn play(
        &self,
        game_id: &str,
        player: &str,
        round: u32,
        action: MoveAction,
    ) -> Result<GameSession, AppError> {
        self.game_service
            .submit_move(game_id, player, round, action)
            .await
    }
}

pub fn sample_product() -> Product {
    Product {
        name: "Espresso machine".to_string(),
        price: 349.99,
        url: "https://shop.example/espresso".to_string(),
    }
}
