use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duelhub::{
    create_router, spawn_hub, AppState, GameService, InMemoryGameRepository,
    ScissorsPaperRockReferee, ServerConfig,
};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting game server");

    // The hub owns the observer set; everything else talks to it through the handle
    let hub = spawn_hub();

    let game_repository = Arc::new(InMemoryGameRepository::new());
    let referee = Arc::new(ScissorsPaperRockReferee::default());
    let game_service = Arc::new(GameService::new(game_repository, referee, hub.clone()));

    let app_state = AppState::new(game_service, hub);
    let app = create_router(app_state);

    let address = config.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %address, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(address = %address, "Server running");
    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "Server stopped with error");
        std::process::exit(1);
    }
}
