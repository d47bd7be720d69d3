use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::{
    CreateGameRequest, CreateGameResponse, GameResponse, JoinGameRequest, JoinableGameResponse,
    SubmitMoveRequest,
};
use crate::shared::{AppError, AppState};

/// HTTP handler for creating a new game
///
/// POST /games
#[instrument(name = "create_game", skip(state, request))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<Json<CreateGameResponse>, AppError> {
    info!(user_id = %request.user_id, kind = %request.kind, "Creating new game");

    let game_id = state.game_service.create_game(request).await?;

    Ok(Json(CreateGameResponse {
        status: "success".to_string(),
        message: "Game created".to_string(),
        game_id,
    }))
}

/// HTTP handler for listing games that still need a second player
///
/// GET /games
#[instrument(name = "list_joinable_games", skip(state))]
pub async fn list_joinable_games(
    State(state): State<AppState>,
) -> Result<Json<Vec<JoinableGameResponse>>, AppError> {
    let games = state.game_service.list_joinable().await;

    info!(game_count = games.len(), "Joinable games listed");

    Ok(Json(games.into_iter().map(JoinableGameResponse::from).collect()))
}

/// HTTP handler for fetching a game snapshot
///
/// GET /games/:game_id
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    let game = state.game_service.get_game(&game_id).await?;
    Ok(Json(GameResponse::success("Game found", game)))
}

/// HTTP handler for taking the second seat of a game
///
/// POST /games/:game_id/join
#[instrument(name = "join_game", skip(state, request))]
pub async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<JoinGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let game = state
        .game_service
        .join_game(&game_id, &request.user_id)
        .await?;
    Ok(Json(GameResponse::success("Successfully joined game", game)))
}

/// HTTP handler for submitting a move
///
/// POST /games/:game_id/moves
#[instrument(name = "submit_move", skip(state, request))]
pub async fn submit_move(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<SubmitMoveRequest>,
) -> Result<Json<GameResponse>, AppError> {
    request.validate()?;

    let game = state
        .game_service
        .submit_move(&game_id, &request.user_id, request.round, request.action)
        .await?;
    Ok(Json(GameResponse::success("Move logged", game)))
}
