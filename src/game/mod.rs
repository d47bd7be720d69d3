// Public API - what other modules can use
pub use handlers::{create_game, get_game, join_game, list_joinable_games, submit_move};
pub use referee::{PassiveReferee, Referee, ScissorsPaperRockReferee};
pub use service::GameService;

// Internal modules
mod handlers;
pub mod models;
mod referee;
pub mod repository;
mod service;
pub mod types;
