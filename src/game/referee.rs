use tracing::debug;

use super::models::{GameKind, GameSession, GameStatus, MoveAction, Seat};

/// Rules collaborator that turns recorded moves into scores and outcomes.
///
/// Called by the game service while the store holds the game's lock, right after a
/// move has been recorded, so implementations must not block or do I/O.
pub trait Referee: Send + Sync {
    fn judge_round(&self, game: &mut GameSession, round: u32);
}

/// Leaves scores and status alone
pub struct PassiveReferee;

impl Referee for PassiveReferee {
    fn judge_round(&self, _game: &mut GameSession, _round: u32) {}
}

/// Scores scissors/paper/rock rounds and completes the game once a player has
/// won `wins_needed` rounds. Other game kinds are ignored.
pub struct ScissorsPaperRockReferee {
    wins_needed: i32,
}

impl Default for ScissorsPaperRockReferee {
    /// Best of three
    fn default() -> Self {
        Self::new(2)
    }
}

impl ScissorsPaperRockReferee {
    pub fn new(wins_needed: i32) -> Self {
        Self { wins_needed }
    }

    /// The seat that wins when player 1 plays `first` against player 2's `second`
    fn winner(first: &MoveAction, second: &MoveAction) -> Option<Seat> {
        use MoveAction::*;
        match (first, second) {
            (Rock, Scissors) | (Scissors, Paper) | (Paper, Rock) => Some(Seat::Player1),
            (Scissors, Rock) | (Paper, Scissors) | (Rock, Paper) => Some(Seat::Player2),
            _ => None,
        }
    }
}

impl Referee for ScissorsPaperRockReferee {
    fn judge_round(&self, game: &mut GameSession, round: u32) {
        if game.kind != GameKind::Rps || game.status == GameStatus::Completed {
            return;
        }

        let (Some(first), Some(second)) = (
            game.move_in_round(Seat::Player1, round),
            game.move_in_round(Seat::Player2, round),
        ) else {
            return;
        };

        let Some(winner) = Self::winner(&first.action, &second.action) else {
            debug!(game_id = %game.game_id, round, "Round drawn");
            return;
        };

        game.add_score(winner, 1);
        debug!(game_id = %game.game_id, round, winner = ?winner, "Round won");

        if game.score(winner) >= self.wins_needed {
            game.advance_status(GameStatus::Completed);
            debug!(game_id = %game.game_id, "Game completed");
        }
    }
}
