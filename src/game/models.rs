use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// How long a freshly created game stays open for a second player
pub const JOIN_WINDOW_SECS: i64 = 120;

/// Supported game variants
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameKind {
    /// Scissors, paper, rock
    Rps,
    Golf,
}

/// Lifecycle of a game. Ordered so that a status can only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    PendingJoin,
    InProgress,
    Completed,
}

/// The item a duel is fought over
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub url: String,
}

/// A single action a player takes in a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAction {
    Rock,
    Paper,
    Scissors,
    /// A golf shot, recorded with the score it earned
    Shot { score: f32 },
}

impl MoveAction {
    /// Which game variant this action belongs to
    pub fn kind(&self) -> GameKind {
        match self {
            MoveAction::Rock | MoveAction::Paper | MoveAction::Scissors => GameKind::Rps,
            MoveAction::Shot { .. } => GameKind::Golf,
        }
    }

    /// Shot scores must be finite; JSON has no encoding for infinity or NaN
    pub fn is_well_formed(&self) -> bool {
        match self {
            MoveAction::Shot { score } => score.is_finite(),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub round: u32,
    pub action: MoveAction,
}

/// Which seat a participant occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player1,
    Player2,
}

/// State of a single two-player game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub game_id: String,
    pub kind: GameKind,
    pub product: Product,
    pub player1_id: String,
    pub player2_id: Option<String>,
    pub player1_score: i32,
    pub player2_score: i32,
    pub player1_moves: Vec<Move>,
    pub player2_moves: Vec<Move>,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
}

impl GameSession {
    /// Creates a game waiting for its second player
    pub fn new(game_id: String, owner_id: String, kind: GameKind, product: Product) -> Self {
        Self {
            game_id,
            kind,
            product,
            player1_id: owner_id,
            player2_id: None,
            player1_score: 0,
            player2_score: 0,
            player1_moves: Vec::new(),
            player2_moves: Vec::new(),
            status: GameStatus::PendingJoin,
            created_at: Utc::now(),
        }
    }

    /// Open second seat and still inside the join window at `now`
    pub fn is_joinable(&self, now: DateTime<Utc>) -> bool {
        self.player2_id.is_none() && now - self.created_at < Duration::seconds(JOIN_WINDOW_SECS)
    }

    pub fn is_full(&self) -> bool {
        self.player2_id.is_some()
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        if self.player1_id == player_id {
            Some(Seat::Player1)
        } else if self.player2_id.as_deref() == Some(player_id) {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn moves(&self, seat: Seat) -> &[Move] {
        match seat {
            Seat::Player1 => &self.player1_moves,
            Seat::Player2 => &self.player2_moves,
        }
    }

    pub fn move_in_round(&self, seat: Seat, round: u32) -> Option<&Move> {
        self.moves(seat).iter().find(|m| m.round == round)
    }

    /// Appends a move. Callers check for duplicates first.
    pub fn record_move(&mut self, seat: Seat, new_move: Move) {
        match seat {
            Seat::Player1 => self.player1_moves.push(new_move),
            Seat::Player2 => self.player2_moves.push(new_move),
        }
    }

    pub fn add_score(&mut self, seat: Seat, points: i32) {
        match seat {
            Seat::Player1 => self.player1_score += points,
            Seat::Player2 => self.player2_score += points,
        }
    }

    pub fn score(&self, seat: Seat) -> i32 {
        match seat {
            Seat::Player1 => self.player1_score,
            Seat::Player2 => self.player2_score,
        }
    }

    /// Moves the status forward; never regresses
    pub fn advance_status(&mut self, status: GameStatus) {
        if status > self.status {
            self.status = status;
        }
    }
}
