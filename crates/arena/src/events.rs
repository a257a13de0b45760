//! Match events and the final result
//!
//! Events are emitted strictly in order and together replay the whole
//! match. Consumers must treat them as read-only.

use othello_core::{Board, Color, Position, StoneCount, Winner};
use script_sandbox::ErrorKind;
use serde::{Deserialize, Serialize};

use crate::rank::Rank;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Winner,
    pub black_score: u32,
    pub white_score: u32,
    /// Set when the human side lost by failing a turn
    pub forfeit: bool,
    /// Stones placed; passes do not count
    pub total_turns: u32,
}

impl MatchResult {
    pub fn finished(count: StoneCount, total_turns: u32) -> Self {
        Self {
            winner: count.winner(),
            black_score: count.black,
            white_score: count.white,
            forfeit: false,
            total_turns,
        }
    }

    /// `loser` failed a turn; scores are the stones on the board right now.
    pub fn forfeited(loser: Color, count: StoneCount, total_turns: u32) -> Self {
        Self {
            winner: Winner::from(loser.other()),
            black_score: count.black,
            white_score: count.white,
            forfeit: true,
            total_turns,
        }
    }

    pub fn is_win_for(&self, color: Color) -> bool {
        self.winner.color() == Some(color)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GameEvent {
    GameStart {
        board: Board,
        cpu_rank: Rank,
        human_color: Color,
    },
    TurnStart {
        board: Board,
        player: Color,
        turn_number: u32,
    },
    MoveMade {
        board: Board,
        player: Color,
        position: Position,
        flipped: Vec<Position>,
        execution_time_ms: u64,
    },
    Pass {
        player: Color,
    },
    PlayerError {
        error: String,
        kind: ErrorKind,
    },
    GameEnd {
        board: Board,
        result: MatchResult,
    },
}

impl GameEvent {
    pub fn is_game_end(&self) -> bool {
        matches!(self, GameEvent::GameEnd { .. })
    }
}
