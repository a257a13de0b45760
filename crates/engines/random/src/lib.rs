//! Random Move Othello Engine
//!
//! Picks uniformly at random among the legal moves. This is the rank E
//! opponent and the baseline every other rank should beat.

use othello_core::{require_moves, Board, Color, Engine, EngineError, SearchResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// An engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move sequence, for tests and simulated series.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, board: &Board, color: Color) -> Result<SearchResult, EngineError> {
        let moves = require_moves(board, color)?;
        let best_move = *moves
            .choose(&mut self.rng)
            .ok_or(EngineError::NoLegalMoves(color))?;

        Ok(SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: 1,
        })
    }

    fn name(&self) -> &str {
        "Novice"
    }
}
