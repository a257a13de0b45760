//! Classical Othello Engines
//!
//! Heuristic CPU opponents for ranks C, A and S:
//! - [`GreedyEngine`]: one-ply lookahead with corner-aware scoring
//! - [`MinimaxEngine`]: depth-3 alpha-beta on the dense board
//! - [`MasterEngine`]: bitboard alpha-beta with adaptive endgame depth

mod eval;
mod master;
mod search;

use std::time::Instant;

use othello_core::{require_moves, Board, Color, Engine, EngineError, PackedBoard, SearchResult};
use tracing::debug;

/// Rank C. Plays the move that looks best right now.
#[derive(Debug, Clone, Default)]
pub struct GreedyEngine {
    /// Node counter for statistics
    nodes: u64,
}

impl GreedyEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for GreedyEngine {
    fn search(&mut self, board: &Board, color: Color) -> Result<SearchResult, EngineError> {
        let moves = require_moves(board, color)?;
        self.nodes = 0;
        let start = Instant::now();

        let (best_move, score) = search::pick_greedy_move(board, color, &moves, &mut self.nodes)?
            .ok_or(EngineError::NoLegalMoves(color))?;

        debug!(
            engine = self.name(),
            %best_move,
            score,
            depth = 1,
            nodes = self.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score,
            depth: 1,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "Apprentice"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Rank A. Fixed-depth minimax with alpha-beta pruning.
#[derive(Debug, Clone)]
pub struct MinimaxEngine {
    depth: u8,
    nodes: u64,
}

impl MinimaxEngine {
    pub const DEFAULT_DEPTH: u8 = 3;

    pub fn new() -> Self {
        Self::with_depth(Self::DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth: depth.max(1),
            nodes: 0,
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, board: &Board, color: Color) -> Result<SearchResult, EngineError> {
        let moves = require_moves(board, color)?;
        self.nodes = 0;
        let start = Instant::now();

        let (best_move, score) =
            search::pick_best_move(board, color, &moves, self.depth, &mut self.nodes)?
                .ok_or(EngineError::NoLegalMoves(color))?;

        debug!(
            engine = self.name(),
            %best_move,
            score,
            depth = self.depth,
            nodes = self.nodes,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score,
            depth: self.depth,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "Expert"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

/// Rank S. Searches the packed board, five plies in the midgame and close
/// to exhaustively once a dozen squares remain.
#[derive(Debug, Clone, Default)]
pub struct MasterEngine {
    nodes: u64,
}

impl MasterEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }
}

impl Engine for MasterEngine {
    fn search(&mut self, board: &Board, color: Color) -> Result<SearchResult, EngineError> {
        let moves = require_moves(board, color)?;
        self.nodes = 0;
        let start = Instant::now();

        let packed = PackedBoard::from_board(board);
        let depth = master::adaptive_depth(packed.empty_count());

        let (best_move, score) =
            master::pick_master_move(packed, color, &moves, depth, &mut self.nodes)
                .ok_or(EngineError::NoLegalMoves(color))?;

        debug!(
            engine = self.name(),
            %best_move,
            score,
            depth,
            nodes = self.nodes,
            empty = packed.empty_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "Master"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}

// Re-export for direct use if needed
pub use eval::{
    count_stable_discs, evaluate_advanced, evaluate_material, evaluate_positional,
    evaluate_with_corners, POSITION_WEIGHTS,
};
pub use master::{adaptive_depth, ENDGAME_EMPTY_SQUARES, MIDGAME_DEPTH};
