pub mod bitboard;
pub mod board;
pub mod perft;
pub mod rules;
pub mod types;

// Re-export core game logic (not engine-specific)
pub use bitboard::*;
pub use board::*;
pub use perft::{perft, perft_packed};
pub use rules::*;
pub use types::*;

use thiserror::Error;

// =============================================================================
// Engine trait, implemented by every CPU rank
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move
    pub best_move: Position,
    /// Evaluation of the chosen move from the mover's perspective
    pub score: i32,
    /// Search depth in plies (1 for one-ply strategies)
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The caller asked for a move when the mover has to pass.
    #[error("No valid moves available for {0}")]
    NoLegalMoves(Color),

    /// The search tried to play a move the rules reject. Always a bug.
    #[error("Engine inconsistency: {0}")]
    Rules(#[from] RulesError),
}

/// Trait that all CPU opponents implement.
///
/// Engines are deterministic given (board, color) unless they are explicitly
/// randomized, and never touch I/O. Asking for a move when `color` has no
/// legal move is a contract violation reported as [`EngineError::NoLegalMoves`].
pub trait Engine: Send {
    /// Pick a move for `color` on `board`.
    fn search(&mut self, board: &Board, color: Color) -> Result<SearchResult, EngineError>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}

/// Legal moves for `color`, or the contract-violation error when there are none.
pub fn require_moves(board: &Board, color: Color) -> Result<Vec<Position>, EngineError> {
    let moves = legal_moves(board, color);
    if moves.is_empty() {
        return Err(EngineError::NoLegalMoves(color));
    }
    Ok(moves)
}
