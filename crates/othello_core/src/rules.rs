//! Dense-board rules: legality, flips, move application and game end.
//!
//! This module is the authority on legality. The packed engine in
//! [`crate::bitboard`] must agree with it square for square.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Board;
use crate::types::*;

/// Ray directions as (row delta, col delta): NW, N, NE, W, E, SW, S, SE.
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("Invalid move: {position} for {color}")]
    InvalidMove { position: Position, color: Color },
}

/// Outcome of a single placement. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub board: Board,
    pub position: Position,
    pub flipped: Vec<Position>,
    pub player: Color,
}

/// Opponent stones captured in a single direction, or empty if the run is
/// not closed by one of `color`'s stones. Does not check that `pos` is empty.
pub fn flips_toward(board: &Board, pos: Position, color: Color, dr: i8, dc: i8) -> Vec<Position> {
    let opponent = Some(color.other());
    let mut run = Vec::new();
    let mut cur = pos.step(dr, dc);
    while let Some(p) = cur {
        if board.cell(p) != opponent {
            break;
        }
        run.push(p);
        cur = p.step(dr, dc);
    }
    match cur {
        Some(end) if !run.is_empty() && board.cell(end) == Some(color) => run,
        _ => Vec::new(),
    }
}

/// All stones that placing `color` at `pos` would flip, grouped by direction
/// in [`DIRECTIONS`] order. Empty when `pos` is off-board or occupied.
pub fn flips(board: &Board, pos: Position, color: Color) -> Vec<Position> {
    if board.get(pos) != Some(None) {
        return Vec::new();
    }
    DIRECTIONS
        .iter()
        .flat_map(|&(dr, dc)| flips_toward(board, pos, color, dr, dc))
        .collect()
}

pub fn is_legal_move(board: &Board, pos: Position, color: Color) -> bool {
    if board.get(pos) != Some(None) {
        return false;
    }
    DIRECTIONS
        .iter()
        .any(|&(dr, dc)| !flips_toward(board, pos, color, dr, dc).is_empty())
}

/// Legal placements for `color` in row-major order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Position> {
    let mut moves = Vec::with_capacity(32);
    for row in 0..BOARD_SIZE as u8 {
        for col in 0..BOARD_SIZE as u8 {
            let pos = Position::new(row, col);
            if is_legal_move(board, pos, color) {
                moves.push(pos);
            }
        }
    }
    moves
}

pub fn has_legal_move(board: &Board, color: Color) -> bool {
    board
        .squares()
        .any(|(pos, cell)| cell.is_none() && is_legal_move(board, pos, color))
}

/// Place `color` at `pos` and flip every captured stone.
///
/// The input board is untouched; a placement that flips nothing is rejected
/// rather than silently ignored.
pub fn apply_move(board: &Board, pos: Position, color: Color) -> Result<MoveResult, RulesError> {
    let flipped = flips(board, pos, color);
    if flipped.is_empty() {
        return Err(RulesError::InvalidMove {
            position: pos,
            color,
        });
    }

    let mut next = *board;
    next.set(pos, Some(color));
    for &p in &flipped {
        next.set(p, Some(color));
    }

    Ok(MoveResult {
        board: next,
        position: pos,
        flipped,
        player: color,
    })
}

/// True when neither side can move.
pub fn is_terminal(board: &Board) -> bool {
    !has_legal_move(board, Color::Black) && !has_legal_move(board, Color::White)
}

pub fn score(board: &Board) -> StoneCount {
    board.count()
}

pub fn winner(board: &Board) -> Winner {
    score(board).winner()
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
