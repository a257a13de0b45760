//! Bitboard alpha-beta search with an exact endgame phase

use othello_core::{Color, PackedBoard, Position};

use crate::eval::evaluate_advanced;

/// Plies searched while more than [`ENDGAME_EMPTY_SQUARES`] remain.
pub const MIDGAME_DEPTH: u8 = 5;
/// Empty-square count at which the search switches to endgame mode.
pub const ENDGAME_EMPTY_SQUARES: u32 = 12;
/// Cap on the endgame search depth.
pub const MAX_ENDGAME_DEPTH: u8 = 10;
/// Scale applied to the disc difference at exact endgame leaves.
const EXACT_DISC_WEIGHT: i32 = 100;

/// Search depth for a position with `empty` open squares.
pub fn adaptive_depth(empty: u32) -> u8 {
    if empty <= ENDGAME_EMPTY_SQUARES {
        empty.min(MAX_ENDGAME_DEPTH as u32) as u8
    } else {
        MIDGAME_DEPTH
    }
}

/// Root of the packed search. `moves` must be legal for `color` on `board`.
pub fn pick_master_move(
    board: PackedBoard,
    color: Color,
    moves: &[Position],
    depth: u8,
    nodes: &mut u64,
) -> Option<(Position, i32)> {
    let empty = board.empty_count();
    let mut best: Option<(Position, i32)> = None;

    for &mv in moves {
        let child = board.apply_move(mv, color);
        *nodes += 1;

        let score = minimax(
            child,
            color.other(),
            color,
            depth.saturating_sub(1),
            i32::MIN,
            i32::MAX,
            empty.saturating_sub(1),
            nodes,
        );

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    best
}

#[allow(clippy::too_many_arguments)]
fn minimax(
    board: PackedBoard,
    to_move: Color,
    maximizing: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    empty: u32,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 || board.is_game_over() {
        if empty <= ENDGAME_EMPTY_SQUARES && depth == 0 {
            return board.count().diff(maximizing) * EXACT_DISC_WEIGHT;
        }
        return evaluate_advanced(&board.to_board(), maximizing);
    }

    let moves = board.legal_moves(to_move);
    let next = to_move.other();

    // Pass: same stone count, one ply deeper.
    if moves.is_empty() {
        return minimax(board, next, maximizing, depth - 1, alpha, beta, empty, nodes);
    }

    if to_move == maximizing {
        let mut best = i32::MIN;
        for sq in moves {
            let child = board.apply_move(Position::from_index(sq), to_move);
            *nodes += 1;
            let score = minimax(child, next, maximizing, depth - 1, alpha, beta, empty - 1, nodes);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for sq in moves {
            let child = board.apply_move(Position::from_index(sq), to_move);
            *nodes += 1;
            let score = minimax(child, next, maximizing, depth - 1, alpha, beta, empty - 1, nodes);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "master_tests.rs"]
mod master_tests;
