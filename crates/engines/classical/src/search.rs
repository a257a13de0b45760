//! One-ply greedy choice and fixed-depth minimax on the dense board

use othello_core::{apply_move, is_terminal, legal_moves, Board, Color, Position, RulesError};

use crate::eval::{evaluate_positional, evaluate_with_corners};

/// Picks the move whose resulting position scores best for the mover under
/// the corner-aware evaluation. Ties go to the first move in row-major order.
///
/// Returns `None` when `moves` is empty.
pub fn pick_greedy_move(
    board: &Board,
    color: Color,
    moves: &[Position],
    nodes: &mut u64,
) -> Result<Option<(Position, i32)>, RulesError> {
    let mut best: Option<(Position, i32)> = None;

    for &mv in moves {
        let result = apply_move(board, mv, color)?;
        *nodes += 1;

        let score = evaluate_with_corners(&result.board, color);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    Ok(best)
}

/// Root of the dense minimax search.
///
/// Each root move is searched to `depth - 1` further plies; leaves are scored
/// by the positional evaluation from `color`'s point of view.
pub fn pick_best_move(
    board: &Board,
    color: Color,
    moves: &[Position],
    depth: u8,
    nodes: &mut u64,
) -> Result<Option<(Position, i32)>, RulesError> {
    let mut best: Option<(Position, i32)> = None;

    for &mv in moves {
        let result = apply_move(board, mv, color)?;
        *nodes += 1;

        let score = minimax(
            &result.board,
            color.other(),
            color,
            depth.saturating_sub(1),
            i32::MIN,
            i32::MAX,
            nodes,
        )?;

        if best.map_or(true, |(_, s)| score > s) {
            best = Some((mv, score));
        }
    }

    Ok(best)
}

/// Alpha-beta minimax with a fixed maximizing side.
///
/// A side without moves passes: the search goes one ply deeper with the
/// other side to move instead of treating the node as a leaf.
fn minimax(
    board: &Board,
    to_move: Color,
    maximizing: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> Result<i32, RulesError> {
    if depth == 0 || is_terminal(board) {
        return Ok(evaluate_positional(board, maximizing));
    }

    let moves = legal_moves(board, to_move);
    let next = to_move.other();

    if moves.is_empty() {
        return minimax(board, next, maximizing, depth - 1, alpha, beta, nodes);
    }

    if to_move == maximizing {
        let mut best = i32::MIN;
        for mv in moves {
            let result = apply_move(board, mv, to_move)?;
            *nodes += 1;
            let score = minimax(&result.board, next, maximizing, depth - 1, alpha, beta, nodes)?;
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break; // Beta cutoff
            }
        }
        Ok(best)
    } else {
        let mut best = i32::MAX;
        for mv in moves {
            let result = apply_move(board, mv, to_move)?;
            *nodes += 1;
            let score = minimax(&result.board, next, maximizing, depth - 1, alpha, beta, nodes)?;
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break; // Alpha cutoff
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
