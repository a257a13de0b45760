//! Static position evaluation
//!
//! Every function scores a board from `perspective`'s point of view:
//! positive is good for `perspective`, negative is good for the opponent.

use othello_core::{legal_moves, Board, Color, Position, BOARD_SIZE};

/// Square weights: corners are prized, the squares next to them are traps.
pub const POSITION_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [100, -20, 10, 5, 5, 10, -20, 100],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [5, -2, 1, 0, 0, 1, -2, 5],
    [10, -2, 1, 1, 1, 1, -2, 10],
    [-20, -50, -2, -2, -2, -2, -50, -20],
    [100, -20, 10, 5, 5, 10, -20, 100],
];

const CORNERS: [Position; 4] = [
    Position::new(0, 0),
    Position::new(0, 7),
    Position::new(7, 0),
    Position::new(7, 7),
];

/// The three squares touching each corner, in `CORNERS` order.
const CORNER_ADJACENT: [[Position; 3]; 4] = [
    [Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)],
    [Position::new(0, 6), Position::new(1, 6), Position::new(1, 7)],
    [Position::new(6, 0), Position::new(6, 1), Position::new(7, 1)],
    [Position::new(6, 6), Position::new(6, 7), Position::new(7, 6)],
];

const CORNER_BONUS: i32 = 100;
const CORNER_ADJACENT_PENALTY: i32 = 50;
const MOBILITY_WEIGHT: i32 = 5;
const ADVANCED_MOBILITY_WEIGHT: i32 = 8;
const STABLE_WEIGHT: i32 = 15;
const ENDGAME_MATERIAL_WEIGHT: i32 = 20;

/// +1 for `perspective`, -1 for the opponent, 0 for empty.
#[inline]
fn sign(cell: Option<Color>, perspective: Color) -> i32 {
    match cell {
        Some(c) if c == perspective => 1,
        Some(_) => -1,
        None => 0,
    }
}

fn weighted_squares(board: &Board, perspective: Color) -> i32 {
    board
        .squares()
        .map(|(pos, cell)| {
            sign(cell, perspective) * POSITION_WEIGHTS[pos.row as usize][pos.col as usize]
        })
        .sum()
}

fn mobility(board: &Board, perspective: Color) -> i32 {
    let own = legal_moves(board, perspective).len() as i32;
    let opp = legal_moves(board, perspective.other()).len() as i32;
    own - opp
}

/// Stone-count difference.
pub fn evaluate_material(board: &Board, perspective: Color) -> i32 {
    board.count().diff(perspective)
}

/// Square weights plus a mobility term.
pub fn evaluate_positional(board: &Board, perspective: Color) -> i32 {
    weighted_squares(board, perspective) + MOBILITY_WEIGHT * mobility(board, perspective)
}

/// Material plus corner ownership, with X/C-square penalties while the
/// corresponding corner is still open.
pub fn evaluate_with_corners(board: &Board, perspective: Color) -> i32 {
    let mut score = evaluate_material(board, perspective);

    for (corner, adjacent) in CORNERS.iter().zip(CORNER_ADJACENT.iter()) {
        let owner = board.cell(*corner);
        score += CORNER_BONUS * sign(owner, perspective);

        // An occupied corner makes its neighbours harmless.
        if owner.is_none() {
            for &pos in adjacent {
                score -= CORNER_ADJACENT_PENALTY * sign(board.cell(pos), perspective);
            }
        }
    }

    score
}

/// Composite evaluation used by the strongest rank.
///
/// Mobility only counts before 50 stones are down; past 54 stones raw
/// material takes over as the dominant term.
pub fn evaluate_advanced(board: &Board, perspective: Color) -> i32 {
    let total = board.count().total();
    let mut score = weighted_squares(board, perspective);

    score += STABLE_WEIGHT
        * (count_stable_discs(board, perspective) as i32
            - count_stable_discs(board, perspective.other()) as i32);

    if total < 50 {
        score += ADVANCED_MOBILITY_WEIGHT * mobility(board, perspective);
    }

    if total > 54 {
        score += ENDGAME_MATERIAL_WEIGHT * evaluate_material(board, perspective);
    }

    score
}

/// Corner-anchored edge runs owned by `color`.
///
/// This is an approximation of stability: each owned corner counts, plus
/// the unbroken run of `color` along its row and along its column. A disc
/// reachable from two corners is counted twice.
pub fn count_stable_discs(board: &Board, color: Color) -> u32 {
    let mut count = 0;

    for corner in CORNERS {
        if board.cell(corner) != Some(color) {
            continue;
        }
        count += 1;

        let dr: i8 = if corner.row == 0 { 1 } else { -1 };
        let dc: i8 = if corner.col == 0 { 1 } else { -1 };

        for (step_r, step_c) in [(0, dc), (dr, 0)] {
            let mut cur = corner.step(step_r, step_c);
            while let Some(pos) = cur {
                if board.cell(pos) != Some(color) {
                    break;
                }
                count += 1;
                cur = pos.step(step_r, step_c);
            }
        }
    }

    count
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
