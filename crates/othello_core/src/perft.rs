use crate::{
    bitboard::PackedBoard,
    board::Board,
    rules::{apply_move, legal_moves},
    types::{Color, Position},
};

/// Pure perft leaf count from `board` with `color` to move.
///
/// A side without moves passes, which costs one ply; a second consecutive
/// pass ends the game and counts as a leaf.
pub fn perft(board: &Board, color: Color, depth: u8) -> u64 {
    fn inner(board: &Board, color: Color, depth: u8, passed: bool) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = legal_moves(board, color);
        if moves.is_empty() {
            if passed {
                return 1;
            }
            return inner(board, color.other(), depth - 1, true);
        }

        let mut nodes = 0u64;
        for mv in moves {
            if let Ok(result) = apply_move(board, mv, color) {
                nodes += inner(&result.board, color.other(), depth - 1, false);
            }
        }
        nodes
    }

    inner(board, color, depth, false)
}

/// Same count as [`perft`] on the packed representation.
pub fn perft_packed(board: PackedBoard, color: Color, depth: u8) -> u64 {
    fn inner(board: PackedBoard, color: Color, depth: u8, passed: bool) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = board.legal_moves(color);
        if moves.is_empty() {
            if passed {
                return 1;
            }
            return inner(board, color.other(), depth - 1, true);
        }

        moves
            .map(|sq| {
                let next = board.apply_move(Position::from_index(sq), color);
                inner(next, color.other(), depth - 1, false)
            })
            .sum()
    }

    inner(board, color, depth, false)
}
