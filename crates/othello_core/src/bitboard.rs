//! Bitboard representation and operations for high-performance search.
//!
//! A bitboard is a 64-bit integer where each bit represents a square.
//! Bit 0 = (0,0) top-left, bit 7 = (0,7) top-right, bit 63 = (7,7).
//! In general bit index = row * 8 + col.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::board::Board;
use crate::types::*;

/// A set of squares on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const ALL: Bitboard = Bitboard(!0);

    // Columns
    pub const FILE_A: Bitboard = Bitboard(0x0101010101010101);
    pub const FILE_H: Bitboard = Bitboard(0x8080808080808080);

    // Rows
    pub const ROW_TOP: Bitboard = Bitboard(0x00000000000000FF);
    pub const ROW_BOTTOM: Bitboard = Bitboard(0xFF00000000000000);

    // Useful masks
    pub const NOT_FILE_A: Bitboard = Bitboard(!0x0101010101010101);
    pub const NOT_FILE_H: Bitboard = Bitboard(!0x8080808080808080);
    pub const CORNERS: Bitboard = Bitboard(0x8100000000000081);

    /// One square.
    #[inline(always)]
    pub const fn from_square(sq: u8) -> Self {
        Bitboard(1u64 << sq)
    }

    #[inline(always)]
    pub fn from_position(pos: Position) -> Self {
        Self::from_square(pos.index())
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn contains(self, sq: u8) -> bool {
        self.0 >> sq & 1 == 1
    }

    #[inline(always)]
    pub fn set(&mut self, sq: u8) {
        *self |= Self::from_square(sq);
    }

    /// Number of squares in the set.
    #[inline(always)]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest square index in the set.
    #[inline(always)]
    pub const fn lsb(self) -> Option<u8> {
        match self.0 {
            0 => None,
            bits => Some(bits.trailing_zeros() as u8),
        }
    }

    /// Board coordinate of the lowest set bit.
    #[inline(always)]
    pub fn lsb_position(self) -> Option<Position> {
        self.lsb().map(Position::from_index)
    }

    /// Remove and return the lowest square index.
    #[inline(always)]
    pub fn pop_lsb(&mut self) -> Option<u8> {
        let sq = self.lsb()?;
        self.0 &= self.0 - 1;
        Some(sq)
    }

    /// Set squares as positions, ascending bit order (row-major).
    pub fn positions(self) -> Vec<Position> {
        self.map(Position::from_index).collect()
    }

    /// Shift toward row 0.
    #[inline(always)]
    pub const fn north(self) -> Bitboard {
        Bitboard(self.0 >> 8)
    }

    /// Shift toward row 7.
    #[inline(always)]
    pub const fn south(self) -> Bitboard {
        Bitboard(self.0 << 8)
    }

    /// Shift toward column 7, masking out wrapping.
    #[inline(always)]
    pub const fn east(self) -> Bitboard {
        Bitboard((self.0 << 1) & Self::NOT_FILE_A.0)
    }

    /// Shift toward column 0, masking out wrapping.
    #[inline(always)]
    pub const fn west(self) -> Bitboard {
        Bitboard((self.0 >> 1) & Self::NOT_FILE_H.0)
    }

    #[inline(always)]
    pub const fn north_east(self) -> Bitboard {
        Bitboard((self.0 >> 7) & Self::NOT_FILE_A.0)
    }

    #[inline(always)]
    pub const fn north_west(self) -> Bitboard {
        Bitboard((self.0 >> 9) & Self::NOT_FILE_H.0)
    }

    #[inline(always)]
    pub const fn south_east(self) -> Bitboard {
        Bitboard((self.0 << 9) & Self::NOT_FILE_A.0)
    }

    #[inline(always)]
    pub const fn south_west(self) -> Bitboard {
        Bitboard((self.0 << 7) & Self::NOT_FILE_H.0)
    }

    #[inline(always)]
    pub const fn shift(self, dir: Direction) -> Bitboard {
        match dir {
            Direction::NorthWest => self.north_west(),
            Direction::North => self.north(),
            Direction::NorthEast => self.north_east(),
            Direction::West => self.west(),
            Direction::East => self.east(),
            Direction::SouthWest => self.south_west(),
            Direction::South => self.south(),
            Direction::SouthEast => self.south_east(),
        }
    }
}

/// The eight shift directions, in the same order as [`crate::rules::DIRECTIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// (row delta, col delta)
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::SouthWest => (1, -1),
            Direction::South => (1, 0),
            Direction::SouthEast => (1, 1),
        }
    }
}

macro_rules! bit_ops {
    ($($op:ident :: $f:ident, $assign:ident :: $fa:ident => $sym:tt;)*) => {$(
        impl $op for Bitboard {
            type Output = Self;
            #[inline(always)]
            fn $f(self, rhs: Self) -> Self {
                Bitboard(self.0 $sym rhs.0)
            }
        }

        impl $assign for Bitboard {
            #[inline(always)]
            fn $fa(&mut self, rhs: Self) {
                *self = $op::$f(*self, rhs);
            }
        }
    )*};
}

bit_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign => &;
    BitOr::bitor, BitOrAssign::bitor_assign => |;
    BitXor::bitxor, BitXorAssign::bitxor_assign => ^;
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self {
        Bitboard(!self.0)
    }
}

/// Yields square indices, lowest first, consuming the set.
impl Iterator for Bitboard {
    type Item = u8;

    #[inline(always)]
    fn next(&mut self) -> Option<u8> {
        self.pop_lsb()
    }
}

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            for col in 0..8u8 {
                let ch = if self.contains(row * 8 + col) { '#' } else { '.' };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Both colors packed into one mask each. The masks never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackedBoard {
    pub black: Bitboard,
    pub white: Bitboard,
}

impl PackedBoard {
    pub fn initial() -> Self {
        Self::from_board(&Board::initial())
    }

    pub fn from_board(board: &Board) -> Self {
        let mut packed = PackedBoard {
            black: Bitboard::EMPTY,
            white: Bitboard::EMPTY,
        };
        for (pos, cell) in board.squares() {
            match cell {
                Some(Color::Black) => packed.black.set(pos.index()),
                Some(Color::White) => packed.white.set(pos.index()),
                None => {}
            }
        }
        packed
    }

    pub fn to_board(&self) -> Board {
        let mut board = Board::empty();
        for sq in self.black {
            board.set(Position::from_index(sq), Some(Color::Black));
        }
        for sq in self.white {
            board.set(Position::from_index(sq), Some(Color::White));
        }
        board
    }

    #[inline(always)]
    pub fn discs(&self, color: Color) -> Bitboard {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    #[inline(always)]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline(always)]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    pub fn empty_count(&self) -> u32 {
        self.empty().popcount()
    }

    pub fn count(&self) -> StoneCount {
        StoneCount {
            black: self.black.popcount(),
            white: self.white.popcount(),
        }
    }

    /// Landing squares for `color` along a single direction.
    #[inline]
    pub fn legal_moves_toward(&self, dir: Direction, color: Color) -> Bitboard {
        let mine = self.discs(color);
        let opp = self.discs(color.other());
        let empty = self.empty();

        let mut moves = Bitboard::EMPTY;
        let mut candidates = mine.shift(dir) & opp;
        while !candidates.is_empty() {
            candidates = candidates.shift(dir);
            moves |= candidates & empty;
            candidates &= opp;
        }
        moves
    }

    pub fn legal_moves(&self, color: Color) -> Bitboard {
        Direction::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | self.legal_moves_toward(dir, color))
    }

    /// Opponent stones captured along `dir` by `color` placing at `pos`.
    #[inline]
    pub fn flips_toward(&self, dir: Direction, pos: Position, color: Color) -> Bitboard {
        let mine = self.discs(color);
        let opp = self.discs(color.other());

        let mut run = Bitboard::EMPTY;
        let mut candidates = Bitboard::from_position(pos).shift(dir) & opp;
        while !candidates.is_empty() {
            run |= candidates;
            let next = candidates.shift(dir);
            if !(next & mine).is_empty() {
                return run;
            }
            candidates = next & opp;
        }
        Bitboard::EMPTY
    }

    /// All stones flipped by `color` placing at `pos`. Empty for occupied squares.
    pub fn flips(&self, pos: Position, color: Color) -> Bitboard {
        if self.occupied().contains(pos.index()) {
            return Bitboard::EMPTY;
        }
        Direction::ALL
            .iter()
            .fold(Bitboard::EMPTY, |acc, &dir| acc | self.flips_toward(dir, pos, color))
    }

    /// Place a stone without a legality check. Search only calls this with
    /// squares taken from [`PackedBoard::legal_moves`].
    pub fn apply_move(&self, pos: Position, color: Color) -> PackedBoard {
        debug_assert!(!self.occupied().contains(pos.index()));
        let placed = Bitboard::from_position(pos);
        let flipped = self.flips(pos, color);

        let mine = self.discs(color) | placed | flipped;
        let opp = self.discs(color.other()) & !flipped;

        match color {
            Color::Black => PackedBoard {
                black: mine,
                white: opp,
            },
            Color::White => PackedBoard {
                black: opp,
                white: mine,
            },
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.legal_moves(Color::Black).is_empty() && self.legal_moves(Color::White).is_empty()
    }
}

impl From<&Board> for PackedBoard {
    fn from(board: &Board) -> Self {
        PackedBoard::from_board(board)
    }
}

impl From<PackedBoard> for Board {
    fn from(packed: PackedBoard) -> Self {
        packed.to_board()
    }
}

#[cfg(test)]
#[path = "bitboard_tests.rs"]
mod bitboard_tests;
