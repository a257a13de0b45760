use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    pub fn other(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Tag handed to user scripts and written to event logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Color::Black),
            "white" | "w" => Ok(Color::White),
            other => Err(format!("unknown color: {other}")),
        }
    }
}

/// A board coordinate. Row 0 is the top edge, column 0 the left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "[u8; 2]", from = "[u8; 2]")]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Checked constructor from signed coordinates, used when walking rays.
    pub fn from_signed(row: i8, col: i8) -> Option<Self> {
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn from_index(idx: u8) -> Self {
        Self::new(idx / 8, idx % 8)
    }

    pub fn is_on_board(self) -> bool {
        (self.row as usize) < BOARD_SIZE && (self.col as usize) < BOARD_SIZE
    }

    /// Bit index in a packed board: `row * 8 + col`.
    pub fn index(self) -> u8 {
        self.row * 8 + self.col
    }

    pub fn step(self, dr: i8, dc: i8) -> Option<Self> {
        Self::from_signed(self.row as i8 + dr, self.col as i8 + dc)
    }
}

impl From<Position> for [u8; 2] {
    fn from(p: Position) -> Self {
        [p.row, p.col]
    }
}

impl From<[u8; 2]> for Position {
    fn from([row, col]: [u8; 2]) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoneCount {
    pub black: u32,
    pub white: u32,
}

impl StoneCount {
    pub fn of(self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub fn total(self) -> u32 {
        self.black + self.white
    }

    /// Own stones minus opponent stones.
    pub fn diff(self, perspective: Color) -> i32 {
        self.of(perspective) as i32 - self.of(perspective.other()) as i32
    }

    pub fn winner(self) -> Winner {
        if self.black > self.white {
            Winner::Black
        } else if self.white > self.black {
            Winner::White
        } else {
            Winner::Draw
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl Winner {
    pub fn color(self) -> Option<Color> {
        match self {
            Winner::Black => Some(Color::Black),
            Winner::White => Some(Color::White),
            Winner::Draw => None,
        }
    }
}

impl From<Color> for Winner {
    fn from(c: Color) -> Self {
        match c {
            Color::Black => Winner::Black,
            Color::White => Winner::White,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Black => f.write_str("black"),
            Winner::White => f.write_str("white"),
            Winner::Draw => f.write_str("draw"),
        }
    }
}
