use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Contents of one square.
pub type Cell = Option<Color>;

/// Dense 8x8 board, the canonical representation used by the rules engine.
///
/// Boards are plain values: rule functions never mutate their input and
/// always return a fresh board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The standard opening: white on (3,3) and (4,4), black on (3,4) and (4,3).
    pub fn initial() -> Self {
        let mut b = Self::empty();
        b.cells[3][3] = Some(Color::White);
        b.cells[3][4] = Some(Color::Black);
        b.cells[4][3] = Some(Color::Black);
        b.cells[4][4] = Some(Color::White);
        b
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Parse the text format used in tests: eight rows of `.`, `B` or `W`
    /// (`X`/`O` are accepted as aliases). Whitespace is ignored.
    pub fn from_text(text: &str) -> Result<Self, String> {
        let squares: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if squares.len() != NUM_SQUARES {
            return Err(format!(
                "expected {NUM_SQUARES} squares, found {}",
                squares.len()
            ));
        }
        let mut b = Self::empty();
        for (i, ch) in squares.into_iter().enumerate() {
            let cell = match ch {
                '.' | '-' => None,
                'B' | 'b' | 'X' | 'x' => Some(Color::Black),
                'W' | 'w' | 'O' | 'o' => Some(Color::White),
                other => return Err(format!("invalid square character: {other:?}")),
            };
            b.cells[i / BOARD_SIZE][i % BOARD_SIZE] = cell;
        }
        Ok(b)
    }

    /// Returns `None` for off-board coordinates.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if pos.is_on_board() {
            Some(self.cells[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    /// Panics on off-board coordinates.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row as usize][pos.col as usize]
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row as usize][pos.col as usize] = cell;
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Iterate all squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &cell)| (Position::new(r as u8, c as u8), cell))
        })
    }

    pub fn count(&self) -> StoneCount {
        let mut sc = StoneCount::default();
        for (_, cell) in self.squares() {
            match cell {
                Some(Color::Black) => sc.black += 1,
                Some(Color::White) => sc.white += 1,
                None => {}
            }
        }
        sc
    }

    pub fn empty_count(&self) -> u32 {
        NUM_SQUARES as u32 - self.count().total()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Some(Color::Black) => 'B',
                    Some(Color::White) => 'W',
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
