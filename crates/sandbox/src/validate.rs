//! Shape check on the value a strategy returns

use othello_core::{Position, BOARD_SIZE};
use rhai::{Dynamic, INT};

use crate::result::{ErrorKind, SandboxFailure};
use crate::ENTRY_POINT;

/// Accepts exactly `[row, col]` with both integers in `0..=7`.
///
/// Only the shape is checked here; whether the square is a legal move is
/// for the caller to decide.
pub fn validate_move(value: Dynamic) -> Result<Position, SandboxFailure> {
    let coords: Option<Vec<u8>> = value
        .clone()
        .into_array()
        .ok()
        .filter(|items| items.len() == 2)
        .and_then(|items| items.iter().map(coordinate).collect());

    match coords.as_deref() {
        Some(&[row, col]) => Ok(Position::new(row, col)),
        _ => Err(SandboxFailure::new(
            ErrorKind::InvalidReturn,
            format!(
                "{ENTRY_POINT}() must return [row, col] where row and col are integers 0-7, got: {value:?}"
            ),
        )),
    }
}

fn coordinate(item: &Dynamic) -> Option<u8> {
    let n = item.as_int().ok()?;
    (0..BOARD_SIZE as INT).contains(&n).then_some(n as u8)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
