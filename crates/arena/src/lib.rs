//! Battle arena for Code Reversi
//!
//! This crate provides infrastructure for:
//! - Running a player script against a CPU rank, turn by turn
//! - Streaming match events to a consumer
//! - Playing series between CPU ranks
//! - Tracking which ranks a player has unlocked
//!
//! # Usage
//!
//! ```bash
//! # Play a script against the rank C opponent
//! cargo run -p arena -- play --script demos/corner_hunter.rhai --rank C
//!
//! # Pit two ranks against each other
//! cargo run -p arena -- series --black master --white greedy --games 10
//! ```

mod config;
mod error;
mod events;
mod game;
mod match_runner;
mod progress;
mod rank;

pub use config::*;
pub use error::*;
pub use events::*;
pub use game::*;
pub use match_runner::*;
pub use progress::*;
pub use rank::*;
