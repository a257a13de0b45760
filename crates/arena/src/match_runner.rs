//! Series runner for playing CPU engines against each other

use othello_core::{apply_move, has_legal_move, is_terminal, Board, Color, Engine, EngineError, Winner};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::events::MatchResult;
use crate::rank::Rank;

/// Configuration for a series
#[derive(Debug, Clone)]
pub struct SeriesConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Log every game result
    pub verbose: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            alternate_colors: true,
            verbose: true,
        }
    }
}

/// Result of a single game from the first engine's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

/// Tally of a series from the first engine's perspective
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl SeriesResult {
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// 1 for a win, 0.5 for a draw, 0 for a loss, averaged
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    /// Combine tallies, e.g. from parallel workers.
    pub fn merge(mut self, other: SeriesResult) -> SeriesResult {
        self.wins += other.wins;
        self.losses += other.losses;
        self.draws += other.draws;
        self
    }
}

/// Runs series between two engines
pub struct SeriesRunner {
    config: SeriesConfig,
}

impl SeriesRunner {
    pub fn new(config: SeriesConfig) -> Self {
        Self { config }
    }

    /// Run a series between two engines
    ///
    /// Returns the result from engine1's perspective. Engine1 plays black in
    /// the first game.
    pub fn run_series(
        &self,
        engine1: &mut dyn Engine,
        engine2: &mut dyn Engine,
    ) -> Result<SeriesResult, EngineError> {
        let mut result = SeriesResult::default();

        for game_num in 0..self.config.num_games {
            let engine1_black = !self.config.alternate_colors || game_num % 2 == 0;

            let game = if engine1_black {
                play_game(engine1, engine2)?
            } else {
                play_game(engine2, engine1)?
            };

            let engine1_color = if engine1_black { Color::Black } else { Color::White };
            let game_result = match game.winner {
                Winner::Draw => GameResult::Draw,
                w if w.color() == Some(engine1_color) => GameResult::Win,
                _ => GameResult::Loss,
            };
            result.record(game_result);

            if self.config.verbose {
                info!(
                    game = game_num + 1,
                    of = self.config.num_games,
                    engine1 = %engine1_color,
                    black = game.black_score,
                    white = game.white_score,
                    wins = result.wins,
                    losses = result.losses,
                    draws = result.draws,
                    "game finished"
                );
            }
        }

        Ok(result)
    }
}

/// Play one game to the end. Sides with no move pass; the game stops when
/// neither side can move.
pub fn play_game(black: &mut dyn Engine, white: &mut dyn Engine) -> Result<MatchResult, EngineError> {
    let mut board = Board::initial();
    let mut to_move = Color::Black;
    let mut turns = 0;
    black.new_game();
    white.new_game();

    while !is_terminal(&board) {
        if !has_legal_move(&board, to_move) {
            to_move = to_move.other();
            continue;
        }

        let engine: &mut dyn Engine = match to_move {
            Color::Black => &mut *black,
            Color::White => &mut *white,
        };
        let search = engine.search(&board, to_move)?;
        board = apply_move(&board, search.best_move, to_move)?.board;

        turns += 1;
        to_move = to_move.other();
    }

    Ok(MatchResult::finished(board.count(), turns))
}

/// Quick utility to run a series between two ranks
pub fn quick_series(rank1: Rank, rank2: Rank, num_games: u32) -> Result<SeriesResult, EngineError> {
    let config = SeriesConfig {
        num_games,
        verbose: false,
        ..Default::default()
    };
    let mut engine1 = rank1.create_engine();
    let mut engine2 = rank2.create_engine();
    SeriesRunner::new(config).run_series(engine1.as_mut(), engine2.as_mut())
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
