//! Turn loop for a human script against a CPU rank
//!
//! The loop alternates colors, black first. The human side runs
//! through the sandbox, the CPU side on tokio's blocking pool, and the
//! dense rules engine decides legality and game end. Every step is reported
//! as a [`GameEvent`].

use std::time::{Duration, Instant};

use othello_core::{apply_move, has_legal_move, is_terminal, Board, Color, Engine, EngineError};
use script_sandbox::{ErrorKind, Sandbox, SandboxResult};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::events::{GameEvent, MatchResult};
use crate::rank::Rank;

/// One match, owned end to end: board, CPU engine and sandbox limits.
pub struct GameController {
    config: ArenaConfig,
    sandbox: Sandbox,
    source: String,
    rank: Rank,
    cpu: Box<dyn Engine>,
    start: Board,
}

impl GameController {
    pub fn new(source: impl Into<String>, rank: Rank, config: ArenaConfig) -> Self {
        Self::with_engine(source, rank, rank.create_engine(), config)
    }

    /// Use a specific engine for the CPU side, e.g. a seeded one.
    pub fn with_engine(
        source: impl Into<String>,
        rank: Rank,
        cpu: Box<dyn Engine>,
        config: ArenaConfig,
    ) -> Self {
        Self {
            sandbox: Sandbox::new(config.sandbox.clone()),
            config,
            source: source.into(),
            rank,
            cpu,
            start: Board::initial(),
        }
    }

    /// Start from `board` instead of the standard opening. Black moves first.
    pub fn starting_from(mut self, board: Board) -> Self {
        self.start = board;
        self
    }

    /// Start the match on the current runtime.
    pub fn spawn(self) -> MatchHandle {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (cancel, cancel_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(event_tx, cancel_rx));
        MatchHandle {
            events,
            cancel,
            task,
        }
    }

    /// Play the match to the end, a forfeit, or cancellation.
    ///
    /// Setting the watch flag or dropping the event receiver cancels the
    /// match at the next step; a pending script call is abandoned and stops
    /// at its own deadline.
    pub async fn run(
        self,
        events: mpsc::UnboundedSender<GameEvent>,
        cancel: watch::Receiver<bool>,
    ) -> Result<MatchResult, ArenaError> {
        let span = info_span!("match", rank = %self.rank, human = %self.config.human_color);
        self.play(events, cancel).instrument(span).await
    }

    async fn play(
        self,
        events: mpsc::UnboundedSender<GameEvent>,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<MatchResult, ArenaError> {
        let GameController {
            config,
            sandbox,
            source,
            rank,
            mut cpu,
            start,
        } = self;

        let human = config.human_color;
        let mut board = start;
        let mut to_move = Color::Black;
        let mut turns = 0u32;

        cpu.new_game();
        info!(cpu = cpu.name(), "match started");
        emit(
            &events,
            GameEvent::GameStart {
                board,
                cpu_rank: rank,
                human_color: human,
            },
        )?;

        while !is_terminal(&board) {
            check_cancelled(&cancel)?;

            if !has_legal_move(&board, to_move) {
                debug!(player = %to_move, "pass");
                emit(&events, GameEvent::Pass { player: to_move })?;
                to_move = to_move.other();
                continue;
            }

            emit(
                &events,
                GameEvent::TurnStart {
                    board,
                    player: to_move,
                    turn_number: turns + 1,
                },
            )?;

            let (played, execution_time_ms) = if to_move == human {
                let result = tokio::select! {
                    result = sandbox.execute(&source, &board, to_move) => result,
                    _ = cancelled(&mut cancel) => return Err(ArenaError::Cancelled),
                };

                match result {
                    SandboxResult::Success(success) => {
                        match apply_move(&board, success.position, to_move) {
                            Ok(played) => (played, success.execution_time_ms),
                            Err(_) => {
                                let error = format!(
                                    "Invalid move: {} is not a legal position",
                                    success.position
                                );
                                return forfeit(
                                    &events,
                                    &board,
                                    to_move,
                                    turns,
                                    error,
                                    ErrorKind::InvalidMove,
                                );
                            }
                        }
                    }
                    SandboxResult::Failure(failure) => {
                        return forfeit(&events, &board, to_move, turns, failure.message, failure.kind);
                    }
                }
            } else {
                pause(config.cpu_think_delay(), &mut cancel).await?;

                let search_start = Instant::now();
                let task = tokio::task::spawn_blocking(move || {
                    let result = cpu.search(&board, to_move);
                    (cpu, result)
                });
                let (engine, search) = tokio::select! {
                    joined = task => joined?,
                    _ = cancelled(&mut cancel) => return Err(ArenaError::Cancelled),
                };
                cpu = engine;

                let search = search?;
                let played = apply_move(&board, search.best_move, to_move).map_err(EngineError::from)?;
                (played, search_start.elapsed().as_millis() as u64)
            };

            turns += 1;
            board = played.board;
            debug!(
                player = %to_move,
                position = %played.position,
                flipped = played.flipped.len(),
                execution_time_ms,
                "move"
            );
            emit(
                &events,
                GameEvent::MoveMade {
                    board,
                    player: to_move,
                    position: played.position,
                    flipped: played.flipped,
                    execution_time_ms,
                },
            )?;

            to_move = to_move.other();
            pause(config.turn_delay(), &mut cancel).await?;
        }

        let result = MatchResult::finished(board.count(), turns);
        info!(
            winner = %result.winner,
            black = result.black_score,
            white = result.white_score,
            turns,
            "match finished"
        );
        // A consumer that already left does not change the result.
        let _ = events.send(GameEvent::GameEnd {
            board,
            result: result.clone(),
        });
        Ok(result)
    }
}

/// A running match: its events, a cancel switch and the final result.
pub struct MatchHandle {
    pub events: mpsc::UnboundedReceiver<GameEvent>,
    cancel: watch::Sender<bool>,
    task: JoinHandle<Result<MatchResult, ArenaError>>,
}

impl MatchHandle {
    pub async fn next_event(&mut self) -> Option<GameEvent> {
        self.events.recv().await
    }

    pub fn cancel(&self) {
        // The match may already be over; nothing to cancel then.
        let _ = self.cancel.send(true);
    }

    pub async fn join(self) -> Result<MatchResult, ArenaError> {
        self.task.await?
    }
}

fn emit(events: &mpsc::UnboundedSender<GameEvent>, event: GameEvent) -> Result<(), ArenaError> {
    events.send(event).map_err(|_| ArenaError::Cancelled)
}

/// End the match with `loser` forfeiting on the current board.
fn forfeit(
    events: &mpsc::UnboundedSender<GameEvent>,
    board: &Board,
    loser: Color,
    turns: u32,
    error: String,
    kind: ErrorKind,
) -> Result<MatchResult, ArenaError> {
    warn!(%kind, %error, player = %loser, "forfeit");
    emit(events, GameEvent::PlayerError { error, kind })?;

    let result = MatchResult::forfeited(loser, board.count(), turns);
    let _ = events.send(GameEvent::GameEnd {
        board: *board,
        result: result.clone(),
    });
    Ok(result)
}

fn check_cancelled(cancel: &watch::Receiver<bool>) -> Result<(), ArenaError> {
    if *cancel.borrow() {
        return Err(ArenaError::Cancelled);
    }
    Ok(())
}

/// Resolves once the cancel flag is set. Never resolves if the sender is
/// gone without cancelling.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|&flag| flag).await.is_err() {
        std::future::pending::<()>().await;
    }
}

async fn pause(duration: Duration, cancel: &mut watch::Receiver<bool>) -> Result<(), ArenaError> {
    if duration.is_zero() {
        return check_cancelled(cancel);
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => Ok(()),
        _ = cancelled(cancel) => Err(ArenaError::Cancelled),
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
