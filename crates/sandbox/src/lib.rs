//! Script Sandbox
//!
//! Runs a user strategy written in Rhai against the current board:
//! compile, run in a fresh locked-down engine, then validate the returned
//! move. Every failure is reported as a [`SandboxFailure`] with an
//! [`ErrorKind`]; nothing is retried.
//!
//! A strategy is a single function:
//!
//! ```rhai
//! fn decide_move(board, my_color) {
//!     // board[row][col] is "black", "white" or ()
//!     [2, 3]
//! }
//! ```

mod compile;
mod config;
mod isolate;
mod memory;
mod result;
mod validate;

use std::time::{Duration, Instant};

use othello_core::{Board, Color, Position};
use tracing::{debug, warn};

pub use compile::compile;
pub use config::SandboxConfig;
pub use isolate::board_to_dynamic;
pub use memory::{MemoryBudget, TrackingAllocator};
pub use result::{ErrorKind, SandboxFailure, SandboxResult, SandboxSuccess};
pub use validate::validate_move;

/// Name of the function every strategy script must define.
pub const ENTRY_POINT: &str = "decide_move";

/// Slack given to the in-engine deadline before the caller stops waiting.
const DEADLINE_GRACE: Duration = Duration::from_millis(250);

/// Owns the limits; builds and discards one isolate per call.
///
/// No engine outlives a call, so nothing a script allocates or defines can
/// leak into the next turn.
#[derive(Debug, Clone, Default)]
pub struct Sandbox {
    config: SandboxConfig,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Compile, run and validate on the current thread.
    pub fn execute_blocking(&self, source: &str, board: &Board, color: Color) -> SandboxResult {
        let started = Instant::now();
        let outcome = self.pipeline(source, board, color, started);
        let elapsed = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(position) => {
                debug!(%position, elapsed_ms = elapsed, "strategy returned a move");
                SandboxResult::Success(SandboxSuccess {
                    position,
                    execution_time_ms: elapsed,
                })
            }
            Err(failure) => {
                debug!(kind = %failure.kind, elapsed_ms = elapsed, "strategy failed");
                SandboxResult::Failure(failure.timed(elapsed))
            }
        }
    }

    /// Same as [`Sandbox::execute_blocking`], on tokio's blocking pool.
    ///
    /// Dropping the returned future abandons the call; the isolate still
    /// stops at its own deadline.
    pub async fn execute(&self, source: &str, board: &Board, color: Color) -> SandboxResult {
        let started = Instant::now();
        let sandbox = self.clone();
        let source = source.to_owned();
        let board = *board;

        let task =
            tokio::task::spawn_blocking(move || sandbox.execute_blocking(&source, &board, color));

        let elapsed = || started.elapsed().as_millis() as u64;
        match tokio::time::timeout(self.config.timeout() + DEADLINE_GRACE, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                warn!(error = %join_err, "isolate task failed");
                SandboxResult::Failure(
                    SandboxFailure::new(ErrorKind::Runtime, format!("Isolate crashed: {join_err}"))
                        .timed(elapsed()),
                )
            }
            Err(_) => {
                warn!("isolate overran its deadline");
                SandboxResult::Failure(isolate::timeout_failure(&self.config).timed(elapsed()))
            }
        }
    }

    fn pipeline(
        &self,
        source: &str,
        board: &Board,
        color: Color,
        started: Instant,
    ) -> Result<Position, SandboxFailure> {
        let engine = isolate::new_engine(&self.config, started);
        let ast = compile::compile(&engine, source)?;
        let value = isolate::run(&engine, &ast, board, color, &self.config)?;
        validate::validate_move(value)
    }
}
