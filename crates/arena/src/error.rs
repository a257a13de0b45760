use othello_core::EngineError;
use thiserror::Error;

/// Failures that stop a match without a result. Human-side mistakes are not
/// errors: they end the match as a forfeit.
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("Match cancelled")]
    Cancelled,

    /// The CPU engine broke its contract. Always a bug.
    #[error("CPU engine failed: {0}")]
    Engine(#[from] EngineError),

    #[error("CPU search task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
