//! The result contract of one strategy invocation

use othello_core::Position;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a human turn failed.
///
/// `InvalidMove` is never produced by the sandbox itself: the match loop
/// reports it after re-checking a well-formed move against the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Compile,
    Runtime,
    Timeout,
    InvalidReturn,
    InvalidMove,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Compile => "compile",
            ErrorKind::Runtime => "runtime",
            ErrorKind::Timeout => "timeout",
            ErrorKind::InvalidReturn => "invalid-return",
            ErrorKind::InvalidMove => "invalid-move",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxSuccess {
    pub position: Position,
    pub execution_time_ms: u64,
}

/// A failed invocation. `line` and `column` are 1-based and only set for
/// compile errors whose location is known.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} error: {message}")]
pub struct SandboxFailure {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub execution_time_ms: u64,
}

impl SandboxFailure {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            column: None,
            execution_time_ms: 0,
        }
    }

    pub fn at(mut self, line: Option<usize>, column: Option<usize>) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn timed(mut self, execution_time_ms: u64) -> Self {
        self.execution_time_ms = execution_time_ms;
        self
    }
}

/// Exactly one of these is produced per human turn attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SandboxResult {
    Success(SandboxSuccess),
    Failure(SandboxFailure),
}

impl SandboxResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SandboxResult::Success(_))
    }

    pub fn execution_time_ms(&self) -> u64 {
        match self {
            SandboxResult::Success(s) => s.execution_time_ms,
            SandboxResult::Failure(f) => f.execution_time_ms,
        }
    }

    pub fn into_result(self) -> Result<SandboxSuccess, SandboxFailure> {
        match self {
            SandboxResult::Success(s) => Ok(s),
            SandboxResult::Failure(f) => Err(f),
        }
    }
}

impl From<Result<SandboxSuccess, SandboxFailure>> for SandboxResult {
    fn from(result: Result<SandboxSuccess, SandboxFailure>) -> Self {
        match result {
            Ok(s) => SandboxResult::Success(s),
            Err(f) => SandboxResult::Failure(f),
        }
    }
}
