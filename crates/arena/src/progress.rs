//! Rank unlocks and win counts across sessions

use directories::ProjectDirs;
use othello_core::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::events::MatchResult;
use crate::rank::Rank;

const PROGRESS_FILENAME: &str = "progress.json";

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Progress {
    pub unlocked_ranks: Vec<Rank>,
    pub wins: BTreeMap<Rank, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_code: Option<String>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked_ranks: vec![Rank::E],
            wins: BTreeMap::new(),
            last_code: None,
        }
    }
}

impl Progress {
    pub fn is_unlocked(&self, rank: Rank) -> bool {
        self.unlocked_ranks.contains(&rank)
    }

    /// Unlock the rank after `current`. Returns it, or `None` at the top.
    pub fn unlock_next_rank(&mut self, current: Rank) -> Option<Rank> {
        let next = current.next()?;
        if !self.is_unlocked(next) {
            self.unlocked_ranks.push(next);
        }
        Some(next)
    }

    pub fn record_win(&mut self, rank: Rank) {
        *self.wins.entry(rank).or_insert(0) += 1;
    }

    pub fn wins_against(&self, rank: Rank) -> u32 {
        self.wins.get(&rank).copied().unwrap_or(0)
    }

    /// Book a finished match. A win records the victory and unlocks the next
    /// rank, which is returned.
    pub fn apply_result(&mut self, rank: Rank, human: Color, result: &MatchResult) -> Option<Rank> {
        if !result.is_win_for(human) {
            return None;
        }
        self.record_win(rank);
        self.unlock_next_rank(rank)
    }
}

/// Where progress lives between sessions.
pub trait ProgressStore {
    /// Stored progress, or the default when nothing was saved yet.
    fn load(&self) -> Result<Progress, ProgressError>;

    fn save(&self, progress: &Progress) -> Result<(), ProgressError>;
}

/// Pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonProgressStore {
    path: PathBuf,
}

impl JsonProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `progress.json` in the user's data directory, or the working
    /// directory when no home directory can be found.
    pub fn default_location() -> Self {
        let path = ProjectDirs::from("com", "code-reversi", "CodeReversi")
            .map(|dirs| dirs.data_dir().join(PROGRESS_FILENAME))
            .unwrap_or_else(|| PathBuf::from(PROGRESS_FILENAME));
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ProgressError {
        ProgressError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ProgressStore for JsonProgressStore {
    fn load(&self) -> Result<Progress, ProgressError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no saved progress");
            return Ok(Progress::default());
        }
        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&contents).map_err(|source| ProgressError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, progress: &Progress) -> Result<(), ProgressError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(progress)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod progress_tests;
