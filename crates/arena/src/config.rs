//! Arena configuration, loaded from TOML

use othello_core::Color;
use script_sandbox::SandboxConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Match settings. Missing keys take their defaults.
///
/// ```toml
/// human_color = "white"
/// cpu_think_delay_ms = 0
///
/// [sandbox]
/// timeout_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Color played by the user's script
    pub human_color: Color,
    /// Pause before each CPU move, for presentation
    pub cpu_think_delay_ms: u64,
    /// Pause after every placement
    pub turn_delay_ms: u64,
    pub sandbox: SandboxConfig,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            human_color: Color::Black,
            cpu_think_delay_ms: 400,
            turn_delay_ms: 100,
            sandbox: SandboxConfig::default(),
        }
    }
}

impl ArenaConfig {
    /// No pacing delays; used by tests and batch runs.
    pub fn instant() -> Self {
        Self {
            cpu_think_delay_ms: 0,
            turn_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn cpu_think_delay(&self) -> Duration {
        Duration::from_millis(self.cpu_think_delay_ms)
    }

    pub fn turn_delay(&self) -> Duration {
        Duration::from_millis(self.turn_delay_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
