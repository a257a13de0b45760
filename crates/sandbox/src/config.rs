//! Resource limits for a single strategy invocation

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to every isolate. All fields default, so a partial TOML
/// table is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Wall-clock budget for compile plus run, in milliseconds
    pub timeout_ms: u64,
    /// Heap a single invocation may hold; also sizes string, array and map limits
    pub memory_limit_mb: usize,
    /// Maximum script call depth
    pub max_call_levels: usize,
    /// Maximum expression nesting, at global level and inside functions
    pub max_expr_depth: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            memory_limit_mb: 32,
            max_call_levels: 64,
            max_expr_depth: 64,
        }
    }
}

impl SandboxConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn memory_limit_bytes(&self) -> usize {
        self.memory_limit_mb.saturating_mul(1024 * 1024)
    }

    /// Longest string a script may build.
    pub fn max_string_size(&self) -> usize {
        self.memory_limit_bytes()
    }

    /// Longest array, assuming each element costs at least 16 bytes.
    pub fn max_array_size(&self) -> usize {
        self.memory_limit_bytes() / 16
    }

    /// Largest object map, assuming each entry costs at least 64 bytes.
    pub fn max_map_size(&self) -> usize {
        self.memory_limit_bytes() / 64
    }
}
