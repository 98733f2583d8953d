//! Game loop configuration
//!
//! Read from environment variables:
//!
//! - `BLOCK_DROP_SEED`: bag seed (default: derived from the clock)
//! - `BLOCK_DROP_MAX_PENDING`: command queue capacity (default: 16)
//! - `BLOCK_DROP_LOG_PATH`: JSON-lines event log file (default: disabled)
//! - `BLOCK_DROP_AUTOSTART`: set to "0" or "false" to wait for an explicit new game

use std::time::{SystemTime, UNIX_EPOCH};

/// Game loop configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    pub seed: Option<u32>,
    pub command_capacity: usize,
    pub event_log_path: Option<String>,
    pub autostart: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            seed: None,
            command_capacity: 16,
            event_log_path: None,
            autostart: true,
        }
    }
}

impl LoopConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (environment, tests, ...)
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = var("BLOCK_DROP_SEED").and_then(|s| s.trim().parse().ok());

        let command_capacity = var("BLOCK_DROP_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.command_capacity);

        let event_log_path = var("BLOCK_DROP_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        let autostart = var("BLOCK_DROP_AUTOSTART")
            .map(|s| !matches!(s.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no"))
            .unwrap_or(defaults.autostart);

        Self {
            seed,
            command_capacity,
            event_log_path,
            autostart,
        }
    }

    /// Configured seed, or one derived from the clock
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
