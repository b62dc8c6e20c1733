// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration: serde defaults overridden by `.smith/config.toml`,
//! in turn overridden by environment variables (spec.md §9 "Ambient
//! stack"; `SMITH_STATE_DIR`/`SMITH_POLL_MS`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::DaemonError;

fn default_poll_ms() -> u64 {
    100
}

fn default_heartbeat_ms() -> u64 {
    5_000
}

fn default_dead_agent_timeout_ms() -> u64 {
    30_000
}

fn default_claim_concurrency() -> usize {
    4
}

/// Daemon-level configuration, serialized to/from `.smith/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
    #[serde(default = "default_heartbeat_ms")]
    pub heartbeat_ms: u64,
    #[serde(default = "default_dead_agent_timeout_ms")]
    pub dead_agent_timeout_ms: u64,
    #[serde(default = "default_claim_concurrency")]
    pub claim_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_ms: default_poll_ms(),
            heartbeat_ms: default_heartbeat_ms(),
            dead_agent_timeout_ms: default_dead_agent_timeout_ms(),
            claim_concurrency: default_claim_concurrency(),
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_ms)
    }

    pub fn dead_agent_timeout(&self) -> Duration {
        Duration::from_millis(self.dead_agent_timeout_ms)
    }

    /// Reads `<state_dir>/config.toml` if present, else the defaults,
    /// then applies `SMITH_POLL_MS` on top. `state_dir` is the resolved
    /// `.smith/` directory, not the project root.
    pub fn load(state_dir: &Path) -> Result<Self, DaemonError> {
        let path = state_dir.join("config.toml");
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            toml::from_str(&text)?
        } else {
            Config::default()
        };

        if let Some(ms) = poll_ms_override() {
            config.poll_ms = ms;
        }
        Ok(config)
    }
}

/// `SMITH_STATE_DIR` override for the `.smith/` directory location,
/// falling back to `<cwd>/.smith`.
pub fn state_dir_override() -> Option<PathBuf> {
    std::env::var("SMITH_STATE_DIR").ok().map(PathBuf::from)
}

fn poll_ms_override() -> Option<u64> {
    std::env::var("SMITH_POLL_MS").ok().and_then(|s| s.parse().ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
