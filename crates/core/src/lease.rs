// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File lease record.
//!
//! A lease grants one agent exclusive hold on a file path. Paths are opaque
//! strings compared by exact byte equality — no normalization is performed
//! by the core.

use serde::{Deserialize, Serialize};

/// An exclusive hold on a path by one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLease {
    pub path: String,
    pub holder_agent_id: String,
    pub task_id: String,
    pub acquired_at_epoch_ms: u64,
}

impl FileLease {
    pub fn new(path: String, holder_agent_id: String, task_id: String, now_ms: u64) -> Self {
        Self {
            path,
            holder_agent_id,
            task_id,
            acquired_at_epoch_ms: now_ms,
        }
    }
}
