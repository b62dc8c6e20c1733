// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent (worker) identifier and record.
//!
//! `AgentId` is the identity a worker registers under; it is caller-supplied
//! and opaque to the core beyond byte equality.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a registered worker/agent.
    pub struct AgentId;
}

/// Liveness/assignment status of an agent record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Holds a current task.
    Active,
    /// Registered, not currently holding a task.
    Idle,
    /// Marked dead by the liveness sweep.
    Dead,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Idle => "idle",
            AgentStatus::Dead => "dead",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered worker.
///
/// Invariant: `Active` with a non-empty `current_task_id` means the agent
/// claims responsibility for that task; `Dead` is assigned only by the
/// liveness sweep, never by the agent itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    /// Role tag; unlike task roles, an agent's role is never the wildcard.
    pub role: String,
    pub status: AgentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task_id: Option<String>,
    pub pid: u32,
    pub started_at_epoch_ms: u64,
    pub last_heartbeat_epoch_ms: u64,
}

impl Agent {
    pub fn new(id: AgentId, role: String, pid: u32, now_ms: u64) -> Self {
        Self {
            id,
            role,
            status: AgentStatus::Idle,
            current_task_id: None,
            pid,
            started_at_epoch_ms: now_ms,
            last_heartbeat_epoch_ms: now_ms,
        }
    }

    /// Whether this agent's last heartbeat is older than `timeout_ms` as of
    /// `now_ms`, the predicate the liveness sweep applies to `Active` agents
    /// (spec.md §4.1 `MarkAgentDead`).
    pub fn is_stale(&self, now_ms: u64, timeout_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_heartbeat_epoch_ms) > timeout_ms
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
