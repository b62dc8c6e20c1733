// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session identifier and record — a grouping label for tasks and events
//! belonging to one interactive working context. Sessions aggregate but do
//! not own; deleting or archiving a session has no effect on the tasks or
//! events that reference it.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a session.
    pub struct SessionId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Archived,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Active => write!(f, "active"),
            SessionStatus::Archived => write!(f, "archived"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub started_at_epoch_ms: u64,
    pub last_active_epoch_ms: u64,
    #[serde(default)]
    pub task_count: u32,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(id: SessionId, title: String, now_ms: u64) -> Self {
        Self {
            id,
            title,
            started_at_epoch_ms: now_ms,
            last_active_epoch_ms: now_ms,
            task_count: 0,
            status: SessionStatus::Active,
        }
    }
}
