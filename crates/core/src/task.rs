// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identifier and record.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

crate::define_id! {
    /// Unique identifier for a task, conventionally formatted `task-NNN`.
    #[derive(Default)]
    pub struct TaskId;
}

/// Lifecycle status of a task. See the state machine in the coordinator
/// crate for the allowed transitions between these four states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Wip,
    Review,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Wip => "wip",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        }
    }

    /// Parse a status string, used to validate `UpdateTaskStatus` requests
    /// against the closed set (spec error kind `InvalidStatus`).
    pub fn parse(s: &str) -> Option<TaskStatus> {
        match s {
            "backlog" => Some(TaskStatus::Backlog),
            "wip" => Some(TaskStatus::Wip),
            "review" => Some(TaskStatus::Review),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Free-form agent-memory fields carried on a task, populated by workers
/// extracting learnings/blockers from a completed or failed attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMemory {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub learnings: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tried_approaches: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blockers: Vec<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

impl TaskMemory {
    pub fn is_empty(&self) -> bool {
        self.learnings.is_empty()
            && self.tried_approaches.is_empty()
            && self.blockers.is_empty()
            && self.notes.is_empty()
    }
}

/// A unit of engineering work with a role tag and lifecycle.
///
/// Invariants enforced by the coordinator that persists this record (not by
/// the type itself, since storage round-trips arbitrary JSON): status is
/// always one of the four [`TaskStatus`] variants; `Wip` implies
/// `assigned_agent` is non-empty; `Done` implies `completed_at` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Empty string means "any role may claim this task".
    #[serde(default)]
    pub role: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_agent: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub error: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub created_at_epoch_ms: u64,
    pub updated_at_epoch_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_epoch_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<TaskMemory>,
}

fn default_priority() -> i32 {
    1
}

impl Task {
    /// Construct a fresh task in `Backlog` status, as `CreateTask` does.
    pub fn new(id: TaskId, title: String, description: String, role: String, now_ms: u64) -> Self {
        Self {
            id,
            title,
            description,
            role,
            status: TaskStatus::Backlog,
            assigned_agent: String::new(),
            result: String::new(),
            error: String::new(),
            priority: default_priority(),
            dependencies: Vec::new(),
            session_id: None,
            created_at_epoch_ms: now_ms,
            updated_at_epoch_ms: now_ms,
            completed_at_epoch_ms: None,
            memory: None,
        }
    }

    /// Whether this task's role matches a worker of the given role, per the
    /// wildcard rule: empty role on the task means "any".
    pub fn matches_role(&self, worker_role: &str) -> bool {
        self.role.is_empty() || self.role == worker_role
    }

    /// Check the two structural invariants from spec.md §3/§8 that don't
    /// require storage context: `Wip` implies a non-empty assignee, `Done`
    /// implies `completed_at` is set.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.status == TaskStatus::Wip && self.assigned_agent.is_empty() {
            return Err(format!("task {} is wip with no assigned agent", self.id));
        }
        if self.status == TaskStatus::Done && self.completed_at_epoch_ms.is_none() {
            return Err(format!("task {} is done with no completed_at", self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
