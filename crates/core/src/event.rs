// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event record and the closed set of event-type tags.
//!
//! Events are append-only: the core never mutates or deletes one once
//! written. `id` is assigned by the storage backend at append time and is
//! strictly increasing in insertion order across the store's lifetime.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Closed set of event-type tags (spec.md §4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    AgentStarted,
    AgentStopped,
    AgentHeartbeat,
    TaskCreated,
    TaskClaimed,
    TaskStarted,
    TaskUpdated,
    TaskCompleted,
    TaskFailed,
    TaskAbandoned,
    FileLocked,
    FileUnlocked,
    FileLockWait,
    FileLockFailed,
    AgentMessage,
    AgentQuestion,
    AgentResponse,
    Error,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::AgentStarted => "agent_started",
            EventType::AgentStopped => "agent_stopped",
            EventType::AgentHeartbeat => "agent_heartbeat",
            EventType::TaskCreated => "task_created",
            EventType::TaskClaimed => "task_claimed",
            EventType::TaskStarted => "task_started",
            EventType::TaskUpdated => "task_updated",
            EventType::TaskCompleted => "task_completed",
            EventType::TaskFailed => "task_failed",
            EventType::TaskAbandoned => "task_abandoned",
            EventType::FileLocked => "file_locked",
            EventType::FileUnlocked => "file_unlocked",
            EventType::FileLockWait => "file_lock_wait",
            EventType::FileLockFailed => "file_lock_failed",
            EventType::AgentMessage => "agent_message",
            EventType::AgentQuestion => "agent_question",
            EventType::AgentResponse => "agent_response",
            EventType::Error => "error",
        }
    }

    /// The three event types that make up agent-to-agent communication,
    /// used by the coordinator's `GetMessages` projection.
    pub const COMMUNICATION: [EventType; 3] = [
        EventType::AgentMessage,
        EventType::AgentQuestion,
        EventType::AgentResponse,
    ];
}

/// An append-only audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub timestamp_epoch_ms: u64,
    pub agent_id: String,
    pub role: String,
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default = "default_data")]
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

fn default_data() -> serde_json::Value {
    serde_json::Value::Null
}

/// Storage-level event filter: the fields `QueryEvents` honours directly.
/// The Event Log layer (`smith-coordinator::events`) extends this with
/// `since_id`, `agent_role`, and `file_path` applied on the returned set.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub event_types: Option<HashSet<EventType>>,
    pub agent_id: Option<String>,
    pub task_id: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(types) = &self.event_types {
            if !types.contains(&event.event_type) {
                return false;
            }
        }
        if let Some(agent_id) = &self.agent_id {
            if &event.agent_id != agent_id {
                return false;
            }
        }
        if let Some(task_id) = &self.task_id {
            if event.task_id.as_deref() != Some(task_id.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
