// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The task lifecycle authority. All transitions go through here so that
//! exactly one event is emitted per transition and no partial state is
//! observable (spec.md §4.5).

use crate::{CoordinatorError, EventLog, EventQuery, LeaseManager, Registry};
use serde_json::json;
use smith_core::{
    Clock, Event, EventType, FileLease, SystemClock, Task, TaskMemory, TaskStatus,
};
use smith_storage::{Store, StorageError, TaskStats};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Composite value bundling the storage handle and its three peer
/// subsystems, the "cyclic handles" construction from spec.md §9: built
/// once, then cloned freely since every field is itself cheap to clone.
#[derive(Clone)]
pub struct Coordinator<C: Clock = SystemClock> {
    store: Arc<Store>,
    registry: Registry,
    leases: LeaseManager,
    events: EventLog<C>,
    clock: C,
}

impl Coordinator<SystemClock> {
    pub fn new(store: Arc<Store>) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<C: Clock> Coordinator<C> {
    pub fn with_clock(store: Arc<Store>, clock: C) -> Self {
        let registry = Registry::new(store.clone());
        let leases = LeaseManager::new(store.clone());
        let events = EventLog::with_clock(store.clone(), clock.clone());
        Self {
            store,
            registry,
            leases,
            events,
            clock,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn leases(&self) -> &LeaseManager {
        &self.leases
    }

    pub fn events(&self) -> &EventLog<C> {
        &self.events
    }

    /// Allocates a fresh `task-NNN` id, persists the task in `Backlog`,
    /// emits `task_created`.
    pub fn create_task(
        &self,
        title: &str,
        description: &str,
        role: &str,
    ) -> Result<Task, CoordinatorError> {
        let now = self.clock.epoch_ms();
        let task = self.store.create_task_with_id(title, description, role, now)?;
        self.events.publish_with_data(
            "",
            "",
            EventType::TaskCreated,
            Some(task.id.to_string()),
            None,
            None,
            json!({"task_id": task.id.to_string(), "title": title, "role": role}),
        )?;
        info!(task_id = %task.id, "task created");
        Ok(task)
    }

    /// Delegates to the storage-level atomic claim. On success emits
    /// `task_claimed`; on `NotClaimable` returns without emitting.
    pub fn claim_task(&self, task_id: &str, agent_id: &str) -> Result<Task, CoordinatorError> {
        let now = self.clock.epoch_ms();
        match self.store.claim_task(task_id, agent_id, now) {
            Ok(task) => {
                // Best-effort, like the registry bookkeeping in complete_task/
                // fail_task: the storage transition has already committed, so
                // a missing or dead agent record must never suppress the
                // task_claimed event.
                self.registry.assign_task(agent_id, task_id).ok();
                self.events.publish_with_data(
                    agent_id,
                    &task.role,
                    EventType::TaskClaimed,
                    Some(task_id.to_string()),
                    None,
                    task.session_id.clone(),
                    json!({"task_id": task_id}),
                )?;
                debug!(task_id, agent_id, "task claimed");
                Ok(task)
            }
            Err(StorageError::NotClaimable(id)) => Err(CoordinatorError::NotClaimable(id)),
            Err(other) => Err(other.into()),
        }
    }

    /// Validates `status` against the closed set, updates the task, emits
    /// `task_updated`.
    pub fn update_task_status(&self, task_id: &str, status: &str) -> Result<Task, CoordinatorError> {
        let parsed = TaskStatus::parse(status)
            .ok_or_else(|| CoordinatorError::InvalidStatus(status.to_string()))?;
        let mut task = self.store.get_task(task_id)?;
        task.status = parsed;
        task.updated_at_epoch_ms = self.clock.epoch_ms();
        self.store.update_task(&task)?;
        self.events.publish_with_data(
            &task.assigned_agent,
            &task.role,
            EventType::TaskUpdated,
            Some(task_id.to_string()),
            None,
            task.session_id.clone(),
            json!({"task_id": task_id, "status": status}),
        )?;
        Ok(task)
    }

    /// Sets status = `Done`, result, completed-at = now; emits
    /// `task_completed`. Idempotent on repeat (spec.md §8 round-trip law).
    pub fn complete_task(&self, task_id: &str, result: &str) -> Result<Task, CoordinatorError> {
        let now = self.clock.epoch_ms();
        let mut task = self.store.get_task(task_id)?;
        task.status = TaskStatus::Done;
        task.result = result.to_string();
        task.updated_at_epoch_ms = now;
        task.completed_at_epoch_ms.get_or_insert(now);
        self.store.update_task(&task)?;
        self.registry.clear_task(&task.assigned_agent).ok();
        self.events.publish_with_data(
            &task.assigned_agent,
            &task.role,
            EventType::TaskCompleted,
            Some(task_id.to_string()),
            None,
            task.session_id.clone(),
            json!({"task_id": task_id, "result": result}),
        )?;
        info!(task_id, "task completed");
        Ok(task)
    }

    /// Sets status = `Backlog`, error = `error_msg`, clears assigned-agent;
    /// emits `task_failed`. Preserves the error on a later successful
    /// `CompleteTask` (spec.md §9 "error history should be preserved").
    pub fn fail_task(&self, task_id: &str, error_msg: &str) -> Result<Task, CoordinatorError> {
        let mut task = self.store.get_task(task_id)?;
        let agent_id = task.assigned_agent.clone();
        task.status = TaskStatus::Backlog;
        task.error = error_msg.to_string();
        task.assigned_agent.clear();
        task.updated_at_epoch_ms = self.clock.epoch_ms();
        self.store.update_task(&task)?;
        if !agent_id.is_empty() {
            self.registry.clear_task(&agent_id).ok();
        }
        self.events.publish_with_data(
            &agent_id,
            &task.role,
            EventType::TaskFailed,
            Some(task_id.to_string()),
            None,
            task.session_id.clone(),
            json!({"task_id": task_id, "error": error_msg}),
        )?;
        warn!(task_id, error_msg, "task failed");
        Ok(task)
    }

    /// Attaches agent-memory fields extracted by the worker after a
    /// completed or failed attempt (spec.md §3 "agent-memory fields").
    pub fn record_memory(&self, task_id: &str, memory: TaskMemory) -> Result<(), CoordinatorError> {
        let mut task = self.store.get_task(task_id)?;
        task.memory = Some(memory);
        task.updated_at_epoch_ms = self.clock.epoch_ms();
        self.store.update_task(&task)?;
        Ok(())
    }

    pub fn get_task(&self, task_id: &str) -> Result<Task, CoordinatorError> {
        Ok(self.store.get_task(task_id)?)
    }

    pub fn get_available_tasks(&self, role: &str) -> Result<Vec<Task>, CoordinatorError> {
        let backlog = self.store.list_tasks(Some(TaskStatus::Backlog))?;
        Ok(backlog.into_iter().filter(|t| t.matches_role(role)).collect())
    }

    pub fn get_tasks_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, CoordinatorError> {
        Ok(self.store.list_tasks(Some(status))?)
    }

    pub fn get_task_stats(&self) -> Result<TaskStats, CoordinatorError> {
        Ok(self.store.get_task_stats()?)
    }

    /// Higher-level lease policy: acquire all paths atomically; on partial
    /// failure, call `ReleaseAll` as a belt-and-braces safety net even
    /// though the underlying transaction already guarantees atomicity.
    /// Emits `file_locked` per acquired path on success, `file_lock_failed`
    /// on failure (spec.md §4.3).
    pub fn lock_files(&self, task_id: &str, agent_id: &str, paths: &[String]) -> Result<(), CoordinatorError> {
        let now = self.clock.epoch_ms();
        let leases: Vec<FileLease> = paths
            .iter()
            .map(|p| FileLease::new(p.clone(), agent_id.to_string(), task_id.to_string(), now))
            .collect();

        match self.leases.acquire_many(&leases) {
            Ok(()) => {
                for path in paths {
                    self.events.publish_with_data(
                        agent_id,
                        "",
                        EventType::FileLocked,
                        Some(task_id.to_string()),
                        Some(path.clone()),
                        None,
                        json!({"file": path}),
                    )?;
                }
                Ok(())
            }
            Err(err) => {
                self.leases.release_all(agent_id).ok();
                self.events.publish_with_data(
                    agent_id,
                    "",
                    EventType::FileLockFailed,
                    Some(task_id.to_string()),
                    None,
                    None,
                    json!({"paths": paths}),
                )?;
                Err(err)
            }
        }
    }

    pub fn get_active_locks(&self) -> Result<Vec<FileLease>, CoordinatorError> {
        self.leases.get_all_locks()
    }

    /// Filtered projection over the three communication event types
    /// (spec.md §4.5 `GetMessages`).
    pub fn get_messages(&self, since_id: Option<u64>) -> Result<Vec<Event>, CoordinatorError> {
        use std::collections::HashSet;
        let mut filter = smith_core::EventFilter::default();
        filter.event_types = Some(HashSet::from(EventType::COMMUNICATION));
        self.events.query(&EventQuery {
            filter,
            since_id,
            agent_role: None,
            file_path: None,
        })
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
