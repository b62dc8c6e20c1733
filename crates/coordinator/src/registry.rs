// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker registry: tracks which workers exist, their liveness, and their
//! current assignments (spec.md §4.4).

use crate::CoordinatorError;
use smith_core::{Agent, AgentId, AgentStatus};
use smith_storage::Store;
use std::sync::Arc;
use tracing::{debug, warn};

/// A handle shared by every worker loop and the orchestrator. Cheap to
/// clone; holds no mutable state of its own beyond the shared [`Store`]
/// (spec.md §3 "Ownership").
#[derive(Clone)]
pub struct Registry {
    store: Arc<Store>,
}

impl Registry {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn register(&self, agent_id: &str, role: &str, pid: u32, now_ms: u64) -> Result<(), CoordinatorError> {
        let agent = Agent::new(AgentId::new(agent_id), role.to_string(), pid, now_ms);
        self.store.register_agent(&agent)?;
        debug!(agent_id, role, "agent registered");
        Ok(())
    }

    pub fn unregister(&self, agent_id: &str) -> Result<(), CoordinatorError> {
        self.store.unregister_agent(agent_id)?;
        Ok(())
    }

    pub fn heartbeat(&self, agent_id: &str, now_ms: u64) -> Result<(), CoordinatorError> {
        self.store.update_heartbeat(agent_id, now_ms)?;
        Ok(())
    }

    pub fn update_status(&self, agent_id: &str, status: AgentStatus) -> Result<(), CoordinatorError> {
        self.store.update_agent_status(agent_id, status)?;
        Ok(())
    }

    pub fn assign_task(&self, agent_id: &str, task_id: &str) -> Result<(), CoordinatorError> {
        self.store.assign_agent_task(agent_id, task_id)?;
        Ok(())
    }

    pub fn clear_task(&self, agent_id: &str) -> Result<(), CoordinatorError> {
        self.store.clear_agent_task(agent_id)?;
        Ok(())
    }

    pub fn get(&self, agent_id: &str) -> Result<Agent, CoordinatorError> {
        Ok(self.store.get_agent(agent_id)?)
    }

    pub fn list(&self, role: Option<&str>) -> Result<Vec<Agent>, CoordinatorError> {
        Ok(self.store.list_agents(role)?)
    }

    pub fn mark_dead(&self, agent_id: &str) -> Result<(), CoordinatorError> {
        self.store.update_agent_status(agent_id, AgentStatus::Dead)?;
        Ok(())
    }

    /// Delegates to the storage-level sweep, then returns the now-`Dead`
    /// set (spec.md §4.4 `FindDeadAgents`).
    pub fn find_dead_agents(&self, now_ms: u64, timeout_ms: u64) -> Result<Vec<Agent>, CoordinatorError> {
        let affected = self.store.mark_agents_dead(now_ms, timeout_ms)?;
        if affected > 0 {
            warn!(affected, "agents marked dead by liveness sweep");
        }
        let dead = self
            .store
            .list_agents(None)?
            .into_iter()
            .filter(|a| a.status == AgentStatus::Dead)
            .collect();
        Ok(dead)
    }

    /// Unregisters every agent whose status is `Dead`; returns the count.
    pub fn cleanup_dead_agents(&self) -> Result<u64, CoordinatorError> {
        let dead: Vec<String> = self
            .store
            .list_agents(None)?
            .into_iter()
            .filter(|a| a.status == AgentStatus::Dead)
            .map(|a| a.id.as_str().to_string())
            .collect();
        let count = dead.len() as u64;
        for id in dead {
            self.store.unregister_agent(&id)?;
        }
        Ok(count)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
