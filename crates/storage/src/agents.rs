// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent collection operations.

use crate::store::{decode, encode, Store};
use crate::StorageError;
use smith_core::{Agent, AgentStatus};

impl Store {
    /// Upsert by agent id. Preserves `started_at_epoch_ms`/
    /// `last_heartbeat_epoch_ms` of an existing record rather than
    /// overwriting them with the incoming ones (spec.md §4.1
    /// `RegisterAgent`: "sets started-at / last-heartbeat if unset").
    pub fn register_agent(&self, agent: &Agent) -> Result<(), StorageError> {
        let key = agent.id.as_str().as_bytes();
        let mut record = agent.clone();
        if let Some(bytes) = self.agents.get(key)? {
            if let Some(existing) = decode::<Agent>(&bytes) {
                record.started_at_epoch_ms = existing.started_at_epoch_ms;
                record.last_heartbeat_epoch_ms = existing.last_heartbeat_epoch_ms;
            }
        }
        self.agents.insert(key, encode(&record)?)?;
        Ok(())
    }

    pub fn get_agent(&self, id: &str) -> Result<Agent, StorageError> {
        let bytes = self
            .agents
            .get(id.as_bytes())?
            .ok_or_else(|| StorageError::NotFound {
                kind: "agent",
                id: id.to_string(),
            })?;
        decode(&bytes).ok_or_else(|| StorageError::NotFound {
            kind: "agent",
            id: id.to_string(),
        })
    }

    pub fn list_agents(&self, role: Option<&str>) -> Result<Vec<Agent>, StorageError> {
        let agents = self
            .agents
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<Agent>(&bytes))
            .filter(|a| role.map_or(true, |r| a.role == r))
            .collect();
        Ok(agents)
    }

    pub fn unregister_agent(&self, id: &str) -> Result<(), StorageError> {
        self.agents.remove(id.as_bytes())?;
        Ok(())
    }

    pub fn update_heartbeat(&self, id: &str, now_ms: u64) -> Result<(), StorageError> {
        self.update_agent(id, |a| a.last_heartbeat_epoch_ms = now_ms)
    }

    pub fn update_agent_status(
        &self,
        id: &str,
        status: AgentStatus,
    ) -> Result<(), StorageError> {
        self.update_agent(id, |a| a.status = status)
    }

    pub fn assign_agent_task(&self, id: &str, task_id: &str) -> Result<(), StorageError> {
        self.update_agent(id, |a| {
            a.current_task_id = Some(task_id.to_string());
            a.status = AgentStatus::Active;
        })
    }

    pub fn clear_agent_task(&self, id: &str) -> Result<(), StorageError> {
        self.update_agent(id, |a| {
            a.current_task_id = None;
            a.status = AgentStatus::Idle;
        })
    }

    fn update_agent(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Agent),
    ) -> Result<(), StorageError> {
        let key = id.as_bytes();
        let bytes = self.agents.get(key)?.ok_or_else(|| StorageError::NotFound {
            kind: "agent",
            id: id.to_string(),
        })?;
        let mut agent: Agent = decode(&bytes).ok_or_else(|| StorageError::NotFound {
            kind: "agent",
            id: id.to_string(),
        })?;
        mutate(&mut agent);
        self.agents.insert(key, encode(&agent)?)?;
        Ok(())
    }

    /// For every `Active` agent whose heartbeat is older than `now_ms -
    /// timeout_ms`, set status = `Dead`. Returns the number affected.
    /// Scans non-transactionally (sled 0.34's `TransactionalTree` has no
    /// iteration API) then re-checks staleness inside a per-key transaction
    /// before committing, so a heartbeat racing the sweep is never clobbered.
    pub fn mark_agents_dead(&self, now_ms: u64, timeout_ms: u64) -> Result<u64, StorageError> {
        let candidates: Vec<String> = self
            .agents
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<Agent>(&bytes))
            .filter(|a| a.status == AgentStatus::Active && a.is_stale(now_ms, timeout_ms))
            .map(|a| a.id.as_str().to_string())
            .collect();

        let mut affected = 0u64;
        for id in candidates {
            let key = id.as_bytes();
            let marked = self.agents.transaction(
                |tx| -> Result<bool, sled::transaction::ConflictableTransactionError<StorageError>> {
                    let Some(bytes) = tx.get(key)? else {
                        return Ok(false);
                    };
                    let Some(mut agent) = decode::<Agent>(&bytes) else {
                        return Ok(false);
                    };
                    if agent.status != AgentStatus::Active || !agent.is_stale(now_ms, timeout_ms) {
                        return Ok(false);
                    }
                    agent.status = AgentStatus::Dead;
                    let encoded = encode(&agent)
                        .map_err(sled::transaction::ConflictableTransactionError::Abort)?;
                    tx.insert(key, encoded)?;
                    Ok(true)
                },
            );
            match marked {
                Ok(true) => affected += 1,
                Ok(false) => {}
                Err(sled::transaction::TransactionError::Abort(e)) => return Err(e),
                Err(sled::transaction::TransactionError::Storage(e)) => return Err(e.into()),
            }
        }
        Ok(affected)
    }
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
