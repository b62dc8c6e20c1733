// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File lease manager: exclusive, atomic leases over opaque path strings
//! (spec.md §4.3).

use crate::CoordinatorError;
use smith_core::FileLease;
use smith_storage::{Store, StorageError};
use std::sync::Arc;

#[derive(Clone)]
pub struct LeaseManager {
    store: Arc<Store>,
}

impl LeaseManager {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Acquire a single lease; idempotent if `agent_id` already holds it.
    pub fn acquire(
        &self,
        path: &str,
        agent_id: &str,
        task_id: &str,
        now_ms: u64,
    ) -> Result<(), CoordinatorError> {
        let lease = FileLease::new(path.to_string(), agent_id.to_string(), task_id.to_string(), now_ms);
        self.store.acquire_locks(std::slice::from_ref(&lease)).map_err(map_lock_conflict)
    }

    /// Atomic multi-path acquisition: all-or-nothing (spec.md §4.3
    /// `AcquireMany`).
    pub fn acquire_many(&self, leases: &[FileLease]) -> Result<(), CoordinatorError> {
        self.store.acquire_locks(leases).map_err(map_lock_conflict)
    }

    pub fn release(&self, path: &str, agent_id: &str) -> Result<(), CoordinatorError> {
        self.store.release_lock(path, agent_id)?;
        Ok(())
    }

    pub fn release_all(&self, agent_id: &str) -> Result<u64, CoordinatorError> {
        Ok(self.store.release_all_locks(agent_id)?)
    }

    pub fn is_locked(&self, path: &str) -> Result<bool, CoordinatorError> {
        Ok(self.store.is_locked(path)?)
    }

    pub fn get_lock(&self, path: &str) -> Result<Option<FileLease>, CoordinatorError> {
        Ok(self.store.get_lock(path)?)
    }

    pub fn get_locks_for_agent(&self, agent_id: &str) -> Result<Vec<FileLease>, CoordinatorError> {
        Ok(self.store.get_locks_for_agent(agent_id)?)
    }

    pub fn get_all_locks(&self) -> Result<Vec<FileLease>, CoordinatorError> {
        Ok(self.store.get_all_locks()?)
    }
}

/// `LockHeld` at the storage layer is the `NotClaimable`-flavoured race
/// outcome at this layer: a lease request loses to a concurrent holder.
fn map_lock_conflict(err: StorageError) -> CoordinatorError {
    match err {
        StorageError::LockHeld { path, .. } => CoordinatorError::NotClaimable(path),
        other => CoordinatorError::Storage(other),
    }
}

#[cfg(test)]
#[path = "leases_tests.rs"]
mod tests;
