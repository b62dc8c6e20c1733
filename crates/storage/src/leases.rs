// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File lease collection operations.
//!
//! Leases are keyed by path in the `file_locks` tree. `acquire_many` runs the
//! whole-batch check-then-insert in one transaction so a partial conflict
//! leaves no lease behind (spec.md §4.3 `AcquireMany`).

use crate::store::{decode, encode, Store};
use crate::StorageError;
use sled::transaction::{abort, ConflictableTransactionError, TransactionError};
use smith_core::FileLease;

impl Store {
    /// Acquire every lease in `leases` atomically. If the same agent already
    /// holds a path, that lease is left untouched (idempotent, not an
    /// error). If any path is held by a different agent, the whole batch is
    /// rejected with `LockHeld` naming the first conflicting path.
    pub fn acquire_locks(&self, leases: &[FileLease]) -> Result<(), StorageError> {
        let result = self.file_locks.transaction(
            |tx| -> Result<(), ConflictableTransactionError<StorageError>> {
                for lease in leases {
                    let key = lease.path.as_bytes();
                    if let Some(existing) = tx.get(key)? {
                        let existing: FileLease = decode(&existing).ok_or_else(|| {
                            abort(StorageError::Transaction(format!(
                                "corrupt lease entry at {}",
                                lease.path
                            )))
                        })?;
                        if existing.holder_agent_id != lease.holder_agent_id {
                            return Err(abort(StorageError::LockHeld {
                                path: lease.path.clone(),
                                holder: existing.holder_agent_id,
                            }));
                        }
                        continue;
                    }
                    let bytes = encode(lease).map_err(ConflictableTransactionError::Abort)?;
                    tx.insert(key, bytes)?;
                }
                Ok(())
            },
        );
        match result {
            Ok(()) => Ok(()),
            Err(TransactionError::Abort(e)) => Err(e),
            Err(TransactionError::Storage(e)) => Err(e.into()),
        }
    }

    /// Remove the lease on `path` iff held by `agent_id`. No-op (not an
    /// error) if the path is unlocked or held by someone else, matching
    /// spec.md §4.3's "otherwise no-op" wording for the batch form; callers
    /// wanting the single-path `LockNotFound` signal use
    /// [`Store::release_lock_checked`].
    pub fn release_lock(&self, path: &str, agent_id: &str) -> Result<(), StorageError> {
        let key = path.as_bytes();
        if let Some(bytes) = self.file_locks.get(key)? {
            if let Some(lease) = decode::<FileLease>(&bytes) {
                if lease.holder_agent_id == agent_id {
                    self.file_locks.remove(key)?;
                }
            }
        }
        Ok(())
    }

    /// Single-path release that fails with `LockNotFound` when there is no
    /// lease on `path` at all.
    pub fn release_lock_checked(&self, path: &str, agent_id: &str) -> Result<(), StorageError> {
        let key = path.as_bytes();
        match self.file_locks.get(key)? {
            None => Err(StorageError::LockNotFound(path.to_string())),
            Some(bytes) => {
                if let Some(lease) = decode::<FileLease>(&bytes) {
                    if lease.holder_agent_id == agent_id {
                        self.file_locks.remove(key)?;
                    }
                }
                Ok(())
            }
        }
    }

    /// Remove every lease held by `agent_id`.
    pub fn release_all_locks(&self, agent_id: &str) -> Result<u64, StorageError> {
        let mut released = 0u64;
        for entry in self.file_locks.iter() {
            let (key, bytes) = entry?;
            let Some(lease) = decode::<FileLease>(&bytes) else {
                continue;
            };
            if lease.holder_agent_id == agent_id {
                self.file_locks.remove(key)?;
                released += 1;
            }
        }
        Ok(released)
    }

    pub fn is_locked(&self, path: &str) -> Result<bool, StorageError> {
        Ok(self.file_locks.contains_key(path.as_bytes())?)
    }

    pub fn get_lock(&self, path: &str) -> Result<Option<FileLease>, StorageError> {
        match self.file_locks.get(path.as_bytes())? {
            None => Ok(None),
            Some(bytes) => Ok(decode(&bytes)),
        }
    }

    pub fn get_locks_for_agent(&self, agent_id: &str) -> Result<Vec<FileLease>, StorageError> {
        let leases = self
            .file_locks
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<FileLease>(&bytes))
            .filter(|l| l.holder_agent_id == agent_id)
            .collect();
        Ok(leases)
    }

    pub fn get_all_locks(&self) -> Result<Vec<FileLease>, StorageError> {
        let leases = self
            .file_locks
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<FileLease>(&bytes))
            .collect();
        Ok(leases)
    }
}

#[cfg(test)]
#[path = "leases_tests.rs"]
mod tests;
