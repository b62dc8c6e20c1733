// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The [`Store`] handle and its shared helpers.

use crate::StorageError;
use std::path::Path;

/// Counts of tasks in each of the four statuses, as returned by
/// `GetTaskStats` (spec.md §4.1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub backlog: u64,
    pub wip: u64,
    pub review: u64,
    pub done: u64,
}

/// A handle to the embedded store.
///
/// Cheap to clone (internally an `Arc`-backed `sled::Db` plus tree handles);
/// the Coordinator, Registry, Lease Manager, and Event Log all hold one of
/// these rather than caching any mutable state of their own (spec.md §3
/// "Ownership").
#[derive(Clone)]
pub struct Store {
    pub(crate) db: sled::Db,
    pub(crate) tasks: sled::Tree,
    pub(crate) agents: sled::Tree,
    pub(crate) file_locks: sled::Tree,
    pub(crate) events: sled::Tree,
    pub(crate) sessions: sled::Tree,
    pub(crate) meta: sled::Tree,
}

impl Store {
    /// Open or create a store at the given file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Open a temporary, in-memory-backed store for tests.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        Ok(Self {
            tasks: db.open_tree("tasks")?,
            agents: db.open_tree("agents")?,
            file_locks: db.open_tree("file_locks")?,
            events: db.open_tree("events")?,
            sessions: db.open_tree("sessions")?,
            meta: db.open_tree("meta")?,
            db,
        })
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    /// Allocate the next value of a named monotonic counter stored in the
    /// `meta` tree. Uses `fetch_and_update`, a single atomic read-modify-write
    /// on one key, so ids are gap-free and strictly increasing even across
    /// concurrent callers (spec.md §9 "Task-id allocation race").
    pub(crate) fn next_counter(&self, key: &str) -> Result<u64, StorageError> {
        let previous = self.meta.fetch_and_update(key, |old| {
            let n = decode_u64(old).unwrap_or(0);
            Some((n + 1).to_be_bytes().to_vec())
        })?;
        Ok(decode_u64(previous.as_deref()).unwrap_or(0) + 1)
    }
}

pub(crate) fn decode_u64(bytes: Option<&[u8]>) -> Option<u64> {
    let array: [u8; 8] = bytes?.try_into().ok()?;
    Some(u64::from_be_bytes(array))
}

pub(crate) fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec(value)?)
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    serde_json::from_slice(bytes).ok()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
