// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session collection operations.

use crate::store::{decode, encode, Store};
use crate::StorageError;
use smith_core::{Session, SessionStatus};

impl Store {
    pub fn create_session(&self, session: &Session) -> Result<(), StorageError> {
        let key = session.id.as_str().as_bytes();
        let bytes = encode(session)?;
        let inserted = self
            .sessions
            .compare_and_swap(key, None as Option<&[u8]>, Some(bytes))?;
        if inserted.is_err() {
            return Err(StorageError::AlreadyExists {
                kind: "session",
                id: session.id.to_string(),
            });
        }
        Ok(())
    }

    pub fn get_session(&self, id: &str) -> Result<Session, StorageError> {
        let bytes = self
            .sessions
            .get(id.as_bytes())?
            .ok_or_else(|| StorageError::NotFound {
                kind: "session",
                id: id.to_string(),
            })?;
        decode(&bytes).ok_or_else(|| StorageError::NotFound {
            kind: "session",
            id: id.to_string(),
        })
    }

    pub fn update_session(&self, session: &Session) -> Result<(), StorageError> {
        let bytes = encode(session)?;
        self.sessions.insert(session.id.as_str().as_bytes(), bytes)?;
        Ok(())
    }

    /// Most-recently-active first, truncated to `limit`.
    pub fn list_sessions(&self, limit: usize) -> Result<Vec<Session>, StorageError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .iter()
            .values()
            .filter_map(|r| r.ok())
            .filter_map(|bytes| decode::<Session>(&bytes))
            .collect();
        sessions.sort_by_key(|s| std::cmp::Reverse(s.last_active_epoch_ms));
        sessions.truncate(limit);
        Ok(sessions)
    }

    pub fn archive_session(&self, id: &str) -> Result<(), StorageError> {
        let mut session = self.get_session(id)?;
        session.status = SessionStatus::Archived;
        self.update_session(&session)
    }
}

#[cfg(test)]
#[path = "sessions_tests.rs"]
mod tests;
