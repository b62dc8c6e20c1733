// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage-level error type.

use thiserror::Error;

/// Errors raised by [`crate::Store`] operations.
///
/// Every operation either commits fully or has no effect (spec.md §4.1
/// "Failure model") — these variants describe why an operation didn't
/// commit, never a partially-applied state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: &'static str, id: String },

    #[error("task {0} is not claimable")]
    NotClaimable(String),

    #[error("lock held on {path} by {holder}")]
    LockHeld { path: String, holder: String },

    #[error("lock not found: {0}")]
    LockNotFound(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("transaction error: {0}")]
    Transaction(String),
}
