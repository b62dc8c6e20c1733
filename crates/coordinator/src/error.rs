// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordinator-level error type.

use smith_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the coordinator and its peer subsystems
/// (registry, lease manager, event log).
///
/// Storage errors bubble up via `#[from]` unmodified except for the added
/// operation context a caller gets from the `Display` of the wrapping
/// variant (spec.md §7 "Propagation policy").
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("task {0} is not claimable")]
    NotClaimable(String),

    #[error("operation cancelled")]
    Cancelled,
}

impl CoordinatorError {
    /// Whether this error represents a normal, retry-worthy race outcome
    /// rather than a hard failure (spec.md §7: `NotClaimable` "is a normal
    /// outcome of races, not a fatal error").
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoordinatorError::NotClaimable(_) | CoordinatorError::Storage(_)
        )
    }
}
