// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error kinds shared across the storage, coordinator, and worker layers.
//!
//! `smith-storage` and `smith-coordinator` each define their own error enum
//! (`StorageError`, `CoordinatorError`) for operation-specific context, but
//! both wrap or map onto the conceptual kinds here so that callers can match
//! on a stable, closed set regardless of which layer raised the error.

use thiserror::Error;

/// The conceptual error kinds from the coordination protocol.
///
/// `NotClaimable` is a normal control-flow outcome of a lost race, not a
/// fatal error — callers are expected to skip and retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not claimable: {0}")]
    NotClaimable(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("cancelled")]
    Cancelled,
}
