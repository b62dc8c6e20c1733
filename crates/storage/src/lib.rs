// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! smith-storage: an embedded, single-writer-MVCC key-value storage backend.
//!
//! Built on [`sled`] rather than a SQL engine: under the contention pattern
//! of several workers each polling at 30-100ms and writing heartbeats,
//! claims, and lock operations, a row-locked SQL file store hits write-lock
//! timeouts, while sled's single-writer-queue-plus-unlimited-readers model
//! has no `BUSY` failure mode and carries no native/C dependency. See
//! `DESIGN.md` for the full rationale.
//!
//! Five logical collections live in five [`sled::Tree`]s: `tasks`, `agents`,
//! `file_locks`, `events`, `sessions`, plus a `meta` tree holding the
//! monotonic sequence counters for event ids and task-id allocation.

mod agents;
mod error;
mod events;
mod leases;
mod sessions;
mod store;
mod tasks;

pub use error::StorageError;
pub use store::{Store, TaskStats};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
