// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test builders for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use smith_core::FakeClock;
use smith_coordinator::Coordinator;
use smith_storage::{Store, StorageError};
use std::sync::Arc;

pub fn temp_coordinator() -> Result<Coordinator<FakeClock>, StorageError> {
    let store = Arc::new(Store::temporary()?);
    Ok(Coordinator::with_clock(store, FakeClock::new()))
}
