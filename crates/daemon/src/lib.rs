// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Scaffolding and wiring for the Smith task coordination substrate: the
//! `.smith/` directory layout, configuration, and the composite value that
//! bundles storage with its three coordinator subsystems (spec.md §9
//! "Cyclic handles"). Never imported by `smith-core`, `smith-storage`,
//! `smith-coordinator`, `smith-worker`, or `smith-adapters` — this crate is
//! the one place project-scaffolding concerns live.

mod config;
mod error;
mod scaffold;

pub use config::{state_dir_override, Config};
pub use error::DaemonError;
pub use scaffold::{init_project_dir, init_state_dir};

use smith_coordinator::Coordinator;
use smith_storage::Store;
use std::path::Path;
use std::sync::Arc;

/// Opens the store at `<project_dir>/smith.db` and builds a `Coordinator`
/// over it. `project_dir` is the `.smith/` directory itself (the value
/// [`init_project_dir`] returns), not the project root.
pub fn open_coordinator(project_dir: &Path) -> Result<Coordinator, DaemonError> {
    let store = Arc::new(Store::open(project_dir.join("smith.db"))?);
    Ok(Coordinator::new(store))
}
