// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Top-level daemon error: scaffolding, configuration, and storage
/// failures that can occur before the worker pool is running.
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("could not serialize config.toml: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Storage(#[from] smith_storage::StorageError),
}
