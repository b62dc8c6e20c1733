// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Smith daemon (`smithd`).
//!
//! Scaffolds `.smith/`, opens the store, and runs a worker pool against it
//! until interrupted. The execution engine behind the pool is `FakeEngine`
//! until a real one is wired in (spec.md §6: out of scope for this repo).

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use smith_adapters::FakeEngine;
use smith_daemon::{init_project_dir, init_state_dir, open_coordinator, state_dir_override, Config};
use smith_worker::{Orchestrator, WorkerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Resolves the `.smith/` directory, scaffolding it if absent.
/// `SMITH_STATE_DIR`, if set, names that directory directly; otherwise
/// it's `<cwd>/.smith`.
fn resolve_state_dir() -> std::io::Result<PathBuf> {
    match state_dir_override() {
        Some(dir) => init_state_dir(&dir),
        None => init_project_dir(&std::env::current_dir()?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("smithd {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" => {
                println!("smithd {}", env!("CARGO_PKG_VERSION"));
                println!("Local multi-worker task coordination daemon.");
                println!();
                println!("USAGE:\n    smithd");
                println!();
                println!("ENV:");
                println!("    SMITH_STATE_DIR   overrides the .smith/ directory location");
                println!("    SMITH_POLL_MS     overrides the worker poll interval");
                return Ok(());
            }
            other => {
                eprintln!("error: unexpected argument '{other}'");
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let state_dir = resolve_state_dir()?;
    let config = Config::load(&state_dir)?;

    info!(?state_dir, ?config, "smithd starting");

    let coordinator = open_coordinator(&state_dir)?;
    let engine = Arc::new(FakeEngine::new());

    let worker_configs: Vec<WorkerConfig> = (0..config.claim_concurrency)
        .map(|i| {
            let mut wc = WorkerConfig::new(format!("worker-{i}"), "", std::process::id());
            wc.poll_interval = config.poll_interval();
            wc
        })
        .collect();

    let mut orchestrator = Orchestrator::new(coordinator)
        .with_sweep_interval(config.heartbeat_interval())
        .with_agent_timeout(config.dead_agent_timeout());
    orchestrator.spawn(worker_configs, engine);

    tokio::signal::ctrl_c().await?;
    info!("smithd shutting down");
    orchestrator.shutdown().await;
    Ok(())
}
