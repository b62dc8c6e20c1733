// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `.smith/` directory scaffolding: the narrow, idempotent directory-layout
//! contract spec.md leaves in scope despite excluding CLI/project-scaffolding
//! UX at large (spec.md §6 "Scaffolding contract").

use crate::config::Config;
use smith_storage::Store;
use std::io;
use std::path::{Path, PathBuf};

const GITIGNORE_CONTENTS: &str = "smith.db*\nconfig.toml\n";

/// Idempotently creates `<root>/.smith/`, opens/creates the sled store at
/// `<root>/.smith/smith.db`, writes a default `config.toml` if absent, and
/// writes/merges a `.gitignore` naming the store and config files. Returns
/// the `.smith/` directory path.
pub fn init_project_dir(root: &Path) -> io::Result<PathBuf> {
    init_state_dir(&root.join(".smith"))
}

/// Same scaffolding as [`init_project_dir`], but `state_dir` is the
/// directory itself rather than a project root to nest `.smith/` under —
/// used when `SMITH_STATE_DIR` names the directory directly.
pub fn init_state_dir(state_dir: &Path) -> io::Result<PathBuf> {
    std::fs::create_dir_all(state_dir)?;

    let db_path = state_dir.join("smith.db");
    Store::open(&db_path)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?
        .flush()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

    let config_path = state_dir.join("config.toml");
    if !config_path.exists() {
        let toml = toml::to_string_pretty(&Config::default())
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        std::fs::write(&config_path, toml)?;
    }

    write_gitignore(state_dir)?;
    Ok(state_dir.to_path_buf())
}

fn write_gitignore(state_dir: &Path) -> io::Result<()> {
    let path = state_dir.join(".gitignore");
    let existing = std::fs::read_to_string(&path).unwrap_or_default();
    let mut lines: Vec<&str> = existing.lines().collect();

    let mut changed = false;
    for wanted in GITIGNORE_CONTENTS.lines() {
        if !lines.contains(&wanted) {
            lines.push(wanted);
            changed = true;
        }
    }

    if changed || !path.exists() {
        let merged = lines.join("\n") + "\n";
        std::fs::write(&path, merged)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "scaffold_tests.rs"]
mod tests;
