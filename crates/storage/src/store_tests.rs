// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn next_counter_starts_at_one_and_increments() {
    let store = Store::temporary().unwrap();
    assert_eq!(store.next_counter("x").unwrap(), 1);
    assert_eq!(store.next_counter("x").unwrap(), 2);
    assert_eq!(store.next_counter("x").unwrap(), 3);
}

#[test]
fn counters_are_independent_per_key() {
    let store = Store::temporary().unwrap();
    assert_eq!(store.next_counter("a").unwrap(), 1);
    assert_eq!(store.next_counter("b").unwrap(), 1);
    assert_eq!(store.next_counter("a").unwrap(), 2);
}

#[test]
fn open_on_disk_path_persists_a_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("smith.db");
    let store = Store::open(&path).unwrap();
    store.next_counter("seq").unwrap();
    store.flush().unwrap();
    assert!(path.exists());
}
