// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The external execution-engine contract (spec.md §6): the boundary
//! between the core and the LLM-backed engine that turns a task
//! description into a result string. The engine itself is explicitly out
//! of scope; this crate only defines the trait and the two in-process
//! stand-ins used when no real engine is configured.

pub mod engine;

pub use engine::{ExecutionEngine, ExecutionError, FakeEngine, NullEngine};
