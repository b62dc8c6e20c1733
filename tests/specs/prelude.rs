use smith_coordinator::Coordinator;
use smith_storage::Store;
use std::sync::Arc;

/// A fresh coordinator over an isolated in-memory store, for black-box
/// scenario tests that don't need control over the clock.
pub fn fresh_coordinator() -> Coordinator {
    let store = Arc::new(Store::temporary().expect("open temporary store"));
    Coordinator::new(store)
}
