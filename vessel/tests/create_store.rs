//! Top-level accessor test.
//!
//! `create_store` goes through the real process-wide scope, which every
//! test in a binary shares; this file therefore holds a single test.

use std::sync::Arc;
use vessel::prelude::*;
use vessel::testing::CountingReducer;

#[derive(Debug, Clone, Copy)]
enum AppAction {
    Refresh,
}
impl Action for AppAction {}

#[test]
fn create_store_is_idempotent_per_process() {
    let first = vessel::create_store::<AppAction>(StoreOptions::new()).unwrap();
    let second = vessel::create_store::<AppAction>(StoreOptions::new()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    // The shared store is fully usable through either handle.
    let registry = ReducerRegistry::attach(second).unwrap();
    registry.add("count", CountingReducer);
    first.dispatch(AppAction::Refresh);
    assert_eq!(*first.slice::<u64>("count").unwrap(), 1);
}
