//! Container and reducer-registry integration tests.

use std::sync::Arc;
use vessel::prelude::*;
use vessel::testing::{CountingReducer, MapScope, RecordingMiddleware};
use vessel::{
    ArcReducer, BehaviorError, NOOP_SLICE, RUNNER_BEHAVIOR, ScopeError, StoreError, get_or_create,
};

#[derive(Debug, Clone, Copy)]
enum AppAction {
    Refresh,
}
impl Action for AppAction {}

fn isolated_slot() -> GlobalSlot {
    GlobalSlot::with_scope(Arc::new(MapScope::new()))
}

#[test]
fn sequential_accessor_calls_return_identical_store() {
    let slot = isolated_slot();
    let first = get_or_create::<AppAction>(&slot, BehaviorMap::new()).unwrap();
    let second = get_or_create::<AppAction>(&slot, BehaviorMap::new()).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn accessor_without_global_scope_fails_cleanly() {
    let slot = GlobalSlot::detached();
    let result = get_or_create::<AppAction>(&slot, BehaviorMap::new());
    assert!(matches!(
        result,
        Err(VesselError::Scope(ScopeError::Unavailable))
    ));
}

#[test]
fn foreign_value_in_slot_is_reported_as_invalid_store() {
    let slot = isolated_slot();
    slot.set("@@vessel/store", Arc::new(123u32)).unwrap();
    let result = get_or_create::<AppAction>(&slot, BehaviorMap::new());
    assert!(matches!(
        result,
        Err(VesselError::Store(StoreError::ExistingInvalid(_)))
    ));
}

#[test]
fn non_runnable_behavior_under_reserved_key_is_rejected() {
    let mut behaviors = BehaviorMap::new();
    behaviors.insert(
        RUNNER_BEHAVIOR,
        Behavior::callable(|_: &AppAction| Control::Next),
    );
    let result = get_or_create::<AppAction>(&isolated_slot(), behaviors);
    assert!(matches!(
        result,
        Err(VesselError::Behavior(BehaviorError::NotRunnable(_)))
    ));
}

#[test]
fn add_then_get_round_trips_and_reconfigures_dispatch() {
    let store = StoreBuilder::<AppAction>::new().build().unwrap();
    let registry = ReducerRegistry::attach(store.clone()).unwrap();

    let stored = registry.add("count", CountingReducer).unwrap();
    assert!(Arc::ptr_eq(&stored, &registry.get("count").unwrap()));

    store.dispatch(AppAction::Refresh);
    assert_eq!(*store.slice::<u64>("count").unwrap(), 1);
}

#[test]
fn re_adding_a_key_keeps_the_first_reducer() {
    let store = StoreBuilder::<AppAction>::new().build().unwrap();
    let registry = ReducerRegistry::attach(store).unwrap();

    let first = registry.add("count", CountingReducer).unwrap();
    let second = registry.add("count", CountingReducer).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn add_many_yields_exactly_the_combined_mapping() {
    let store = StoreBuilder::<AppAction>::new().build().unwrap();
    let registry = ReducerRegistry::attach(store.clone()).unwrap();

    let h1: ArcReducer<AppAction> = Arc::new(CountingReducer);
    let h2: ArcReducer<AppAction> =
        Arc::new(|state: Option<SliceState>, _: &AppAction| -> SliceState {
            state.unwrap_or_else(|| slice_state("ready".to_string()))
        });
    registry.add_many(vec![
        ("a".to_string(), h1.clone()),
        ("b".to_string(), h2.clone()),
    ]);

    assert!(Arc::ptr_eq(&registry.get("a").unwrap(), &h1));
    assert!(Arc::ptr_eq(&registry.get("b").unwrap(), &h2));
    assert_eq!(
        store.reducer_keys(),
        vec![NOOP_SLICE.to_string(), "a".to_string(), "b".to_string()]
    );
}

#[test]
fn removal_restores_the_not_found_sentinel() {
    let store = StoreBuilder::<AppAction>::new().build().unwrap();
    let registry = ReducerRegistry::attach(store.clone()).unwrap();

    registry.add("count", CountingReducer);
    store.dispatch(AppAction::Refresh);
    registry.remove("count");

    assert!(registry.get("count").is_none());
    assert!(store.slice::<u64>("count").is_none());
    assert!(store.validate().is_ok());
}

#[test]
fn middleware_observes_and_can_swallow_actions() {
    let recorder = RecordingMiddleware::stopping();
    let mut behaviors = BehaviorMap::new();
    behaviors.insert("guard", Behavior::callable(recorder.clone()));

    let store = get_or_create::<AppAction>(&isolated_slot(), behaviors).unwrap();
    let registry = ReducerRegistry::attach(store.clone()).unwrap();
    registry.add("count", CountingReducer);

    store.dispatch(AppAction::Refresh);
    assert_eq!(recorder.seen(), 1);
    assert!(store.slice::<u64>("count").is_none());
}

#[test]
fn behaviors_are_fixed_at_first_creation() {
    let slot = isolated_slot();
    let first = get_or_create::<AppAction>(&slot, BehaviorMap::new()).unwrap();

    let mut late = BehaviorMap::new();
    late.insert("late", Behavior::callable(|_: &AppAction| Control::Next));
    let second = get_or_create::<AppAction>(&slot, late).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(second.behaviors().is_empty());
}
