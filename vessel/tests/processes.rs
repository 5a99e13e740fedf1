//! Process-registry integration tests.

use std::sync::Arc;
use vessel::prelude::*;
use vessel::testing::MockRunner;
use vessel::{ArgumentError, RUNNER_BEHAVIOR};

#[derive(Debug, Clone, Copy)]
enum AppAction {}
impl Action for AppAction {}

fn store_with_runner(runner: Arc<MockRunner>) -> Arc<Store<AppAction>> {
    StoreBuilder::new()
        .behavior(RUNNER_BEHAVIOR, Behavior::Runnable(runner))
        .build()
        .unwrap()
}

#[test]
fn attach_auto_wires_the_reserved_runnable_behavior() {
    let runner = MockRunner::shared();
    let registry = ProcessRegistry::attach(store_with_runner(runner.clone())).unwrap();

    registry.add_future("poller", std::future::pending());
    assert_eq!(runner.runs(), 1);
}

#[test]
fn attach_without_runner_behavior_fails_fast() {
    let store = StoreBuilder::<AppAction>::new().build().unwrap();
    let result = ProcessRegistry::attach(store);
    assert!(matches!(
        result,
        Err(VesselError::Argument(ArgumentError::MissingRunner(_)))
    ));
}

#[test]
fn add_then_get_returns_the_running_handle() {
    let runner = MockRunner::shared();
    let registry =
        ProcessRegistry::with_runner(StoreBuilder::<AppAction>::new().build().unwrap(), runner)
            .unwrap();

    let handle = registry.add_future("poller", std::future::pending()).unwrap();
    assert!(Arc::ptr_eq(&handle, &registry.get("poller").unwrap()));
}

#[test]
fn re_adding_a_key_does_not_start_a_second_process() {
    let runner = MockRunner::shared();
    let registry = ProcessRegistry::attach(store_with_runner(runner.clone())).unwrap();

    let first = registry.add_future("poller", std::future::pending()).unwrap();
    let second = registry.add_future("poller", std::future::pending()).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(runner.runs(), 1);
}

#[test]
fn removal_cancels_exactly_once_and_clears_the_key() {
    let runner = MockRunner::shared();
    let registry = ProcessRegistry::attach(store_with_runner(runner.clone())).unwrap();

    registry.add_future("poller", std::future::pending());
    assert!(registry.remove("poller"));

    assert!(registry.get("poller").is_none());
    assert_eq!(runner.cancels(), 1);

    assert!(!registry.remove("poller"));
    assert_eq!(runner.cancels(), 1);
}

#[test]
fn reducers_and_processes_share_one_store() {
    use vessel::testing::CountingReducer;

    let runner = MockRunner::shared();
    let store = store_with_runner(runner.clone());
    let reducers = ReducerRegistry::attach(store.clone()).unwrap();
    let processes = ProcessRegistry::attach(store.clone()).unwrap();

    reducers.add("count", CountingReducer);
    processes.add_future("poller", std::future::pending());

    assert!(reducers.get("count").is_some());
    assert!(processes.get("poller").is_some());
    assert_eq!(runner.runs(), 1);
}

#[cfg(feature = "tokio")]
mod tokio_runner {
    use super::*;
    use std::time::Duration;
    use vessel::TokioRunner;

    #[tokio::test]
    async fn end_to_end_cancellation() {
        let registry = ProcessRegistry::with_runner(
            StoreBuilder::<AppAction>::new().build().unwrap(),
            Arc::new(TokioRunner),
        )
        .unwrap();

        let handle = registry
            .add_future("poller", std::future::pending())
            .unwrap();
        assert!(!handle.is_finished());

        registry.remove("poller");
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("cancelled process should wind down");
    }
}
