//! Runtime registration of background processes.
//!
//! Tracks named cancellable background processes on the shared store. The
//! execution engine is the [`ProcessRunner`] capability supplied at
//! construction, either explicitly or auto-wired from the reserved behavior
//! key of the store's behavior mapping.

use crate::store::Store;
use futures::FutureExt;
use std::future::Future;
use std::sync::Arc;
use vessel_core::{
    Action, ArgumentError, IsEmpty, ProcessFuture, ProcessHandle, ProcessRunner, RUNNER_BEHAVIOR,
    VesselError,
};

/// A stateless facade tracking background processes on a shared store.
///
/// Holds no state of its own beyond the run capability; the active process
/// mapping lives on the store.
pub struct ProcessRegistry<A: Action> {
    store: Arc<Store<A>>,
    runner: Arc<dyn ProcessRunner>,
}

impl<A: Action> ProcessRegistry<A> {
    /// Attaches a registry, auto-wiring the run capability from the
    /// reserved runnable behavior supplied at store creation.
    ///
    /// Fails fast with a store error if the store is invalid, or with
    /// [`ArgumentError::MissingRunner`] if no runnable behavior exists
    /// under the reserved key.
    pub fn attach(store: Arc<Store<A>>) -> Result<Self, VesselError> {
        store.validate()?;
        let runner = store
            .runner()
            .ok_or_else(|| ArgumentError::MissingRunner(RUNNER_BEHAVIOR.to_string()))?;
        Ok(Self { store, runner })
    }

    /// Attaches a registry with an explicitly supplied run capability.
    pub fn with_runner(
        store: Arc<Store<A>>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Result<Self, VesselError> {
        store.validate()?;
        Ok(Self { store, runner })
    }

    /// Returns the store this registry operates on.
    pub fn store(&self) -> &Arc<Store<A>> {
        &self.store
    }

    /// Returns the running handle for `key`, or `None` if the key is not
    /// registered.
    pub fn get(&self, key: &str) -> Option<Arc<dyn ProcessHandle>> {
        self.store.process(key)
    }

    /// Starts a process under `key` and returns its handle.
    ///
    /// An empty key returns `None` quietly. If `key` already has a running
    /// handle it is returned unchanged and the run capability is not
    /// invoked again (idempotent); the supplied definition is dropped
    /// unstarted.
    pub fn add(&self, key: &str, process: ProcessFuture) -> Option<Arc<dyn ProcessHandle>> {
        if IsEmpty::is_empty(key) {
            return None;
        }
        let runner = &self.runner;
        let handle = self.store.process_or_insert_with(key, || {
            tracing::debug!(key, "process started");
            runner.run(process)
        });
        Some(handle)
    }

    /// [`add`](Self::add) for an unboxed future.
    pub fn add_future<F>(&self, key: &str, process: F) -> Option<Arc<dyn ProcessHandle>>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.add(key, process.boxed())
    }

    /// Cancels and deregisters the process under `key`.
    ///
    /// Returns false for an absent key. Cancellation is fire-and-forget:
    /// the registry neither awaits nor verifies that the process stopped.
    pub fn remove(&self, key: &str) -> bool {
        match self.store.take_process(key) {
            Some(handle) => {
                handle.cancel();
                tracing::debug!(key, "process cancelled and removed");
                true
            }
            None => false,
        }
    }
}

impl<A: Action> Clone for ProcessRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            runner: Arc::clone(&self.runner),
        }
    }
}
