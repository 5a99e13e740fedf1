//! Testing utilities for Vessel.
//!
//! This module provides test doubles for the external collaborators the
//! container consumes:
//!
//! - [`RecordingMiddleware`]: a middleware that counts the actions it sees
//! - [`CountingReducer`]: a reducer maintaining a `u64` dispatch count
//! - [`MockRunner`] / [`MockHandle`]: a run-process capability recording
//!   run and cancel invocations without executing anything
//! - [`MapScope`]: an isolated in-memory scope, so singleton tests don't
//!   share the real process scope

use crate::scope::{Scope, SlotInit, SlotValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vessel_core::{
    Action, Control, Middleware, ProcessFuture, ProcessHandle, ProcessRunner, Reducer, SliceState,
    slice_state,
};

// ============================================================================
// Recording Middleware
// ============================================================================

/// A middleware that records how many actions it has seen.
///
/// Clones share the same counter, so a clone can be handed to the store
/// while the test keeps inspecting the original.
#[derive(Clone)]
pub struct RecordingMiddleware {
    seen: Arc<AtomicUsize>,
    control: Control,
}

impl RecordingMiddleware {
    /// A recorder that lets every action continue.
    pub fn new() -> Self {
        Self {
            seen: Arc::new(AtomicUsize::new(0)),
            control: Control::Next,
        }
    }

    /// A recorder that swallows every action.
    pub fn stopping() -> Self {
        Self {
            seen: Arc::new(AtomicUsize::new(0)),
            control: Control::Stop,
        }
    }

    /// Number of actions observed so far.
    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }
}

impl Default for RecordingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> Middleware<A> for RecordingMiddleware {
    fn on_action(&self, _action: &A) -> Control {
        self.seen.fetch_add(1, Ordering::SeqCst);
        self.control
    }
}

// ============================================================================
// Counting Reducer
// ============================================================================

/// A reducer whose `u64` slice counts the actions reduced.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountingReducer;

impl<A: Action> Reducer<A> for CountingReducer {
    fn reduce(&self, state: Option<SliceState>, _action: &A) -> SliceState {
        let current = state
            .and_then(|slice| slice.downcast::<u64>().ok())
            .map(|count| *count)
            .unwrap_or(0);
        slice_state(current + 1)
    }
}

// ============================================================================
// Mock Runner
// ============================================================================

/// A run-process capability that records invocations and runs nothing.
///
/// Dropped process futures are never polled; tests assert on [`runs`] and
/// [`cancels`] counts instead of real execution.
///
/// [`runs`]: MockRunner::runs
/// [`cancels`]: MockRunner::cancels
#[derive(Default)]
pub struct MockRunner {
    runs: AtomicUsize,
    cancels: Arc<AtomicUsize>,
}

impl MockRunner {
    /// Creates a shared mock runner.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of times `run` was invoked.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    /// Number of cancels across all handles this runner produced.
    pub fn cancels(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, _process: ProcessFuture) -> Arc<dyn ProcessHandle> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockHandle {
            cancels: Arc::clone(&self.cancels),
            cancelled: AtomicBool::new(false),
        })
    }
}

/// Handle produced by [`MockRunner`].
pub struct MockHandle {
    cancels: Arc<AtomicUsize>,
    cancelled: AtomicBool,
}

impl MockHandle {
    /// True once `cancel` has been called on this handle.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl ProcessHandle for MockHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Map Scope
// ============================================================================

/// An isolated in-memory scope.
///
/// Unlike [`ProcessScope`](crate::ProcessScope), every `MapScope` has its
/// own storage, so tests can exercise the singleton guard without touching
/// process-wide state.
#[derive(Default)]
pub struct MapScope {
    entries: Mutex<HashMap<String, SlotValue>>,
}

impl MapScope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scope for MapScope {
    fn get(&self, key: &str) -> Option<SlotValue> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: SlotValue) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value);
    }

    fn get_or_set_with(
        &self,
        key: &str,
        init: SlotInit<'_>,
    ) -> Result<SlotValue, vessel_core::VesselError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(existing) = entries.get(key) {
            return Ok(Arc::clone(existing));
        }
        let value = init()?;
        entries.insert(key.to_string(), Arc::clone(&value));
        Ok(value)
    }
}
