//! The shared state container and its factory.
//!
//! A [`Store`] is the single process-wide state vessel: an opaque state tree
//! of string-keyed slices, the active reducer mapping driving dispatch, the
//! active background-process mapping, subscribers, and the behavior mapping
//! fixed at creation time.
//!
//! All mutable interior state sits behind one mutex scoped to the store, so
//! every mutating operation (dispatch, reconfiguration, process tracking,
//! subscription) is serialized. Middlewares run before the lock is taken and
//! subscribers are notified after it is released, so user callbacks can read
//! the store without deadlocking.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use vessel_core::{
    Action, ArcReducer, Behavior, BehaviorError, BehaviorMap, Control, NOOP_SLICE, NoopReducer,
    ProcessHandle, ProcessRunner, Reducer, RUNNER_BEHAVIOR, SliceState, StoreError, VesselError,
};

/// Well-known slot key under which an [`Inspector`] capability may be
/// published by the hosting environment.
pub const INSPECTOR_SLOT: &str = "@@vessel/inspector";

/// A developer-inspection capability, activated once at store creation.
///
/// Out-of-scope collaborator: implementations may attach debuggers, record
/// state, or do nothing at all.
pub trait Inspector: Send + Sync + 'static {
    /// Called exactly once after the store passes its validity check.
    fn activate(&self);
}

/// Slot wrapper for publishing an [`Inspector`] to the global scope.
///
/// The global slot stores `Arc<dyn Any>`, which cannot hold a bare
/// `Arc<dyn Inspector>`; publishing wraps it in this concrete type instead.
pub struct InspectorSlot(pub Arc<dyn Inspector>);

/// Identifier of a store subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<A> = Arc<dyn Fn(&A) + Send + Sync>;

struct Inner<A: Action> {
    state: HashMap<String, SliceState>,
    reducers: HashMap<String, ArcReducer<A>>,
    processes: HashMap<String, Arc<dyn ProcessHandle>>,
    subscribers: Vec<(SubscriptionId, Subscriber<A>)>,
    next_subscription: u64,
}

/// The single shared state container.
///
/// Exactly one valid `Store` exists per process when obtained through the
/// singleton guard; validity requires the active reducer mapping to be
/// non-empty, which the always-present noop slice guarantees.
///
/// The store exclusively owns its reducer and process mappings. The
/// registries in this crate are stateless facades that read and write
/// through an `Arc<Store>` reference.
pub struct Store<A: Action> {
    behaviors: BehaviorMap<A>,
    inner: Mutex<Inner<A>>,
}

impl<A: Action> Store<A> {
    fn lock(&self) -> MutexGuard<'_, Inner<A>> {
        // Store operations are idempotent or whole, so recovering a
        // poisoned lock cannot observe a half-applied mutation.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Dispatches an action through the middlewares and the active reducers.
    ///
    /// Middlewares run first, in behavior-map insertion order; any
    /// [`Control::Stop`] swallows the action before reduction. Every active
    /// reducer then receives its current slice state (or `None` for an
    /// uninitialised slice) and the action. Subscribers are notified last,
    /// outside the store lock.
    pub fn dispatch(&self, action: A) {
        for middleware in self.behaviors.middlewares() {
            if middleware.on_action(&action) == Control::Stop {
                tracing::trace!(
                    action = std::any::type_name::<A>(),
                    "action stopped by middleware"
                );
                return;
            }
        }

        let subscribers: Vec<Subscriber<A>> = {
            let mut inner = self.lock();
            let Inner {
                state, reducers, ..
            } = &mut *inner;
            for (key, reducer) in reducers.iter() {
                let previous = state.get(key).cloned();
                let next = reducer.reduce(previous, &action);
                state.insert(key.clone(), next);
            }
            inner
                .subscribers
                .iter()
                .map(|(_, subscriber)| Arc::clone(subscriber))
                .collect()
        };

        for subscriber in subscribers {
            subscriber(&action);
        }
    }

    /// Returns a snapshot of the whole state tree. Slices are shared, so
    /// this clones reference counts only.
    pub fn state(&self) -> HashMap<String, SliceState> {
        self.lock().state.clone()
    }

    /// Returns the slice under `key` downcast to `T`, or `None` if the
    /// slice is missing or holds a different type.
    pub fn slice<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let slice = self.lock().state.get(key).cloned()?;
        slice.downcast::<T>().ok()
    }

    /// Registers a subscriber invoked after every reduced dispatch.
    pub fn subscribe(&self, subscriber: impl Fn(&A) + Send + Sync + 'static) -> SubscriptionId {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.subscribers.push((id, Arc::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns false if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
        inner.subscribers.len() != before
    }

    /// Installs a complete replacement reducer mapping (the reconfigure
    /// operation).
    ///
    /// The underlying combination accepts only a full mapping, never an
    /// incremental patch; the reducer registry always rebuilds the whole
    /// set. The noop slice is re-seeded if the mapping lacks it, and state
    /// slices whose reducer vanished are pruned.
    pub fn replace_reducers(&self, reducers: HashMap<String, ArcReducer<A>>) {
        let mut inner = self.lock();
        Self::install_reducers(&mut inner, reducers);
    }

    fn install_reducers(inner: &mut Inner<A>, mut reducers: HashMap<String, ArcReducer<A>>) {
        reducers
            .entry(NOOP_SLICE.to_string())
            .or_insert_with(|| Arc::new(NoopReducer));
        inner.state.retain(|key, _| reducers.contains_key(key));
        inner.reducers = reducers;
        tracing::debug!(reducers = inner.reducers.len(), "reducer mapping replaced");
    }

    /// Returns the sorted keys of the active reducer mapping.
    pub fn reducer_keys(&self) -> Vec<String> {
        let inner = self.lock();
        let mut keys: Vec<String> = inner.reducers.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the behavior mapping supplied at creation, unmodified.
    pub fn behaviors(&self) -> &BehaviorMap<A> {
        &self.behaviors
    }

    /// Returns the run-process capability wired under the reserved behavior
    /// key, if one was supplied.
    pub fn runner(&self) -> Option<Arc<dyn ProcessRunner>> {
        self.behaviors
            .get(RUNNER_BEHAVIOR)
            .and_then(|behavior| behavior.as_runner())
            .map(Arc::clone)
    }

    /// Checks the container validity invariant: the active reducer mapping
    /// must be non-empty.
    ///
    /// The presence of the base operations is structural in this crate; the
    /// reducer mapping is the part that can only be checked at runtime.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.lock().reducers.is_empty() {
            return Err(StoreError::NoReducers);
        }
        Ok(())
    }

    // Reducer-mapping access for the reducer registry. The read-modify-
    // write helpers rebuild the complete replacement mapping and install
    // it under a single lock acquisition, so concurrent registrations
    // cannot overwrite each other.

    pub(crate) fn reducer(&self, key: &str) -> Option<ArcReducer<A>> {
        self.lock().reducers.get(key).cloned()
    }

    pub(crate) fn reducers_snapshot(&self) -> HashMap<String, ArcReducer<A>> {
        self.lock().reducers.clone()
    }

    /// Returns `(stored, inserted)`: the reducer now active under `key`,
    /// and whether this call inserted it (false means the existing one was
    /// kept and no reconfiguration happened).
    pub(crate) fn reducer_or_insert(
        &self,
        key: &str,
        reducer: ArcReducer<A>,
    ) -> (ArcReducer<A>, bool) {
        let mut inner = self.lock();
        if let Some(existing) = inner.reducers.get(key) {
            return (Arc::clone(existing), false);
        }
        let mut reducers = inner.reducers.clone();
        reducers.insert(key.to_string(), Arc::clone(&reducer));
        Self::install_reducers(&mut inner, reducers);
        (reducer, true)
    }

    pub(crate) fn take_reducer(&self, key: &str) -> Option<ArcReducer<A>> {
        let mut inner = self.lock();
        if !inner.reducers.contains_key(key) {
            return None;
        }
        let mut reducers = inner.reducers.clone();
        let removed = reducers.remove(key);
        Self::install_reducers(&mut inner, reducers);
        removed
    }

    // Process-mapping access for the process registry. `or_insert_with`
    // runs the factory under the store lock, so one key can never start
    // two processes.

    pub(crate) fn process(&self, key: &str) -> Option<Arc<dyn ProcessHandle>> {
        self.lock().processes.get(key).cloned()
    }

    pub(crate) fn process_or_insert_with(
        &self,
        key: &str,
        start: impl FnOnce() -> Arc<dyn ProcessHandle>,
    ) -> Arc<dyn ProcessHandle> {
        let mut inner = self.lock();
        if let Some(existing) = inner.processes.get(key) {
            return Arc::clone(existing);
        }
        let handle = start();
        inner.processes.insert(key.to_string(), Arc::clone(&handle));
        handle
    }

    pub(crate) fn take_process(&self, key: &str) -> Option<Arc<dyn ProcessHandle>> {
        self.lock().processes.remove(key)
    }
}

impl<A: Action> std::fmt::Debug for Store<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Store")
            .field("slices", &inner.state.len())
            .field("reducers", &inner.reducers.len())
            .field("processes", &inner.processes.len())
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

/// Creation options for the top-level store accessor.
pub struct StoreOptions<A: Action> {
    /// Named behaviors wired into the dispatch pipeline at creation.
    pub behaviors: BehaviorMap<A>,
}

impl<A: Action> StoreOptions<A> {
    /// Options with no behaviors.
    pub fn new() -> Self {
        Self {
            behaviors: BehaviorMap::new(),
        }
    }

    /// Adds a behavior under `key`.
    pub fn behavior(mut self, key: impl Into<String>, behavior: Behavior<A>) -> Self {
        self.behaviors.insert(key, behavior);
        self
    }
}

impl<A: Action> Default for StoreOptions<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a [`Store`] — the container factory.
pub struct StoreBuilder<A: Action> {
    behaviors: BehaviorMap<A>,
    inspector: Option<Arc<dyn Inspector>>,
}

impl<A: Action> Default for StoreBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> StoreBuilder<A> {
    /// Creates a builder with no behaviors.
    pub fn new() -> Self {
        Self {
            behaviors: BehaviorMap::new(),
            inspector: None,
        }
    }

    /// Supplies the complete behavior mapping.
    pub fn behaviors(mut self, behaviors: BehaviorMap<A>) -> Self {
        self.behaviors = behaviors;
        self
    }

    /// Adds a single behavior under `key`.
    pub fn behavior(mut self, key: impl Into<String>, behavior: Behavior<A>) -> Self {
        self.behaviors.insert(key, behavior);
        self
    }

    /// Supplies an inspection capability to activate at creation.
    pub fn inspector(mut self, inspector: Arc<dyn Inspector>) -> Self {
        self.inspector = Some(inspector);
        self
    }

    /// Builds the store.
    ///
    /// Validates the behavior mapping (the reserved runner key must hold a
    /// runnable behavior), seeds the noop slice, runs the container validity
    /// check, and activates the inspector if one is present.
    pub fn build(self) -> Result<Arc<Store<A>>, VesselError> {
        if let Some(behavior) = self.behaviors.get(RUNNER_BEHAVIOR) {
            if behavior.as_runner().is_none() {
                return Err(BehaviorError::NotRunnable(RUNNER_BEHAVIOR.to_string()).into());
            }
        }

        let mut reducers: HashMap<String, ArcReducer<A>> = HashMap::new();
        reducers.insert(NOOP_SLICE.to_string(), Arc::new(NoopReducer));

        let store = Arc::new(Store {
            behaviors: self.behaviors,
            inner: Mutex::new(Inner {
                state: HashMap::new(),
                reducers,
                processes: HashMap::new(),
                subscribers: Vec::new(),
                next_subscription: 0,
            }),
        });

        store
            .validate()
            .map_err(|err| StoreError::CreationFailed(err.to_string()))?;

        if let Some(inspector) = &self.inspector {
            inspector.activate();
        }

        tracing::debug!(behaviors = store.behaviors.len(), "store created");
        Ok(store)
    }
}
