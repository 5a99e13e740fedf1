//! Runtime registration of reducers.
//!
//! Independently-loaded modules register their own slice reducer on demand
//! and can later deregister it without tearing the store down. Every change
//! rebuilds the complete active reducer mapping and installs it through the
//! store's reconfigure operation, since that operation accepts only a full
//! replacement mapping.

use crate::store::Store;
use std::sync::Arc;
use vessel_core::{Action, ArcReducer, IsEmpty, NOOP_SLICE, Reducer, VesselError};

/// A stateless facade registering reducers on a shared store.
///
/// Holds no state of its own; all reads and writes go through the store
/// reference supplied at construction.
pub struct ReducerRegistry<A: Action> {
    store: Arc<Store<A>>,
}

impl<A: Action> ReducerRegistry<A> {
    /// Attaches a registry to a store.
    ///
    /// Fails fast with a store error if the store does not satisfy the
    /// container validity invariant, so a registry can never be built
    /// around a broken store and corrupt it later.
    pub fn attach(store: Arc<Store<A>>) -> Result<Self, VesselError> {
        store.validate()?;
        Ok(Self { store })
    }

    /// Returns the store this registry operates on.
    pub fn store(&self) -> &Arc<Store<A>> {
        &self.store
    }

    /// Returns the active reducer for `key`, or `None` if the key is not
    /// registered.
    pub fn get(&self, key: &str) -> Option<ArcReducer<A>> {
        self.store.reducer(key)
    }

    /// Registers a reducer under `key` and reconfigures the store.
    ///
    /// Benign no-ops return quietly, making registration safe to issue
    /// speculatively from independent modules:
    ///
    /// - an empty key returns `None` without touching the store;
    /// - an already-registered key returns the stored reducer unchanged,
    ///   without reconfiguring (idempotent).
    ///
    /// Otherwise the reducer is inserted and the complete active mapping
    /// (including the noop slice) is reinstalled. Returns the stored
    /// reducer.
    pub fn add(&self, key: &str, reducer: impl Reducer<A>) -> Option<ArcReducer<A>> {
        self.add_shared(key, Arc::new(reducer))
    }

    /// [`add`](Self::add) for an already-shared reducer.
    pub fn add_shared(&self, key: &str, reducer: ArcReducer<A>) -> Option<ArcReducer<A>> {
        if IsEmpty::is_empty(key) {
            return None;
        }
        // Check, insert, and reconfigure happen under one store lock, so
        // concurrent registrations cannot overwrite each other's mapping.
        let (stored, inserted) = self.store.reducer_or_insert(key, reducer);
        if inserted {
            tracing::debug!(key, "reducer registered");
        } else {
            tracing::debug!(key, "reducer already registered");
        }
        Some(stored)
    }

    /// Registers each entry in iteration order.
    ///
    /// Each entry triggers its own reconfiguration, exactly as a sequence
    /// of [`add`](Self::add) calls would.
    pub fn add_many(&self, entries: impl IntoIterator<Item = (String, ArcReducer<A>)>) {
        for (key, reducer) in entries {
            self.add_shared(&key, reducer);
        }
    }

    /// Deregisters the reducer under `key` and reconfigures the store.
    ///
    /// Absent keys and the reserved noop key are quiet no-ops. Returns the
    /// removed reducer. The slice state belonging to the key is pruned by
    /// the reconfiguration.
    pub fn remove(&self, key: &str) -> Option<ArcReducer<A>> {
        if key == NOOP_SLICE {
            return None;
        }
        let removed = self.store.take_reducer(key)?;
        tracing::debug!(key, "reducer removed");
        Some(removed)
    }
}

impl<A: Action> Clone for ReducerRegistry<A> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
