//! # vessel - Dynamic Registration for a Shared State Container
//!
//! `vessel` keeps one lazily-created state container per process and lets
//! independently-loaded modules register and deregister their own pieces of
//! it at runtime: slice reducers driving dispatch, and long-running
//! cancellable background processes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vessel::prelude::*;
//!
//! enum AppAction { Refresh }
//! impl Action for AppAction {}
//!
//! // Obtain (or create, exactly once per process) the shared store.
//! let store = vessel::create_store(StoreOptions::new())?;
//!
//! // Each module wires its own slice on demand.
//! let reducers = ReducerRegistry::attach(store.clone())?;
//! reducers.add("session", |state, action: &AppAction| { /* ... */ });
//!
//! store.dispatch(AppAction::Refresh);
//! ```
//!
//! Background processes flow through a [`ProcessRegistry`], built either
//! from a [`Behavior::Runnable`] supplied at creation under
//! [`RUNNER_BEHAVIOR`], or from an explicit run capability:
//!
//! ```rust,ignore
//! let processes = ProcessRegistry::with_runner(store, Arc::new(TokioRunner))?;
//! processes.add_future("poller", async { /* ... */ });
//! processes.remove("poller"); // cancels, fire-and-forget
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use vessel_core::{
    // Action
    Action,
    // Reducers
    ArcReducer,
    ArgumentError,
    // Behaviors
    Behavior,
    BehaviorError,
    BehaviorMap,
    // Errors
    BoxError,
    Control,
    // Validation
    IsEmpty,
    Middleware,
    NOOP_SLICE,
    NoopReducer,
    // Processes
    ProcessFuture,
    ProcessHandle,
    ProcessRunner,
    RUNNER_BEHAVIOR,
    Reducer,
    ScopeError,
    // Slices
    SliceState,
    StoreError,
    VesselError,
    slice_state,
};

pub use vessel_std::{
    // Global slot
    GlobalSlot,
    INSPECTOR_SLOT,
    // Inspection
    Inspector,
    InspectorSlot,
    ProcessRegistry,
    ProcessScope,
    // Registries
    ReducerRegistry,
    STORE_SLOT,
    Scope,
    SlotInit,
    SlotValue,
    // Store
    Store,
    StoreBuilder,
    StoreOptions,
    SubscriptionId,
    get_or_create,
};

#[cfg(feature = "tokio")]
pub use vessel_std::{TokioHandle, TokioRunner};

use std::sync::Arc;

/// Testing utilities.
pub mod testing {
    pub use vessel_std::testing::{
        CountingReducer, MapScope, MockHandle, MockRunner, RecordingMiddleware,
    };
}

/// Obtains the process-wide store, creating and publishing it on first call.
///
/// Idempotent per process: repeat calls return the identical store and treat
/// `options.behaviors` as advisory only (behaviors are fixed at first
/// creation). Equivalent to [`get_or_create`] against
/// [`GlobalSlot::process`].
pub fn create_store<A: Action>(options: StoreOptions<A>) -> Result<Arc<Store<A>>, VesselError> {
    get_or_create(&GlobalSlot::process(), options.behaviors)
}

/// Prelude module - common imports for Vessel.
///
/// # Usage
///
/// ```rust,ignore
/// use vessel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Core traits
        Action,
        Behavior,
        BehaviorMap,
        Control,
        GlobalSlot,
        Middleware,
        ProcessHandle,
        ProcessRegistry,
        ProcessRunner,
        Reducer,
        // Registries
        ReducerRegistry,
        SliceState,
        Store,
        StoreBuilder,
        StoreOptions,
        // Errors
        VesselError,
        slice_state,
    };
}
