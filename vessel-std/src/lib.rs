//! # vessel-std
//!
//! Standard implementations for the Vessel dynamic state container.
//!
//! This crate provides the concrete pieces behind the `vessel-core` traits:
//!
//! - [`Store`] and [`StoreBuilder`]: the shared state container and its
//!   factory, wiring behaviors into dispatch and seeding the noop slice
//! - [`get_or_create`]: the singleton guard publishing the store to a
//!   [`GlobalSlot`]
//! - [`ReducerRegistry`]: runtime add/get/remove of slice reducers, with
//!   full reconfiguration of the active mapping on every change
//! - [`ProcessRegistry`]: runtime tracking and cancellation of background
//!   processes through a [`ProcessRunner`](vessel_core::ProcessRunner)
//!   capability
//! - [`TokioRunner`]: a tokio-backed run-process capability (feature
//!   `tokio`)
//! - [`testing`]: test doubles for middlewares, reducers, runners, scopes

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod processes;
mod reducers;
mod scope;
mod singleton;
mod store;

pub mod testing;

#[cfg(feature = "tokio")]
mod runner;

pub use processes::ProcessRegistry;
pub use reducers::ReducerRegistry;
pub use scope::{GlobalSlot, ProcessScope, Scope, SlotInit, SlotValue};
pub use singleton::{STORE_SLOT, get_or_create};
pub use store::{
    INSPECTOR_SLOT, Inspector, InspectorSlot, Store, StoreBuilder, StoreOptions, SubscriptionId,
};

#[cfg(feature = "tokio")]
pub use runner::{TokioHandle, TokioRunner};
