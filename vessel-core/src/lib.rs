//! # vessel-core
//!
//! Core traits for the Vessel dynamic state container.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! extensions (custom middlewares, process runners, inspectors) that don't
//! need the full `vessel-std` implementation.
//!
//! # Architecture
//!
//! Vessel keeps one shared state container per process and lets
//! independently-loaded modules register and deregister their own pieces of
//! it at runtime. The container is built once, then reconfigured in place:
//!
//! ## Actions ([`Action`])
//!
//! The dispatchable message type. The container is generic over it, so any
//! `Send + Sync + 'static` type can flow through dispatch, including
//! non-serializable payloads such as channels or handles.
//!
//! ## Reducers ([`Reducer`])
//!
//! Pure functions from `(current slice state, action)` to the new slice
//! state, keyed by string slice identifiers. Registered and removed at
//! runtime; every change rebuilds the container's complete active set.
//!
//! ## Behaviors ([`Behavior`])
//!
//! Pluggable dispatch-time extensions supplied once at container creation:
//! either a [`Middleware`] observing every action before reduction, or a
//! [`ProcessRunner`] capability used to launch background processes.
//!
//! ## Processes ([`ProcessRunner`], [`ProcessHandle`])
//!
//! Long-running, cancellable units of background work, tracked by key and
//! cancelled fire-and-forget on removal.
//!
//! # Error Types
//!
//! - [`VesselError`] - Top-level error type
//! - [`StoreError`] - Container validity errors
//! - [`BehaviorError`] - Invalid behavior values
//! - [`ArgumentError`] - Invalid registration arguments
//! - [`ScopeError`] - Global scope availability errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod behavior;
mod error;
mod process;
mod reducer;
mod slice;
mod validate;

// Re-exports
pub use action::Action;
pub use behavior::{Behavior, BehaviorMap, Control, Middleware, RUNNER_BEHAVIOR};
pub use error::{ArgumentError, BehaviorError, BoxError, ScopeError, StoreError, VesselError};
pub use process::{ProcessFuture, ProcessHandle, ProcessRunner};
pub use reducer::{ArcReducer, NoopReducer, Reducer};
pub use slice::{NOOP_SLICE, SliceState, slice_state};
pub use validate::IsEmpty;
