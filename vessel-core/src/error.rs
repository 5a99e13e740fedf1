//! Error types for Vessel.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`VesselError`] - Top-level error type for all Vessel operations
//! - [`StoreError`] - Container validity failures
//! - [`BehaviorError`] - Invalid behavior values supplied at creation
//! - [`ArgumentError`] - Invalid registration arguments
//! - [`ScopeError`] - Global scope availability failures
//!
//! All errors are fatal to the calling operation; there is no internal
//! retry. Registries fail fast at construction time rather than deferring
//! validation to first use.

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Vessel operations.
#[derive(Error, Debug)]
pub enum VesselError {
    /// The container failed its validity check.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A supplied behavior value was invalid.
    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    /// A registration argument was invalid.
    #[error("argument error: {0}")]
    Argument(#[from] ArgumentError),

    /// No global scope was available.
    #[error("scope error: {0}")]
    Scope(#[from] ScopeError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Container validity failures, at construction or singleton-guard time.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The active reducer mapping is empty.
    #[error("store has no registered reducers")]
    NoReducers,

    /// The factory produced a container that failed the validity check.
    #[error("store creation failed: {0}")]
    CreationFailed(String),

    /// The container found in the global slot failed validation.
    #[error("existing store is not valid: {0}")]
    ExistingInvalid(String),
}

/// Invalid behavior values supplied at container creation.
#[derive(Error, Debug)]
pub enum BehaviorError {
    /// The reserved runner key held a behavior without a run capability.
    #[error("behavior `{0}` must expose a run capability")]
    NotRunnable(String),
}

/// Invalid registration arguments.
#[derive(Error, Debug)]
pub enum ArgumentError {
    /// No run-process capability was available for the process registry.
    #[error("no run-process capability: no runnable behavior under `{0}`")]
    MissingRunner(String),
}

/// Global scope availability failures.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// Neither a host-provided nor a process-wide scope exists.
    #[error("no global scope available")]
    Unavailable,
}

// Convenience conversion
impl From<BoxError> for VesselError {
    fn from(err: BoxError) -> Self {
        VesselError::Custom(err)
    }
}
