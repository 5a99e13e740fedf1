//! Reducer trait for state-update handlers.
//!
//! A reducer is a pure function updating one named state slice given an
//! action. Reducers are registered at runtime under unique string keys and
//! the container rebuilds its combined active set on every change.

use crate::action::Action;
use crate::slice::SliceState;
use std::sync::Arc;

/// A state-update handler for one slice of the container's state tree.
///
/// Reducers must be pure: given the current slice state (or `None` when the
/// slice has not been initialised yet) and an action, they return the new
/// slice state without side effects.
///
/// # Implementing
///
/// Closures of the matching shape implement `Reducer` automatically:
///
/// ```rust,ignore
/// let reducer = |state: Option<SliceState>, _action: &MyAction| -> SliceState {
///     state.unwrap_or_else(|| slice_state(0u64))
/// };
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot reduce actions of type `{A}`",
    label = "missing `Reducer<{A}>` implementation",
    note = "Reducers must implement `reduce` for the action type `{A}`."
)]
pub trait Reducer<A: Action>: Send + Sync + 'static {
    /// Computes the new slice state. `state` is `None` until the slice has
    /// been reduced at least once.
    fn reduce(&self, state: Option<SliceState>, action: &A) -> SliceState;
}

/// A shared, type-erased reducer as stored in the container's active set.
pub type ArcReducer<A> = Arc<dyn Reducer<A>>;

// Blanket impl for closures
impl<A, F> Reducer<A> for F
where
    A: Action,
    F: Fn(Option<SliceState>, &A) -> SliceState + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<SliceState>, action: &A) -> SliceState {
        (self)(state, action)
    }
}

impl<A: Action> Reducer<A> for ArcReducer<A> {
    fn reduce(&self, state: Option<SliceState>, action: &A) -> SliceState {
        (**self).reduce(state, action)
    }
}

/// The identity reducer behind the reserved noop slice.
///
/// Returns its input unchanged; initialises the slice to the unit value on
/// first reduction. Keeps the active reducer mapping non-empty even when no
/// real reducer is registered.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopReducer;

impl<A: Action> Reducer<A> for NoopReducer {
    fn reduce(&self, state: Option<SliceState>, _action: &A) -> SliceState {
        state.unwrap_or_else(|| Arc::new(()))
    }
}
