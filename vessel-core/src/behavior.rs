//! Dispatch-time behaviors.
//!
//! Behaviors are pluggable units of dispatch-time logic supplied once at
//! container creation. They come in exactly two shapes, dispatched
//! explicitly via a tagged variant rather than inspected at runtime:
//!
//! - [`Behavior::Callable`] wraps a [`Middleware`] that observes every
//!   dispatched action before reduction and may swallow it.
//! - [`Behavior::Runnable`] wraps a [`ProcessRunner`] capability used to
//!   launch cancellable background processes.
//!
//! The behavior mapping is fixed at creation time: behaviors are stored
//! unmodified on the container for inspection and are not individually
//! addressable afterwards.

use crate::action::Action;
use crate::process::ProcessRunner;
use std::sync::Arc;

/// Reserved behavior key.
///
/// If the behavior supplied under this key is [`Behavior::Runnable`], it is
/// auto-wired as the run-process capability when a process registry is
/// attached to the container.
pub const RUNNER_BEHAVIOR: &str = "@@vessel/runner";

/// Result of middleware execution indicating whether dispatch proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// The action was observed; continue to the next middleware and then
    /// to reduction.
    Next,
    /// The action was consumed; skip remaining middlewares and reduction.
    Stop,
}

/// A dispatch-time extension observing every action before reduction.
///
/// Middlewares run synchronously in the order their behaviors were supplied
/// at container creation. Returning [`Control::Stop`] swallows the action.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Middleware<{A}>`",
    label = "missing `Middleware` implementation",
    note = "Middlewares must implement `on_action` for the action type `{A}`."
)]
pub trait Middleware<A: Action>: Send + Sync + 'static {
    /// Called for every dispatched action, before any reducer runs.
    fn on_action(&self, action: &A) -> Control;
}

// Blanket impl for closures
impl<A, F> Middleware<A> for F
where
    A: Action,
    F: Fn(&A) -> Control + Send + Sync + 'static,
{
    fn on_action(&self, action: &A) -> Control {
        (self)(action)
    }
}

/// A pluggable unit of dispatch-time logic.
pub enum Behavior<A: Action> {
    /// A middleware observing dispatched actions.
    Callable(Arc<dyn Middleware<A>>),
    /// A capability for launching background processes.
    Runnable(Arc<dyn ProcessRunner>),
}

impl<A: Action> Behavior<A> {
    /// Wraps a middleware as a behavior.
    pub fn callable<M: Middleware<A>>(middleware: M) -> Self {
        Behavior::Callable(Arc::new(middleware))
    }

    /// Wraps a process runner as a behavior.
    pub fn runnable<R: ProcessRunner>(runner: R) -> Self {
        Behavior::Runnable(Arc::new(runner))
    }

    /// Returns the middleware if this behavior is `Callable`.
    pub fn as_middleware(&self) -> Option<&Arc<dyn Middleware<A>>> {
        match self {
            Behavior::Callable(middleware) => Some(middleware),
            Behavior::Runnable(_) => None,
        }
    }

    /// Returns the process runner if this behavior is `Runnable`.
    pub fn as_runner(&self) -> Option<&Arc<dyn ProcessRunner>> {
        match self {
            Behavior::Callable(_) => None,
            Behavior::Runnable(runner) => Some(runner),
        }
    }
}

impl<A: Action> Clone for Behavior<A> {
    fn clone(&self) -> Self {
        match self {
            Behavior::Callable(middleware) => Behavior::Callable(Arc::clone(middleware)),
            Behavior::Runnable(runner) => Behavior::Runnable(Arc::clone(runner)),
        }
    }
}

impl<A: Action> std::fmt::Debug for Behavior<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Behavior::Callable(_) => f.write_str("Behavior::Callable"),
            Behavior::Runnable(_) => f.write_str("Behavior::Runnable"),
        }
    }
}

/// An insertion-ordered mapping from behavior key to behavior.
///
/// Keys are unique and caller-chosen; later inserts under an existing key
/// replace the previous value in place. Iteration order is the order keys
/// were first supplied, which is also the order `Callable` middlewares run
/// in during dispatch.
pub struct BehaviorMap<A: Action> {
    entries: Vec<(String, Behavior<A>)>,
}

impl<A: Action> BehaviorMap<A> {
    /// Creates an empty behavior map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a behavior, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, behavior: Behavior<A>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = behavior,
            None => self.entries.push((key, behavior)),
        }
    }

    /// Returns the behavior stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Behavior<A>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, b)| b)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Behavior<A>)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b))
    }

    /// Iterates the `Callable` middlewares in insertion order.
    pub fn middlewares(&self) -> impl Iterator<Item = &Arc<dyn Middleware<A>>> {
        self.entries.iter().filter_map(|(_, b)| b.as_middleware())
    }

    /// Returns the number of behaviors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no behaviors were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<A: Action> Default for BehaviorMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> Clone for BehaviorMap<A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<A: Action> FromIterator<(String, Behavior<A>)> for BehaviorMap<A> {
    fn from_iter<I: IntoIterator<Item = (String, Behavior<A>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, behavior) in iter {
            map.insert(key, behavior);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next_middleware() -> Behavior<String> {
        Behavior::callable(|_: &String| Control::Next)
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = BehaviorMap::<String>::new();
        map.insert("b", next_middleware());
        map.insert("a", next_middleware());
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = BehaviorMap::<String>::new();
        map.insert("x", next_middleware());
        map.insert("y", next_middleware());
        map.insert("x", Behavior::callable(|_: &String| Control::Stop));
        assert_eq!(map.len(), 2);
        let first = map.get("x").unwrap().as_middleware().unwrap();
        assert_eq!(first.on_action(&String::new()), Control::Stop);
    }

    #[test]
    fn test_tagged_accessors() {
        let callable = next_middleware();
        assert!(callable.as_middleware().is_some());
        assert!(callable.as_runner().is_none());
    }
}
