//! Type-erased state slices.
//!
//! The container's state tree is schema-agnostic: slices are keyed purely by
//! string identifiers and stored type-erased. `Arc` makes snapshotting the
//! tree an O(1)-per-slice operation.

use std::any::Any;
use std::sync::Arc;

/// One opaque state slice.
///
/// Reducers receive and return `SliceState`; the container never looks
/// inside. Cloning only increments the reference count, so reducers that
/// leave a slice unchanged can hand back their input as-is.
pub type SliceState = Arc<dyn Any + Send + Sync>;

/// Wrap a concrete value as a [`SliceState`].
///
/// # Example
///
/// ```rust,ignore
/// let state = slice_state(Counter { value: 0 });
/// ```
pub fn slice_state<T: Send + Sync + 'static>(value: T) -> SliceState {
    Arc::new(value)
}

/// Reserved key of the always-present noop slice.
///
/// The reducer under this key returns its input unchanged. It exists solely
/// to keep the active reducer mapping non-empty before any real reducer is
/// registered, which the container's validity check requires.
pub const NOOP_SLICE: &str = "@@vessel/noop";
