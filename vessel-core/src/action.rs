//! Action trait for dispatchable message types.

/// A marker trait for actions dispatched through the container.
///
/// Actions must be `Send + Sync + 'static` so they can cross thread
/// boundaries safely. There is deliberately no serializability bound:
/// actions may carry handles, channels, or other non-plain data.
///
/// # Example
///
/// ```rust,ignore
/// enum CounterAction {
///     Increment,
///     Reset,
/// }
///
/// impl Action for CounterAction {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Action",
    label = "must be `Send + Sync + 'static`",
    note = "All actions in Vessel must be thread-safe and static."
)]
pub trait Action: Send + Sync + 'static {}

// Common Action implementations
impl Action for () {}
impl Action for String {}
impl Action for &'static str {}
impl<T: Action> Action for Box<T> {}
impl<T: Action> Action for std::sync::Arc<T> {}
impl<T: Action> Action for Vec<T> {}
impl<T: Action> Action for Option<T> {}
