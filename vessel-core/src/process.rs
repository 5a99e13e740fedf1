//! Background process capabilities.
//!
//! The execution engine for background processes is an external
//! collaborator: the container only consumes a "run process" capability
//! returning a cancellable handle. `vessel-std` ships a tokio-backed
//! implementation behind its `tokio` feature; any other runtime can plug in
//! by implementing [`ProcessRunner`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// A process definition: the future a background process runs to completion.
pub type ProcessFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// An opaque token for a running background process.
///
/// Handles are tracked by key in the container's active process mapping and
/// cancelled when the key is removed.
pub trait ProcessHandle: Send + Sync + 'static {
    /// Requests cancellation of the underlying process.
    ///
    /// Fire-and-forget: callers do not await or verify that the process
    /// actually stopped, and a failed cancel is not retried.
    fn cancel(&self);

    /// Returns true once the process has run to completion or been torn
    /// down. Implementations that cannot observe completion may always
    /// return false.
    fn is_finished(&self) -> bool {
        false
    }
}

/// The run-process capability.
///
/// Takes a process definition and starts it, returning a cancellable handle.
/// From the registries' point of view `run` is a synchronous, non-suspending
/// call; the runner may use cooperative concurrency internally.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a run-process capability",
    label = "missing `ProcessRunner` implementation",
    note = "Process runners must implement `run`, returning a cancellable handle."
)]
pub trait ProcessRunner: Send + Sync + 'static {
    /// Starts the process and returns its handle.
    fn run(&self, process: ProcessFuture) -> Arc<dyn ProcessHandle>;
}

impl<R: ProcessRunner> ProcessRunner for Arc<R> {
    fn run(&self, process: ProcessFuture) -> Arc<dyn ProcessHandle> {
        (**self).run(process)
    }
}
