//! Tokio-backed process runner.
//!
//! The standard [`ProcessRunner`] battery: spawns each process onto the
//! ambient tokio runtime and races it against a cancellation token. Any
//! other execution engine can replace it by implementing `ProcessRunner`.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use vessel_core::{ProcessFuture, ProcessHandle, ProcessRunner};

/// Runs processes as tokio tasks.
///
/// Must be used from within a tokio runtime; `run` panics otherwise, the
/// same way `tokio::spawn` does.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioRunner;

impl ProcessRunner for TokioRunner {
    fn run(&self, process: ProcessFuture) -> Arc<dyn ProcessHandle> {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let join = tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = process => {}
            }
        });
        Arc::new(TokioHandle { token, join })
    }
}

/// Handle to a process spawned by [`TokioRunner`].
pub struct TokioHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl ProcessHandle for TokioHandle {
    fn cancel(&self) {
        self.token.cancel();
    }

    fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_process_runs_to_completion() {
        let (tx, rx) = tokio::sync::oneshot::channel::<u8>();
        let handle = TokioRunner.run(Box::pin(async move {
            let _ = tx.send(7);
        }));
        assert_eq!(rx.await.unwrap(), 7);
        tokio::task::yield_now().await;
        assert!(handle.is_finished());
    }

    #[tokio::test]
    async fn test_cancel_stops_pending_process() {
        let handle = TokioRunner.run(Box::pin(std::future::pending()));
        assert!(!handle.is_finished());

        handle.cancel();
        tokio::time::timeout(Duration::from_secs(1), async {
            while !handle.is_finished() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("cancelled process should finish");
    }

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let handle = TokioRunner.run(Box::pin(std::future::pending()));
        handle.cancel();
        handle.cancel();
    }
}
