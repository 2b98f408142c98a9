//! View-scoped fetch handles.
//!
//! A fetch spawned for a view must not outlive it: an orphaned request
//! completing after teardown would update state nobody owns. `ScopedFetch`
//! ties the task to the handle's lifetime and aborts it on drop.

use std::future::Future;
use tokio::task::JoinHandle;

/// A spawned fetch that is aborted when the handle is dropped.
#[derive(Debug)]
pub struct ScopedFetch<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> ScopedFetch<T> {
    /// Spawns the fetch on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    /// Waits for the fetch to finish.
    ///
    /// Returns `None` when the task was aborted or panicked.
    pub async fn join(mut self) -> Option<T> {
        (&mut self.handle).await.ok()
    }

    /// Aborts the fetch early; dropping the handle does the same.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has completed or been aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Drop for ScopedFetch<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
