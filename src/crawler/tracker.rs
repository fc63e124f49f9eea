//! Completion tracking for concurrent crawl work
//!
//! Every concurrent unit of work (page crawl, link resolution, static
//! resolution) holds a [`WorkGuard`] for its whole lifetime. The guard is taken
//! synchronously *before* the task is spawned and released when the task's
//! future is dropped, whether it finished normally, returned early on an error
//! path, or panicked. The pending count therefore cannot touch zero while any
//! parent is still able to spawn children.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct Inner {
    pending: AtomicUsize,
    idle: Notify,
}

/// Global counter of outstanding units of work
#[derive(Debug, Clone, Default)]
pub struct CompletionTracker {
    inner: Arc<Inner>,
}

/// Registration of one unit of work; dropping it marks the unit finished
#[derive(Debug)]
#[must_use = "the unit of work is considered finished as soon as the guard is dropped"]
pub struct WorkGuard {
    inner: Arc<Inner>,
}

impl CompletionTracker {
    /// Creates a tracker with nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new unit of work
    ///
    /// Call this before spawning the task and move the guard into it.
    pub fn enter(&self) -> WorkGuard {
        self.inner.pending.fetch_add(1, Ordering::AcqRel);
        WorkGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Number of units of work currently outstanding
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::Acquire)
    }

    /// Waits until every registered unit of work has finished
    ///
    /// Returns immediately if nothing is pending.
    pub async fn wait(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            // Register interest before checking, so a release that lands
            // between the check and the await is not missed.
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }

            notified.await;
        }
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        if self.inner.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.inner.idle.notify_waiters();
        }
    }
}
