use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

struct Barrier {
    expected: usize,
    completed: AtomicUsize,
    notify: Notify,
}

impl Barrier {
    fn is_complete(&self) -> bool {
        self.completed.load(Ordering::Acquire) >= self.expected
    }
}

/// Completion barrier for one dispatch round.
///
/// `wait` consumes the synchronizer, so a satisfied barrier cannot be reused.
pub struct Synchronizer {
    barrier: Arc<Barrier>,
}

/// Reports one task's completion to its [`Synchronizer`] when dropped.
///
/// Only the dispatcher hands these out, one per task, so a task that panics
/// still releases the barrier.
pub struct CompletionToken {
    barrier: Arc<Barrier>,
}

impl Synchronizer {
    pub(crate) fn new(expected: usize) -> Self {
        Synchronizer {
            barrier: Arc::new(Barrier {
                expected,
                completed: AtomicUsize::new(0),
                notify: Notify::new(),
            }),
        }
    }

    pub(crate) fn token(&self) -> CompletionToken {
        CompletionToken {
            barrier: Arc::clone(&self.barrier),
        }
    }

    pub fn expected(&self) -> usize {
        self.barrier.expected
    }

    pub fn completed(&self) -> usize {
        self.barrier.completed.load(Ordering::Acquire)
    }

    pub fn pending(&self) -> usize {
        self.expected().saturating_sub(self.completed())
    }

    pub fn is_complete(&self) -> bool {
        self.barrier.is_complete()
    }

    /// Blocks until every dispatched task has reported completion.
    pub async fn wait(self) {
        // notify_one stores a permit, so a completion racing with the check
        // below still wakes us.
        while !self.barrier.is_complete() {
            self.barrier.notify.notified().await;
        }
    }
}

impl CompletionToken {
    pub fn complete(self) {}
}

impl Drop for CompletionToken {
    fn drop(&mut self) {
        let completed = self.barrier.completed.fetch_add(1, Ordering::AcqRel) + 1;
        if completed >= self.barrier.expected {
            self.barrier.notify.notify_one();
        }
    }
}
