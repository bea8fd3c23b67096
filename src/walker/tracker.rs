//! Completion tracking for a growing set of walk tasks
//!
//! The number of tasks is not known up front: every task may register more
//! work before it finishes. A single counter of outstanding tasks is
//! incremented before a task is scheduled and decremented exactly once when
//! it finishes. The walk is over when the counter returns to zero.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Counting join over a dynamically growing set of tasks
#[derive(Debug, Default)]
pub struct CompletionTracker {
    /// Tasks registered but not yet done
    outstanding: AtomicUsize,

    /// Total tasks ever registered
    registered: AtomicU64,

    /// Held while checking or announcing the zero state
    idle: Mutex<()>,

    /// Signalled when `outstanding` drops to zero
    zero: Condvar,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more task; call before the task is scheduled
    pub fn register(&self) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        self.registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record that a task finished
    pub fn done(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "done() called without matching register()");

        if previous == 1 {
            let _idle = self.idle.lock();
            self.zero.notify_all();
        }
    }

    /// Block until every registered task is done
    pub fn wait(&self) {
        let mut idle = self.idle.lock();
        while self.outstanding.load(Ordering::SeqCst) != 0 {
            self.zero.wait(&mut idle);
        }
    }

    /// Whether no task is outstanding right now
    pub fn is_idle(&self) -> bool {
        self.outstanding.load(Ordering::SeqCst) == 0
    }

    /// Snapshot of outstanding tasks
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    /// Total tasks registered so far
    pub fn total_registered(&self) -> u64 {
        self.registered.load(Ordering::Relaxed)
    }
}

/// RAII guard that marks a registered task done when dropped
///
/// Owning the guard for the whole body of a task covers every exit path,
/// including early returns and unwinding.
pub struct TaskGuard {
    tracker: Arc<CompletionTracker>,
}

impl TaskGuard {
    /// Take over completion of a task that was already registered
    pub fn adopt(tracker: Arc<CompletionTracker>) -> Self {
        Self { tracker }
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.tracker.done();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_wait_returns_when_idle() {
        let tracker = CompletionTracker::new();
        assert!(tracker.is_idle());
        tracker.wait();
    }

    #[test]
    fn test_register_and_done() {
        let tracker = CompletionTracker::new();
        tracker.register();
        tracker.register();
        assert_eq!(tracker.outstanding(), 2);

        tracker.done();
        assert!(!tracker.is_idle());
        tracker.done();
        assert!(tracker.is_idle());
        assert_eq!(tracker.total_registered(), 2);
    }

    #[test]
    fn test_guard_marks_done_on_drop() {
        let tracker = Arc::new(CompletionTracker::new());
        tracker.register();

        let guard = TaskGuard::adopt(Arc::clone(&tracker));
        assert_eq!(tracker.outstanding(), 1);
        drop(guard);

        assert!(tracker.is_idle());
    }

    #[test]
    fn test_wait_sees_nested_registration() {
        let tracker = Arc::new(CompletionTracker::new());
        tracker.register();

        let worker = Arc::clone(&tracker);
        let handle = thread::spawn(move || {
            let _guard = TaskGuard::adopt(Arc::clone(&worker));
            thread::sleep(Duration::from_millis(20));

            // A child registered while the parent is still running
            worker.register();
            let child = Arc::clone(&worker);
            thread::spawn(move || {
                let _guard = TaskGuard::adopt(Arc::clone(&child));
                thread::sleep(Duration::from_millis(20));
            })
        });

        tracker.wait();
        assert!(tracker.is_idle());
        assert_eq!(tracker.total_registered(), 2);

        let child = handle.join().unwrap();
        child.join().unwrap();
    }
}
