//! State shared by every walk task
//!
//! Only the completion tracker, the sink, the shutdown flag and a few
//! statistics counters are shared. Paths are never shared: each task owns
//! the path it extends.

use crate::walker::path::Path;
use crate::walker::rules::legal_moves;
use crate::walker::sink::SinkSender;
use crate::walker::tracker::CompletionTracker;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics collected across all tasks
#[derive(Debug, Default)]
pub struct WalkStats {
    /// Tasks that expanded their path
    pub tasks_run: AtomicU64,

    /// Tasks skipped because shutdown was requested
    pub cancelled: AtomicU64,

    /// Child paths handed to new tasks
    pub children_spawned: AtomicU64,
}

impl WalkStats {
    pub(crate) fn record_task(&self) {
        self.tasks_run.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cancel(&self) {
        self.cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_children(&self, count: u64) {
        self.children_spawned.fetch_add(count, Ordering::Relaxed);
    }

    pub fn tasks_run(&self) -> u64 {
        self.tasks_run.load(Ordering::Relaxed)
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn children_spawned(&self) -> u64 {
        self.children_spawned.load(Ordering::Relaxed)
    }
}

/// Handles every task needs, cloned behind an `Arc`
pub(crate) struct WalkContext {
    pub tracker: Arc<CompletionTracker>,
    pub sink: SinkSender,
    pub shutdown: Arc<AtomicBool>,
    pub stats: Arc<WalkStats>,
    pub max_length: usize,
}

impl WalkContext {
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Legal one-point extensions of `path`, each a fresh owned path
    ///
    /// Returns nothing once `path` reached the configured maximum length.
    pub fn children(&self, path: &Path) -> Vec<Path> {
        if path.len() >= self.max_length {
            return Vec::new();
        }

        let children: Vec<Path> = legal_moves(path).map(|next| path.extended(next)).collect();
        self.stats.record_children(children.len() as u64);
        children
    }
}
