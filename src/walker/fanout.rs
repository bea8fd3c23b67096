//! Fan-out walker: one async task per legal move
//!
//! ```text
//! seed task ──┬── child task ──┬── grandchild task ...
//!             │                └── grandchild task ...
//!             └── child task ...
//! ```
//!
//! Every task pushes its path to the sink when it qualifies, registers and
//! spawns one child per legal extension, then reports itself done. A task is
//! done once it has dispatched its children, not once they finish.

use crate::walker::context::WalkContext;
use crate::walker::path::Path;
use crate::walker::tracker::TaskGuard;
use std::sync::Arc;
use tracing::trace;

/// Register and spawn a walk task for `path`
///
/// Must be called from within the tokio runtime.
pub(crate) fn spawn_walk(ctx: Arc<WalkContext>, path: Path) {
    ctx.tracker.register();
    tokio::spawn(walk(ctx, path));
}

async fn walk(ctx: Arc<WalkContext>, path: Path) {
    let _guard = TaskGuard::adopt(Arc::clone(&ctx.tracker));

    if ctx.is_shutdown() {
        ctx.stats.record_cancel();
        return;
    }

    if let Some(pattern) = path.to_pattern() {
        if let Err(e) = ctx.sink.push(pattern).await {
            trace!(error = %e, "Pattern dropped");
        }
    }

    for child in ctx.children(&path) {
        spawn_walk(Arc::clone(&ctx), child);
    }

    ctx.stats.record_task();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Point;
    use crate::walker::context::WalkStats;
    use crate::walker::sink::ResultSink;
    use crate::walker::tracker::CompletionTracker;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_single_seed_runs_to_completion() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .build()
            .unwrap();

        let tracker = Arc::new(CompletionTracker::new());
        let (sink, drain) = ResultSink::new(1024);
        let ctx = Arc::new(WalkContext {
            tracker: Arc::clone(&tracker),
            sink: sink.sender(),
            shutdown: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(WalkStats::default()),
            max_length: 4,
        });

        {
            let _enter = runtime.enter();
            spawn_walk(ctx, Path::seed(Point::new(4).unwrap()));
        }

        tracker.wait();
        sink.close();

        let patterns: Vec<_> = drain.collect();
        assert_eq!(patterns.len(), 256);
        assert!(patterns.iter().all(|p| p.len() == 4 && p.points()[0].id() == 4));
    }

    #[test]
    fn test_shutdown_skips_expansion() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .build()
            .unwrap();

        let tracker = Arc::new(CompletionTracker::new());
        let (sink, drain) = ResultSink::new(16);
        let stats = Arc::new(WalkStats::default());
        let ctx = Arc::new(WalkContext {
            tracker: Arc::clone(&tracker),
            sink: sink.sender(),
            shutdown: Arc::new(AtomicBool::new(true)),
            stats: Arc::clone(&stats),
            max_length: 9,
        });

        {
            let _enter = runtime.enter();
            spawn_walk(ctx, Path::seed(Point::new(0).unwrap()));
        }

        tracker.wait();
        sink.close();

        assert_eq!(drain.count(), 0);
        assert_eq!(stats.cancelled(), 1);
        assert_eq!(tracker.total_registered(), 1);
    }
}
