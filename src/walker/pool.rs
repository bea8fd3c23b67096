//! Worker-pool walker: fixed threads over a work-stealing queue
//!
//! A bounded alternative to the fan-out walker. Pending paths live in a
//! crossbeam work-stealing structure instead of one task each:
//!
//! ```text
//! Injector (seed paths)
//! │
//! ├── Worker 0: pop path → emit → push children to local deque
//! ├── Worker 1: pop path → emit → push children to local deque
//! └── Worker N: pop path → emit → push children to local deque
//!                 (idle workers steal from the injector, then each other)
//! ```
//!
//! The completion contract is the same: a path is registered before it is
//! queued and marked done after it has been expanded.

use crate::error::WorkerError;
use crate::walker::context::WalkContext;
use crate::walker::path::Path;
use crate::walker::tracker::TaskGuard;
use crossbeam_deque::{Injector, Steal, Stealer, Worker as DequeWorker};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, trace};

/// Spins before an idle worker starts sleeping between polls
const MAX_IDLE_SPINS: u32 = 1000;

/// Start `worker_count` pool workers seeded with `seeds`
///
/// Every seed is registered with the tracker before it is queued. Workers
/// exit once they find no work and the tracker is idle.
pub(crate) fn spawn_pool(
    ctx: Arc<WalkContext>,
    seeds: Vec<Path>,
    worker_count: usize,
) -> Result<Vec<JoinHandle<()>>, WorkerError> {
    let injector: Arc<Injector<Path>> = Arc::new(Injector::new());
    for seed in seeds {
        ctx.tracker.register();
        injector.push(seed);
    }

    // Depth-first locally keeps the number of pending paths small
    let mut locals: Vec<DequeWorker<Path>> = Vec::with_capacity(worker_count);
    let mut stealers: Vec<Stealer<Path>> = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let local = DequeWorker::new_lifo();
        stealers.push(local.stealer());
        locals.push(local);
    }
    let stealers = Arc::new(stealers);

    let mut handles = Vec::with_capacity(worker_count);
    for (id, local) in locals.into_iter().enumerate() {
        let ctx = Arc::clone(&ctx);
        let injector = Arc::clone(&injector);
        let stealers = Arc::clone(&stealers);

        let handle = thread::Builder::new()
            .name(format!("walker-{}", id))
            .spawn(move || worker_loop(id, ctx, local, injector, stealers))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;
        handles.push(handle);
    }

    debug!(count = handles.len(), "Pool workers spawned");
    Ok(handles)
}

/// Find the next path: local deque first, then the injector, then steal
fn find_work(
    id: usize,
    local: &DequeWorker<Path>,
    injector: &Injector<Path>,
    stealers: &[Stealer<Path>],
) -> Option<Path> {
    local.pop().or_else(|| {
        loop {
            match injector.steal_batch_and_pop(local) {
                Steal::Success(path) => return Some(path),
                Steal::Empty => break,
                Steal::Retry => continue,
            }
        }
        for (i, stealer) in stealers.iter().enumerate() {
            if i == id {
                continue;
            }
            loop {
                match stealer.steal() {
                    Steal::Success(path) => return Some(path),
                    Steal::Empty => break,
                    Steal::Retry => continue,
                }
            }
        }
        None
    })
}

fn worker_loop(
    id: usize,
    ctx: Arc<WalkContext>,
    local: DequeWorker<Path>,
    injector: Arc<Injector<Path>>,
    stealers: Arc<Vec<Stealer<Path>>>,
) {
    debug!(worker = id, "Worker started");

    let mut idle_spins = 0;
    let mut expanded = 0u64;

    loop {
        let path = match find_work(id, &local, &injector, &stealers) {
            Some(path) => {
                idle_spins = 0;
                path
            }
            None => {
                if ctx.tracker.is_idle() {
                    break;
                }

                idle_spins += 1;
                if idle_spins > MAX_IDLE_SPINS {
                    thread::sleep(Duration::from_micros(100));
                    idle_spins = 0;
                } else {
                    thread::yield_now();
                }
                continue;
            }
        };

        let _guard = TaskGuard::adopt(Arc::clone(&ctx.tracker));

        if ctx.is_shutdown() {
            ctx.stats.record_cancel();
            continue;
        }

        if let Some(pattern) = path.to_pattern() {
            if let Err(e) = ctx.sink.blocking_push(pattern) {
                trace!(worker = id, error = %e, "Pattern dropped");
            }
        }

        for child in ctx.children(&path) {
            ctx.tracker.register();
            local.push(child);
        }

        ctx.stats.record_task();
        expanded += 1;
    }

    debug!(worker = id, expanded = expanded, "Worker finished");
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
    fn test_pool_single_seed() {
        let tracker = Arc::new(CompletionTracker::new());
        let (sink, drain) = ResultSink::new(64);
        let ctx = Arc::new(WalkContext {
            tracker: Arc::clone(&tracker),
            sink: sink.sender(),
            shutdown: Arc::new(AtomicBool::new(false)),
            stats: Arc::new(WalkStats::default()),
            max_length: 4,
        });

        let seeds = vec![Path::seed(Point::new(1).unwrap())];
        let handles = spawn_pool(ctx, seeds, 3).unwrap();
        sink.close();

        // Drain while workers run; the sink is smaller than the result set
        let patterns: Vec<_> = drain.collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(patterns.len(), 188);
        assert!(tracker.is_idle());
    }

    #[test]
    fn test_pool_cancelled_paths_still_complete() {
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

        let seeds = vec![
            Path::seed(Point::new(0).unwrap()),
            Path::seed(Point::new(4).unwrap()),
        ];
        let handles = spawn_pool(ctx, seeds, 2).unwrap();
        sink.close();

        assert_eq!(drain.count(), 0);
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(tracker.is_idle());
        assert_eq!(tracker.total_registered(), 2);
        assert_eq!(stats.cancelled(), 2);
        assert_eq!(stats.children_spawned(), 0);
        assert_eq!(stats.tasks_run(), 0);
    }
}
