//! Enumeration coordinator - orchestrates the concurrent pattern walk
//!
//! The coordinator is responsible for:
//! - Setting up the result sink and completion tracker
//! - Seeding one task per start point
//! - Starting the chosen strategy (async fan-out or worker pool)
//! - Running the watcher that closes the sink once every task is done
//! - Final statistics and cleanup
//!
//! The caller drains patterns from the returned `Enumeration` while the walk
//! is still running. Arrival order is not deterministic; the set of patterns
//! is.

use crate::config::{Strategy, WalkConfig};
use crate::error::{Result, WorkerError};
use crate::walker::context::{WalkContext, WalkStats};
use crate::walker::fanout::spawn_walk;
use crate::walker::path::{CompletedPattern, Path};
use crate::walker::pool::spawn_pool;
use crate::walker::sink::{PatternDrain, ResultSink, SinkStats};
use crate::walker::tracker::CompletionTracker;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

/// Result of a finished enumeration
#[derive(Debug, Clone)]
pub struct EnumerationResult {
    /// Patterns pushed into the sink
    pub emitted: u64,

    /// Patterns taken out of the sink by the caller
    pub drained: u64,

    /// Tasks registered with the completion tracker
    pub tasks: u64,

    /// Tasks skipped after a shutdown request
    pub cancelled: u64,

    /// Time taken for the walk
    pub duration: Duration,

    /// Whether the walk ran to exhaustion (vs was interrupted)
    pub completed: bool,
}

/// Coordinates the concurrent pattern walk
pub struct Enumerator {
    /// Configuration
    config: Arc<WalkConfig>,

    /// Shutdown signal
    shutdown: Arc<AtomicBool>,
}

impl Enumerator {
    /// Create a new enumerator from a validated configuration
    pub fn new(config: WalkConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: Arc::new(config),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Get a clone of the shutdown flag (for signal handlers)
    pub fn shutdown_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Start the walk and hand back the draining side
    pub fn start(self) -> Result<Enumeration> {
        let start_time = Instant::now();
        let start_datetime: DateTime<Utc> = Utc::now();

        info!(
            strategy = self.config.strategy.name(),
            workers = self.config.worker_count,
            seeds = self.config.seeds.len(),
            max_length = self.config.max_length,
            "Starting enumeration"
        );
        debug!(start_time = %start_datetime.to_rfc3339(), "Enumeration started");

        let tracker = Arc::new(CompletionTracker::new());
        let (sink, drain) = ResultSink::new(self.config.sink_capacity);
        let sink_stats = sink.stats();
        let walk_stats = Arc::new(WalkStats::default());

        let ctx = Arc::new(WalkContext {
            tracker: Arc::clone(&tracker),
            sink: sink.sender(),
            shutdown: Arc::clone(&self.shutdown),
            stats: Arc::clone(&walk_stats),
            max_length: self.config.max_length,
        });

        let seeds: Vec<Path> = self.config.seeds.iter().map(|&p| Path::seed(p)).collect();

        let backend = match self.config.strategy {
            Strategy::FanOut => {
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .worker_threads(self.config.worker_count)
                    .thread_name("walker")
                    .build()
                    .map_err(|e| WorkerError::RuntimeFailed(e.to_string()))?;

                {
                    let _enter = runtime.enter();
                    for seed in seeds {
                        spawn_walk(Arc::clone(&ctx), seed);
                    }
                }
                Backend::FanOut(runtime)
            }
            Strategy::Pool => {
                let handles = spawn_pool(Arc::clone(&ctx), seeds, self.config.worker_count)?;
                Backend::Pool(handles)
            }
        };

        // Tasks hold their own context; ours would keep the sink open
        drop(ctx);

        let watcher = spawn_watcher(Arc::clone(&tracker), sink)?;

        Ok(Enumeration {
            drain,
            backend: Some(backend),
            watcher: Some(watcher),
            tracker,
            sink_stats,
            walk_stats,
            shutdown: self.shutdown,
            start_time,
        })
    }

    /// Run the walk to exhaustion and collect every pattern
    pub fn collect(self) -> Result<(Vec<CompletedPattern>, EnumerationResult)> {
        let mut enumeration = self.start()?;
        let patterns: Vec<CompletedPattern> = enumeration.by_ref().collect();
        let result = enumeration.finish()?;
        Ok((patterns, result))
    }
}

/// Wait for the tracker to reach zero, then close the sink
fn spawn_watcher(
    tracker: Arc<CompletionTracker>,
    sink: ResultSink,
) -> std::result::Result<JoinHandle<()>, WorkerError> {
    thread::Builder::new()
        .name("sink-watcher".to_string())
        .spawn(move || {
            tracker.wait();
            debug!(tasks = tracker.total_registered(), "All tasks done, closing sink");
            sink.close();
        })
        .map_err(|e| WorkerError::InitFailed {
            id: 0,
            reason: e.to_string(),
        })
}

/// Where the walk tasks run
enum Backend {
    FanOut(Runtime),
    Pool(Vec<JoinHandle<()>>),
}

/// A running enumeration
///
/// Iterating yields patterns in arrival order and blocks until the next one
/// arrives; iteration ends once every task is done and the sink is empty.
/// Must be drained from outside any async context.
pub struct Enumeration {
    drain: PatternDrain,
    backend: Option<Backend>,
    watcher: Option<JoinHandle<()>>,
    tracker: Arc<CompletionTracker>,
    sink_stats: Arc<SinkStats>,
    walk_stats: Arc<WalkStats>,
    shutdown: Arc<AtomicBool>,
    start_time: Instant,
}

impl Enumeration {
    /// Snapshot of the walk for progress display
    pub fn progress(&self) -> WalkProgress {
        WalkProgress {
            emitted: self.sink_stats.emitted(),
            drained: self.drain.drained(),
            pending: self.drain.pending(),
            outstanding_tasks: self.tracker.outstanding(),
            tasks: self.tracker.total_registered(),
            elapsed: self.start_time.elapsed(),
        }
    }

    /// Drain whatever is left, join every thread and report
    pub fn finish(mut self) -> Result<EnumerationResult> {
        let leftover = self.drain.by_ref().count();
        if leftover > 0 {
            debug!(leftover = leftover, "Discarded undrained patterns");
        }

        if let Some(watcher) = self.watcher.take() {
            if watcher.join().is_err() {
                warn!("Sink watcher panicked");
            }
        }

        match self.backend.take() {
            Some(Backend::Pool(handles)) => {
                for (id, handle) in handles.into_iter().enumerate() {
                    if handle.join().is_err() {
                        return Err(WorkerError::Panicked {
                            id,
                            message: "Worker thread panicked".into(),
                        }
                        .into());
                    }
                }
            }
            Some(Backend::FanOut(runtime)) => {
                runtime.shutdown_timeout(Duration::from_secs(1));
            }
            None => {}
        }

        let emitted = self.sink_stats.emitted();
        let drained = self.drain.drained();
        let duration = self.start_time.elapsed();
        let completed = !self.shutdown.load(Ordering::Relaxed);

        if emitted != drained {
            warn!(emitted = emitted, drained = drained, "Sink counts disagree");
        }

        info!(
            patterns = drained,
            tasks = self.tracker.total_registered(),
            duration_ms = duration.as_millis() as u64,
            "Enumeration completed"
        );

        Ok(EnumerationResult {
            emitted,
            drained,
            tasks: self.tracker.total_registered(),
            cancelled: self.walk_stats.cancelled(),
            duration,
            completed,
        })
    }
}

impl Iterator for Enumeration {
    type Item = CompletedPattern;

    fn next(&mut self) -> Option<Self::Item> {
        self.drain.blocking_next()
    }
}

/// Progress information for display
#[derive(Debug, Clone, Default)]
pub struct WalkProgress {
    /// Patterns pushed into the sink
    pub emitted: u64,

    /// Patterns drained by the caller
    pub drained: u64,

    /// Patterns waiting in the sink
    pub pending: usize,

    /// Tasks not yet done
    pub outstanding_tasks: usize,

    /// Tasks registered so far
    pub tasks: u64,

    /// Elapsed time
    pub elapsed: Duration,
}

impl WalkProgress {
    /// Calculate drained patterns per second
    pub fn patterns_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.drained as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_progress_rate() {
        let progress = WalkProgress {
            drained: 10_000,
            elapsed: Duration::from_secs(10),
            ..Default::default()
        };
        assert!((progress.patterns_per_second() - 1000.0).abs() < 0.1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = WalkConfig::default().with_max_length(2);
        assert!(Enumerator::new(config).is_err());
    }

    #[test]
    fn test_interrupted_before_start() {
        let config = WalkConfig::default().with_workers(2);
        let enumerator = Enumerator::new(config).unwrap();
        enumerator.shutdown_flag().store(true, Ordering::SeqCst);

        let (patterns, result) = enumerator.collect().unwrap();
        assert!(patterns.is_empty());
        assert!(!result.completed);
        assert_eq!(result.tasks, 9);
        assert_eq!(result.cancelled, 9);
    }
}
