//! Result sink for completed patterns
//!
//! A bounded, append-only queue written concurrently by every walk task and
//! drained exactly once by the caller. The orchestrator keeps the primary
//! sender and drops it once the completion tracker reports that all tasks are
//! done; the drain ends when the sink is closed and empty.
//!
//! Producers may run inside the tokio runtime (`push`) or on plain worker
//! threads (`blocking_push`). The drain must run outside of any async
//! context.

use crate::error::WorkerError;
use crate::walker::path::CompletedPattern;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Number of ordered selections of `k` points out of `n`
const fn permutations(n: usize, k: usize) -> usize {
    let mut result = 1;
    let mut i = 0;
    while i < k {
        result *= n - i;
        i += 1;
    }
    result
}

/// Default sink capacity: the number of paths of 2..=7 points on 9 dots
/// when the skip rule is ignored (260 640)
pub const DEFAULT_SINK_CAPACITY: usize = {
    let mut total = 0;
    let mut k = 1;
    while k <= 6 {
        total += permutations(9, k + 1);
        k += 1;
    }
    total
};

/// Counters kept alongside the sink
#[derive(Debug, Default)]
pub struct SinkStats {
    /// Patterns successfully pushed
    pub emitted: AtomicU64,

    /// Pushes rejected because the drain side was gone
    pub rejected: AtomicU64,
}

impl SinkStats {
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }
}

/// Owner side of the sink, held by the orchestrator until all tasks finish
pub struct ResultSink {
    sender: mpsc::Sender<CompletedPattern>,
    stats: Arc<SinkStats>,
    capacity: usize,
}

impl ResultSink {
    /// Create a sink and its drain
    ///
    /// `capacity` is clamped to at least 1.
    pub fn new(capacity: usize) -> (Self, PatternDrain) {
        let capacity = capacity.max(1);
        let (sender, receiver) = mpsc::channel(capacity);
        let stats = Arc::new(SinkStats::default());

        let sink = Self {
            sender,
            stats: Arc::clone(&stats),
            capacity,
        };
        let drain = PatternDrain {
            receiver,
            stats,
            drained: 0,
        };
        (sink, drain)
    }

    /// Producer handle (clone one per task or worker)
    pub fn sender(&self) -> SinkSender {
        SinkSender {
            sender: self.sender.clone(),
            stats: Arc::clone(&self.stats),
        }
    }

    pub fn stats(&self) -> Arc<SinkStats> {
        Arc::clone(&self.stats)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Close the sink for further writes
    ///
    /// Producers still holding a `SinkSender` keep the channel open until
    /// they drop it; the tracker guarantees they are all finishing.
    pub fn close(self) {
        drop(self.sender);
    }
}

/// Producer handle for pushing completed patterns
#[derive(Clone)]
pub struct SinkSender {
    sender: mpsc::Sender<CompletedPattern>,
    stats: Arc<SinkStats>,
}

impl SinkSender {
    /// Push from an async task, waiting while the sink is full
    pub async fn push(&self, pattern: CompletedPattern) -> Result<(), WorkerError> {
        match self.sender.send(pattern).await {
            Ok(()) => {
                self.stats.emitted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(_) => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                Err(WorkerError::ResultChannelClosed)
            }
        }
    }

    /// Push from a plain thread, blocking while the sink is full
    ///
    /// Must not be called from inside the async runtime.
    pub fn blocking_push(&self, pattern: CompletedPattern) -> Result<(), WorkerError> {
        match self.sender.blocking_send(pattern) {
            Ok(()) => {
                self.stats.emitted.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(_) => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                Err(WorkerError::ResultChannelClosed)
            }
        }
    }
}

/// Drain side of the sink
///
/// Yields patterns in arrival order until the sink is closed and empty.
pub struct PatternDrain {
    receiver: mpsc::Receiver<CompletedPattern>,
    stats: Arc<SinkStats>,
    drained: u64,
}

impl PatternDrain {
    /// Patterns taken out of the sink so far
    pub fn drained(&self) -> u64 {
        self.drained
    }

    /// Patterns pushed into the sink so far
    pub fn emitted(&self) -> u64 {
        self.stats.emitted()
    }

    /// Patterns waiting in the sink
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Take the next pattern, blocking until one arrives or the sink closes
    pub fn blocking_next(&mut self) -> Option<CompletedPattern> {
        let pattern = self.receiver.blocking_recv()?;
        self.drained += 1;
        Some(pattern)
    }
}

impl Iterator for PatternDrain {
    type Item = CompletedPattern;

    fn next(&mut self) -> Option<Self::Item> {
        self.blocking_next()
    }
}
