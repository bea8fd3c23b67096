//! Concurrent unlock-pattern walker
//!
//! This module implements the pattern enumeration: a recursive walk that
//! extends each path by every legal next point, one task per extension.
//!
//! # Architecture
//!
//! ```text
//!                     ┌─────────────────────────┐
//!                     │       Enumerator        │
//!                     │  - seeds 1 task / point │
//!                     │  - sink watcher thread  │
//!                     └───────────┬─────────────┘
//!                                 │
//!       ┌─────────────────────────┼─────────────────────────┐
//!       │                         │                         │
//! ┌─────▼─────┐             ┌─────▼─────┐             ┌─────▼─────┐
//! │  Task     │             │  Task     │             │  Task     │
//! │ emit path │             │ emit path │             │ emit path │
//! │ fan out   │             │ fan out   │             │ fan out   │
//! └─────┬─────┘             └─────┬─────┘             └─────┬─────┘
//!       └─────────────────────────┼─────────────────────────┘
//!                                 ▼
//!                     ┌─────────────────────────┐
//!                     │  Result sink (bounded)  │
//!                     │  closed when tracker    │
//!                     │  reaches zero           │
//!                     └─────────────────────────┘
//! ```

pub mod context;
pub mod coordinator;
mod fanout;
pub mod path;
mod pool;
pub mod rules;
pub mod sink;
pub mod tracker;

pub use context::WalkStats;
pub use coordinator::{Enumeration, EnumerationResult, Enumerator, WalkProgress};
pub use path::{CompletedPattern, Path, MIN_PATTERN_LEN};
pub use rules::{is_legal_move, is_valid_pattern, legal_moves};
pub use sink::{PatternDrain, ResultSink, SinkSender, SinkStats, DEFAULT_SINK_CAPACITY};
pub use tracker::{CompletionTracker, TaskGuard};
