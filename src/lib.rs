//! unlock-walker - Concurrent 3x3 Unlock Pattern Enumerator
//!
//! Enumerates every connect-the-dots pattern on the Android-style 3×3 lock
//! grid that respects the skip rule, and lists each pattern of four or more
//! points with a 1-based index.
//!
//! # Features
//!
//! - **Skip Rule**: a line may not jump over an unvisited dot; corner to
//!   corner and side to opposite side moves need their midpoint visited first.
//!
//! - **Concurrent Walk**: one async task per legal move (fan-out), or a fixed
//!   pool of threads over a work-stealing queue.
//!
//! - **Bounded Sink**: completed patterns flow through a bounded queue that
//!   is drained while the walk runs and closed once every task is done.
//!
//! - **Flat Listing**: `index;[points]` records, one per line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Enumerator                             │
//! │              seeds one task per start point (0..8)              │
//! └─────────────────────────────┬───────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Walk Tasks                              │
//! │  emit path (len > 3) → legal moves → register + spawn children  │
//! │                               │                                 │
//! │         ┌─────────────────────┴──────────────────┐              │
//! │         ▼                                        ▼              │
//! │  ┌──────────────────┐                 ┌────────────────────┐    │
//! │  │ Result Sink      │                 │ Completion Tracker │    │
//! │  │ (tokio bounded)  │◄── close ───────│ watcher: wait → 0  │    │
//! │  └────────┬─────────┘                 └────────────────────┘    │
//! └───────────┼─────────────────────────────────────────────────────┘
//!             ▼
//!    ┌──────────────────┐
//!    │ Listing (drain)  │
//!    │   dat1.csv       │
//!    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Full enumeration, listing in dat1.csv
//! unlock-walker
//!
//! # Worker pool, quiet
//! unlock-walker --strategy pool -w 8 -q
//!
//! # Only patterns of four points starting at the top-left dot
//! unlock-walker --start 0 --max-length 4
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod output;
pub mod progress;
pub mod walker;

pub use config::{CliArgs, Strategy, WalkConfig};
pub use error::{Result, UnlockError};
pub use grid::{classify, midpoint, DotRole, Point};
pub use walker::{CompletedPattern, Enumeration, EnumerationResult, Enumerator};
