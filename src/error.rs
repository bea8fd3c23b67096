//! Error types for unlock-walker
//!
//! The enumeration core is total over its fixed 9-point domain and never
//! fails. Errors only arise at the edges:
//! - Configuration and CLI validation
//! - Starting the runtime or worker threads
//! - Persisting the pattern listing
//!
//! Library code uses these thiserror types; the binary wraps them in anyhow
//! with context.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for unlock-walker
#[derive(Error, Debug)]
pub enum UnlockError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Output persistence errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl UnlockError {
    /// Whether the enumeration result survives this error
    ///
    /// Output failures leave the in-memory enumeration intact, so they are
    /// reported and the run continues.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, UnlockError::Output(_))
    }
}

/// Configuration and CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// Maximum pattern length outside the emitted range
    #[error("Invalid maximum length {length}: must be between {min} and {max}")]
    InvalidMaxLength { length: usize, min: usize, max: usize },

    /// Start point off the grid
    #[error("Invalid start point {point}: grid points are numbered 0 to 8")]
    InvalidStartPoint { point: u8 },

    /// Nothing to seed the walk with
    #[error("At least one start point is required")]
    NoStartPoints,

    /// Sink cannot hold anything
    #[error("Invalid sink capacity {capacity}: must be at least 1")]
    InvalidSinkCapacity { capacity: usize },

    /// Output path error
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Worker thread and task errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked: {message}")]
    Panicked { id: usize, message: String },

    /// Result sink closed while producers were still pushing
    #[error("Result channel closed unexpectedly")]
    ResultChannelClosed,

    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Async runtime could not be built
    #[error("Failed to start async runtime: {0}")]
    RuntimeFailed(String),
}

/// Errors while persisting the pattern listing
#[derive(Error, Debug)]
pub enum OutputError {
    /// Output file could not be created
    #[error("Failed to create '{path}': {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record could not be written
    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for UnlockError
pub type Result<T> = std::result::Result<T, UnlockError>;

/// Result type alias for OutputError
pub type OutputResult<T> = std::result::Result<T, OutputError>;
