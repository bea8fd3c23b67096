//! Configuration types for unlock-walker
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation

use crate::error::ConfigError;
use crate::grid::{Point, GRID_POINTS};
use crate::walker::path::MIN_PATTERN_LEN;
use crate::walker::sink::DEFAULT_SINK_CAPACITY;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Default listing file
pub const DEFAULT_OUTPUT: &str = "dat1.csv";

/// Enumerate every valid 3x3 unlock pattern
#[derive(Parser, Debug, Clone)]
#[command(
    name = "unlock-walker",
    version,
    about = "Enumerate every valid 3x3 unlock pattern",
    long_about = "Walks every connect-the-dots pattern on a 3x3 grid that respects the skip rule \
                  (a line may not jump over an unvisited dot) and lists each pattern of four or \
                  more points with a 1-based index.",
    after_help = "EXAMPLES:\n    \
        unlock-walker\n    \
        unlock-walker -o patterns.csv -q\n    \
        unlock-walker --no-echo\n    \
        unlock-walker --strategy pool -w 8\n    \
        unlock-walker --start 0 --max-length 4"
)]
pub struct CliArgs {
    /// Output listing file (one `index;[points]` record per line)
    #[arg(short, long, default_value = DEFAULT_OUTPUT, value_name = "FILE")]
    pub output: PathBuf,

    /// Do not write the listing file
    #[arg(long)]
    pub no_write: bool,

    /// Exploration strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::FanOut)]
    pub strategy: Strategy,

    /// Number of worker threads
    #[arg(short = 'w', long, default_value_t = default_workers(), value_name = "NUM")]
    pub workers: usize,

    /// Longest pattern to explore (4 to 9)
    #[arg(short = 'm', long, default_value_t = GRID_POINTS, value_name = "NUM")]
    pub max_length: usize,

    /// Start point (can be repeated; all nine points if not set)
    #[arg(long = "start", value_name = "POINT", action = clap::ArgAction::Append)]
    pub start_points: Vec<u8>,

    /// Result sink capacity
    #[arg(long, default_value_t = DEFAULT_SINK_CAPACITY, value_name = "NUM")]
    pub sink_capacity: usize,

    /// Do not echo records to stdout (shows a live spinner instead)
    #[arg(long)]
    pub no_echo: bool,

    /// Quiet mode - suppress per-pattern echo and progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// How branches of the walk are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// One async task per legal move, unbounded fan-out
    #[value(name = "fanout")]
    FanOut,

    /// Fixed worker threads over a work-stealing queue of pending paths
    #[value(name = "pool")]
    Pool,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::FanOut => "fan-out",
            Strategy::Pool => "worker pool",
        }
    }
}

fn default_workers() -> usize {
    num_cpus::get()
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Listing file path
    pub output_path: PathBuf,

    /// Persist the listing
    pub write_output: bool,

    /// Exploration strategy
    pub strategy: Strategy,

    /// Worker threads (runtime workers for fan-out, pool size for pool)
    pub worker_count: usize,

    /// Longest path explored
    pub max_length: usize,

    /// Start points, deduplicated, ascending
    pub seeds: Vec<Point>,

    /// Result sink capacity
    pub sink_capacity: usize,

    /// Show header, spinner and summary
    pub show_progress: bool,

    /// Echo each record to the console
    pub echo: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            write_output: true,
            strategy: Strategy::FanOut,
            worker_count: default_workers(),
            max_length: GRID_POINTS,
            seeds: Point::ALL.to_vec(),
            sink_capacity: DEFAULT_SINK_CAPACITY,
            show_progress: false,
            echo: false,
            verbose: false,
        }
    }
}

impl WalkConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let seeds = if args.start_points.is_empty() {
            Point::ALL.to_vec()
        } else {
            parse_seeds(&args.start_points)?
        };

        // Validate output path
        if !args.no_write {
            if let Some(parent) = args.output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(ConfigError::InvalidOutputPath {
                        path: args.output.clone(),
                        reason: format!("Parent directory '{}' does not exist", parent.display()),
                    });
                }
            }
        }

        let config = Self {
            output_path: args.output,
            write_output: !args.no_write,
            strategy: args.strategy,
            worker_count: args.workers,
            max_length: args.max_length,
            seeds,
            sink_capacity: args.sink_capacity,
            show_progress: !args.quiet,
            echo: !args.quiet && !args.no_echo,
            verbose: args.verbose,
        };
        config.validate()?;

        Ok(config)
    }

    /// Whether to draw the live spinner
    ///
    /// The spinner redraws on stderr, so it stays off while records are
    /// echoed to stdout.
    pub fn spinner(&self) -> bool {
        self.show_progress && !self.echo
    }

    /// Check the walk parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == 0 || self.worker_count > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: self.worker_count,
                max: MAX_WORKERS,
            });
        }

        if !(MIN_PATTERN_LEN..=GRID_POINTS).contains(&self.max_length) {
            return Err(ConfigError::InvalidMaxLength {
                length: self.max_length,
                min: MIN_PATTERN_LEN,
                max: GRID_POINTS,
            });
        }

        if self.seeds.is_empty() {
            return Err(ConfigError::NoStartPoints);
        }

        if self.sink_capacity == 0 {
            return Err(ConfigError::InvalidSinkCapacity {
                capacity: self.sink_capacity,
            });
        }

        Ok(())
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_workers(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    pub fn with_seeds(mut self, seeds: &[Point]) -> Self {
        let mut seeds = seeds.to_vec();
        seeds.sort_unstable();
        seeds.dedup();
        self.seeds = seeds;
        self
    }

    pub fn with_sink_capacity(mut self, capacity: usize) -> Self {
        self.sink_capacity = capacity;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self.write_output = true;
        self
    }
}

/// Turn raw start ids into sorted, distinct points
fn parse_seeds(ids: &[u8]) -> Result<Vec<Point>, ConfigError> {
    let mut seeds = ids
        .iter()
        .map(|&id| Point::new(id).ok_or(ConfigError::InvalidStartPoint { point: id }))
        .collect::<Result<Vec<_>, _>>()?;
    seeds.sort_unstable();
    seeds.dedup();
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["unlock-walker", "--no-write"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let config = WalkConfig::from_args(args(&[])).unwrap();
        assert_eq!(config.seeds, Point::ALL.to_vec());
        assert_eq!(config.max_length, 9);
        assert_eq!(config.strategy, Strategy::FanOut);
        assert_eq!(config.sink_capacity, DEFAULT_SINK_CAPACITY);
        assert!(config.echo);
        assert!(!config.write_output);
    }

    #[test]
    fn test_start_points_deduplicated() {
        let config =
            WalkConfig::from_args(args(&["--start", "4", "--start", "0", "--start", "4"]))
                .unwrap();
        let ids: Vec<u8> = config.seeds.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![0, 4]);
    }

    #[test]
    fn test_no_echo_keeps_progress() {
        let config = WalkConfig::from_args(args(&["--no-echo"])).unwrap();
        assert!(!config.echo);
        assert!(config.show_progress);
        assert!(config.spinner());

        let config = WalkConfig::from_args(args(&[])).unwrap();
        assert!(config.echo);
        assert!(!config.spinner());
    }

    #[test]
    fn test_invalid_start_point() {
        let err = WalkConfig::from_args(args(&["--start", "9"])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidStartPoint { point: 9 });
    }

    #[test]
    fn test_invalid_max_length() {
        let err = WalkConfig::from_args(args(&["--max-length", "3"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxLength { length: 3, .. }));

        let err = WalkConfig::from_args(args(&["-m", "10"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMaxLength { length: 10, .. }));
    }

    #[test]
    fn test_invalid_worker_count() {
        let err = WalkConfig::from_args(args(&["-w", "0"])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWorkerCount { count: 0, .. }));
    }

    #[test]
    fn test_strategy_parsing() {
        let config = WalkConfig::from_args(args(&["--strategy", "pool", "-q"])).unwrap();
        assert_eq!(config.strategy, Strategy::Pool);
        assert!(!config.echo);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_missing_output_directory() {
        let argv = vec!["unlock-walker", "-o", "/definitely/not/here/out.csv"];
        let err = WalkConfig::from_args(CliArgs::parse_from(argv)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOutputPath { .. }));
    }

    #[test]
    fn test_builder_validation() {
        let config = WalkConfig::default().with_seeds(&[]).with_workers(2);
        assert_eq!(config.validate(), Err(ConfigError::NoStartPoints));

        let config = WalkConfig::default().with_sink_capacity(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidSinkCapacity { .. })));
    }
}
