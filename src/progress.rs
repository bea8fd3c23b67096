//! Progress reporting for the pattern walk
//!
//! Provides a live spinner using indicatif and the header and summary blocks
//! printed around a run.

use crate::config::WalkConfig;
use crate::walker::{EnumerationResult, WalkProgress};
use console::style;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter that displays walk status
pub struct ProgressReporter {
    /// Progress bar
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        let spinner = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        bar.set_style(spinner);

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the progress display
    pub fn update(&self, progress: &WalkProgress) {
        let msg = format!(
            "Patterns: {} | Rate: {:.0}/s | Sink: {} | Tasks: {} ({} open)",
            format_number(progress.drained),
            progress.patterns_per_second(),
            format_number(progress.pending as u64),
            format_number(progress.tasks),
            format_number(progress.outstanding_tasks as u64),
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish the progress display with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of the enumeration
pub fn print_summary(result: &EnumerationResult, output: Option<(&str, Option<u64>)>) {
    let duration_secs = result.duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        result.drained as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    if result.completed {
        println!("{}", style("Enumeration Complete").green().bold());
    } else {
        println!("{}", style("Enumeration Interrupted").yellow().bold());
    }
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Patterns:").bold(), format_number(result.drained));
    println!("  {} {}", style("Tasks:").bold(), format_number(result.tasks));
    println!(
        "  {} {:.2}s ({:.0} patterns/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    if result.cancelled > 0 {
        println!(
            "  {} {}",
            style("Cancelled:").yellow().bold(),
            format_number(result.cancelled)
        );
    }
    // Show listing path with size if it was written
    match output {
        Some((path, Some(size))) => {
            println!("  {} {} ({})", style("Listing:").bold(), path, format_size(size, BINARY));
        }
        Some((path, None)) => {
            println!("  {} {} {}", style("Listing:").bold(), path, style("(not written)").yellow());
        }
        None => {}
    }
    println!();
}

/// Print a header at the start of the run
pub fn print_header(config: &WalkConfig) {
    let seeds: Vec<String> = config.seeds.iter().map(|p| p.to_string()).collect();

    println!();
    println!(
        "{} {}",
        style("unlock-walker").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Strategy:").bold(), config.strategy.name());
    println!("  {} {}", style("Workers:").bold(), config.worker_count);
    println!("  {} {}", style("Start points:").bold(), seeds.join(" "));
    println!("  {} {}", style("Max length:").bold(), config.max_length);
    if config.write_output {
        println!("  {} {}", style("Output:").bold(), config.output_path.display());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(389112), "389,112");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }
}
