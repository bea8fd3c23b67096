//! unlock-walker - Concurrent 3x3 unlock pattern enumerator
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use unlock_walker::config::{CliArgs, WalkConfig};
use unlock_walker::output::{Echo, Listing};
use unlock_walker::progress::{print_header, print_summary, ProgressReporter};
use unlock_walker::walker::Enumerator;

/// Refresh the spinner every this many drained patterns
const PROGRESS_INTERVAL: u64 = 4096;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Setup logging
    setup_logging(args.verbose)?;

    // Validate and create config
    let config = WalkConfig::from_args(args).context("Invalid configuration")?;

    if config.show_progress {
        print_header(&config);
    }

    let enumerator = Enumerator::new(config.clone()).context("Failed to initialize enumerator")?;

    // Setup signal handler for graceful shutdown
    let shutdown_flag = enumerator.shutdown_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, shutting down...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Failed to set signal handler")?;

    let mut enumeration = enumerator.start().context("Failed to start enumeration")?;

    let progress = if config.spinner() {
        Some(ProgressReporter::new())
    } else {
        None
    };

    if let Some(ref p) = progress {
        p.set_status("Walking patterns...");
    }

    let mut listing = if config.write_output {
        Listing::with_file(&config.output_path)
    } else {
        Listing::in_memory()
    };

    // Drain concurrently with the walk
    let mut echo = Echo::new(io::stdout().lock(), config.echo);

    while let Some(pattern) = enumeration.next() {
        let line = listing.push(&pattern);
        echo.line(&line);

        if let Some(ref p) = progress {
            if listing.count() % PROGRESS_INTERVAL == 0 {
                p.update(&enumeration.progress());
            }
        }
    }
    echo.finish();

    let result = enumeration.finish().context("Enumeration failed")?;
    let report = listing.finish();

    // Finish progress
    if let Some(ref p) = progress {
        if result.completed {
            p.finish("Enumeration completed");
        } else {
            p.finish("Enumeration interrupted");
        }
    }

    println!("Total patterns: {}", report.count);

    if config.show_progress {
        let path = config.output_path.display().to_string();
        let output = config
            .write_output
            .then_some((path.as_str(), report.bytes_written));
        print_summary(&result, output);
    }

    // Persistence failures are reported but never fail the run
    if let Some(e) = &report.error {
        warn!(error = %e, "Pattern listing was not fully persisted");
        eprintln!("Warning: {}", e);
    }

    if !result.completed {
        info!("Enumeration was interrupted before completion");
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("unlock_walker=debug,warn")
    } else {
        EnvFilter::new("unlock_walker=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
