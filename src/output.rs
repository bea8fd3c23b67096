//! Flat listing of enumerated patterns
//!
//! Each drained pattern becomes one `index;[p0 p1 ...]` record with a
//! 1-based index in drain order, for example `4;[0 3 6 7 8]`.
//!
//! Persisting the listing is best effort. The enumeration has already
//! completed in memory, so a failing file never aborts the run: the first
//! error is kept, the file is abandoned, and numbering carries on.

use crate::error::{OutputError, OutputResult};
use crate::walker::CompletedPattern;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One indexed listing record
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    pub index: u64,
    pub pattern: &'a CompletedPattern,
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.index, self.pattern)
    }
}

/// Buffered newline-delimited listing file
pub struct ListingWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    records: u64,
}

impl ListingWriter {
    /// Create (or truncate) the listing file
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::CreateFailed {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(1 << 16, file),
            records: 0,
        })
    }

    /// Append one record line
    pub fn write_line(&mut self, line: &str) -> OutputResult<()> {
        writeln!(self.writer, "{}", line).map_err(|source| self.write_error(source))?;
        self.records += 1;
        Ok(())
    }

    /// Flush and return the size of the file in bytes
    pub fn finish(mut self) -> OutputResult<u64> {
        self.writer.flush().map_err(|source| self.write_error(source))?;
        let size = self
            .writer
            .get_ref()
            .metadata()
            .map(|m| m.len())
            .map_err(|source| self.write_error(source))?;

        debug!(
            path = %self.path.display(),
            records = self.records,
            bytes = size,
            "Listing flushed"
        );
        Ok(size)
    }

    fn write_error(&self, source: std::io::Error) -> OutputError {
        OutputError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}

/// Console echo of record lines
///
/// Echo is best effort like the listing file: the first write or flush
/// failure (typically a closed pipe) is logged and echo stops.
pub struct Echo<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> Echo<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    /// Echo one record line
    pub fn line(&mut self, line: &str) {
        if self.enabled {
            if let Err(e) = writeln!(self.out, "{}", line) {
                warn!(error = %e, "Console echo stopped");
                self.enabled = false;
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flush the echoed lines, returning whether echo stayed healthy
    pub fn finish(mut self) -> bool {
        if !self.enabled {
            return false;
        }
        match self.out.flush() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to flush echoed records");
                false
            }
        }
    }
}

/// Outcome of building a listing
#[derive(Debug, Default)]
pub struct ListingReport {
    /// Records numbered (equals the number of drained patterns)
    pub count: u64,

    /// Size of the persisted file, if it was written completely
    pub bytes_written: Option<u64>,

    /// First persistence failure, if any
    pub error: Option<OutputError>,
}

/// Numbers drained patterns and persists them when a writer is attached
pub struct Listing {
    writer: Option<ListingWriter>,
    count: u64,
    error: Option<OutputError>,
}

impl Listing {
    /// A listing that only numbers records
    pub fn in_memory() -> Self {
        Self {
            writer: None,
            count: 0,
            error: None,
        }
    }

    /// A listing persisted to `path`
    ///
    /// A file that cannot be created is recorded in the report; numbering
    /// still works.
    pub fn with_file(path: &Path) -> Self {
        match ListingWriter::create(path) {
            Ok(writer) => Self {
                writer: Some(writer),
                count: 0,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "Listing will not be persisted");
                Self {
                    writer: None,
                    count: 0,
                    error: Some(e),
                }
            }
        }
    }

    /// Number `pattern`, persist it, and return its record line
    pub fn push(&mut self, pattern: &CompletedPattern) -> String {
        self.count += 1;
        let line = Record {
            index: self.count,
            pattern,
        }
        .to_string();

        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.write_line(&line) {
                warn!(error = %e, "Abandoning listing file");
                self.writer = None;
                self.error = Some(e);
            }
        }

        line
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Flush the file, if any, and report
    pub fn finish(self) -> ListingReport {
        let mut report = ListingReport {
            count: self.count,
            bytes_written: None,
            error: self.error,
        };

        if let Some(writer) = self.writer {
            match writer.finish() {
                Ok(size) => report.bytes_written = Some(size),
                Err(e) => {
                    warn!(error = %e, "Failed to flush listing file");
                    report.error = Some(e);
                }
            }
        }

        report
    }
}
