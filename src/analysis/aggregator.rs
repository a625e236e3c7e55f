//! Reading input files and grouping performance values by position.
//!
//! Problems are handled where they are found: a file that cannot be used is
//! warned about and skipped, a row that cannot be used is dropped.

use crate::analysis::fields::find_field;
use crate::config::ColumnConfig;
use crate::models::{Grouping, PerformanceRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why an input file contributed nothing.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("file not found")]
    NotFound,

    #[error("required columns 'position' and 'performance' not found")]
    MissingColumns,

    #[error("failed to read CSV: {0}")]
    Unreadable(#[from] csv::Error),
}

/// An input file that was skipped, with the reason.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Row counts for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Rows that added a value to the grouping.
    pub accepted: usize,
    /// Rows dropped for a blank cell, a non-numeric value or a decode error.
    pub dropped: usize,
}

/// Outcome of reading a list of input files.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Values grouped by position.
    pub grouping: Grouping,
    /// Files whose columns resolved and whose rows were read.
    pub files_processed: usize,
    /// Files that were skipped entirely.
    pub skipped: Vec<SkippedFile>,
    /// Rows accepted across all files.
    pub rows_accepted: usize,
    /// Rows dropped across all files.
    pub rows_dropped: usize,
}

impl Aggregation {
    /// Consume the aggregation, keeping only the grouping.
    pub fn into_grouping(self) -> Grouping {
        self.grouping
    }
}

/// Read every file in order and group their values by position.
///
/// Files are processed one at a time; each handle is closed before the
/// next file is opened.
pub fn read_files<P: AsRef<Path>>(paths: &[P], columns: &ColumnConfig) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for path in paths {
        let path = path.as_ref();

        match read_file(path, columns, &mut aggregation.grouping) {
            Ok(stats) => {
                debug!(
                    "{}: {} rows accepted, {} rows dropped",
                    path.display(),
                    stats.accepted,
                    stats.dropped
                );
                aggregation.files_processed += 1;
                aggregation.rows_accepted += stats.accepted;
                aggregation.rows_dropped += stats.dropped;
            }
            Err(reason) => {
                match reason {
                    SkipReason::NotFound => {
                        warn!("File not found: {}", path.display());
                    }
                    _ => warn!("Skipping {}: {}", path.display(), reason),
                }
                aggregation.skipped.push(SkippedFile {
                    path: path.to_path_buf(),
                    reason,
                });
            }
        }
    }

    if aggregation.files_processed == 0 {
        warn!("No valid input files processed.");
    } else {
        info!(
            "Processed {} file(s): {} positions, {} values",
            aggregation.files_processed,
            aggregation.grouping.len(),
            aggregation.grouping.value_count()
        );
    }

    aggregation
}

/// Read one CSV file and append its usable rows to `grouping`.
///
/// Nothing is appended unless both columns resolve.
pub fn read_file(
    path: &Path,
    columns: &ColumnConfig,
    grouping: &mut Grouping,
) -> Result<FileStats, SkipReason> {
    if !path.exists() {
        return Err(SkipReason::NotFound);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let names: Vec<&str> = headers.iter().collect();

    let (Some(position), Some(performance)) = (
        find_field(&names, &columns.position),
        find_field(&names, &columns.performance),
    ) else {
        return Err(SkipReason::MissingColumns);
    };

    debug!(
        "{}: position column '{}', performance column '{}'",
        path.display(),
        position.name,
        performance.name
    );

    let mut stats = FileStats::default();

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(e) if e.is_io_error() => {
                warn!("Stopped reading {}: {}", path.display(), e);
                break;
            }
            Err(e) => {
                debug!("Dropping undecodable row in {}: {}", path.display(), e);
                stats.dropped += 1;
                continue;
            }
        };

        let parsed =
            PerformanceRecord::from_cells(row.get(position.index), row.get(performance.index))
                .and_then(|record| record.performance().map(|value| (record.position, value)));

        match parsed {
            Some((label, value)) => {
                grouping.push(label, value);
                stats.accepted += 1;
            }
            None => stats.dropped += 1,
        }
    }

    Ok(stats)
}
