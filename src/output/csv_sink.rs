//! CSV store for accepted listings
//!
//! The file only ever grows: each run appends its rows, and the header is
//! written once, when the file is first created.

use crate::model::{LaptopRecord, CSV_HEADER};
use crate::output::traits::{OutputError, OutputResult};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// What an append did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// There were no records, so the file was left alone
    NothingToSave,

    /// Rows were appended
    Appended { rows: usize, wrote_header: bool },
}

impl AppendOutcome {
    /// Number of rows written
    pub fn rows(&self) -> usize {
        match self {
            Self::NothingToSave => 0,
            Self::Appended { rows, .. } => *rows,
        }
    }
}

/// Appends records to the CSV file at `path`
///
/// The header row is written only if the file does not exist yet. Existing
/// rows are never rewritten or deduplicated.
///
/// # Arguments
///
/// * `records` - Records to append, in order
/// * `path` - Destination CSV file; missing parent directories are created
pub fn append_records(records: &[LaptopRecord], path: &Path) -> OutputResult<AppendOutcome> {
    if records.is_empty() {
        tracing::info!("No data to save.");
        return Ok(AppendOutcome::NothingToSave);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let write_header = !path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| OutputError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let csv_error = |source: csv::Error| OutputError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if write_header {
        writer.write_record(CSV_HEADER).map_err(csv_error)?;
    }

    for record in records {
        writer.write_record(record.to_row()).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Appended {} rows to {} (header: {})",
        records.len(),
        path.display(),
        write_header
    );

    Ok(AppendOutcome::Appended {
        rows: records.len(),
        wrote_header: write_header,
    })
}
