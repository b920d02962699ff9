//! Append-only writer over the CSV submission store.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use thiserror::Error;

use super::record::SubmissionRecord;

/// Submission store failure taxonomy.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("submission store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("submission store is not parseable: {0}")]
    Csv(#[from] csv::Error),
    #[error("submission store header mismatch: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },
}

/// Append-only CSV log of every priced submission.
///
/// All writes funnel through one mutex, so two racing appends serialize
/// instead of one overwriting the other. Existing rows are never touched.
pub struct SubmissionLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SubmissionLog {
    /// The store path is explicit constructor input so tests can point it
    /// at a temp dir.
    pub fn new(path: PathBuf) -> Self {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::warn!("Failed to create submission directory: {}", e);
                }
            }
        }

        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row. A missing or empty store gets the header first; an
    /// existing store has its header verified before the row lands.
    pub fn append(&self, record: &SubmissionRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();

        let fresh = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        if !fresh {
            self.verify_header()?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(fresh)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }

    /// A record with columns the store does not have (or vice versa) is a
    /// schema error, never silently coerced.
    fn verify_header(&self) -> Result<(), StorageError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let found = reader.headers()?.clone();

        if !found.iter().eq(SubmissionRecord::HEADERS.iter().copied()) {
            return Err(StorageError::SchemaMismatch {
                expected: SubmissionRecord::HEADERS.join(", "),
                found: found.iter().collect::<Vec<_>>().join(", "),
            });
        }

        Ok(())
    }

    /// Read the whole store in submission order. A missing store is empty.
    pub fn read_all(&self) -> Result<Vec<SubmissionRecord>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row?);
        }

        Ok(rows)
    }

    pub fn stats(&self) -> Result<LogStats, StorageError> {
        let size_bytes = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        let rows = self.read_all()?.len();

        Ok(LogStats {
            rows,
            size_bytes,
            path: self.path.display().to_string(),
        })
    }
}

/// Store stats for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LogStats {
    pub rows: usize,
    pub size_bytes: u64,
    pub path: String,
}
