//! Append-only record-file writer with fsync enforcement
//!
//! Writes are never in place: an upsert appends a full record and the latest
//! record for a key wins on the next scan. Every write is fsynced before the
//! operation is acknowledged.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::MetricsRecord;

/// Relative path of the record file inside the data directory.
pub(crate) const RECORD_FILE: &str = "metrics.dat";

/// Writer maintaining the `metrics.dat` file.
#[derive(Debug)]
pub struct StoreWriter {
    storage_path: PathBuf,
    file: File,
    current_offset: u64,
}

impl StoreWriter {
    /// Opens or creates `<data_dir>/data/metrics.dat`, creating parent
    /// directories as needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let data_subdir = data_dir.join("data");
        let storage_path = data_subdir.join(RECORD_FILE);

        if !data_subdir.exists() {
            fs::create_dir_all(&data_subdir).map_err(|e| {
                StoreError::io(
                    format!("failed to create data directory: {}", data_subdir.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&storage_path)
            .map_err(|e| {
                StoreError::io(
                    format!("failed to open record file: {}", storage_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read record file metadata", e))?
            .len();

        Ok(Self {
            storage_path,
            file,
            current_offset,
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends one record and fsyncs.
    ///
    /// Returns the offset at which the record was written.
    pub fn write(&mut self, record: &MetricsRecord) -> StoreResult<u64> {
        let offset = self.current_offset;
        let bytes = record.serialize();

        self.file.write_all(&bytes).map_err(|e| {
            StoreError::io(
                format!("failed to append record for '{}'", record.api_name),
                e,
            )
        })?;
        self.file
            .sync_data()
            .map_err(|e| StoreError::io("failed to fsync record file", e))?;

        self.current_offset += bytes.len() as u64;
        Ok(offset)
    }
}
