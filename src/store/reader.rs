//! Sequential record-file reader with strict corruption detection
//!
//! Used to rebuild the in-memory key map when the store opens. Every record
//! is checksum-verified; a trailing partial record or a checksum mismatch
//! stops the scan with an explicit corruption error.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::{MetricsRecord, MIN_RECORD_SIZE};

/// Reader for sequential scans over `metrics.dat`.
pub struct StoreReader {
    storage_path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl StoreReader {
    /// Opens the record file for reading.
    pub fn open(storage_path: &Path) -> StoreResult<Self> {
        let file = File::open(storage_path).map_err(|e| {
            StoreError::io(
                format!("failed to open record file: {}", storage_path.display()),
                e,
            )
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("failed to read record file metadata", e))?
            .len();

        Ok(Self {
            storage_path: storage_path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    pub fn has_more(&self) -> bool {
        self.current_offset < self.file_size
    }

    /// Reads the next record, validating its checksum.
    ///
    /// Returns `Ok(None)` at end of file. Any framing or checksum failure is
    /// reported as corruption at the current offset.
    pub fn read_next(&mut self) -> StoreResult<Option<MetricsRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "truncated record file: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 || record_length > remaining {
            return Err(StoreError::corruption(
                self.current_offset,
                format!("invalid record length: {}", record_length),
            ));
        }

        let mut buf = vec![0u8; record_length as usize];
        buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut buf[4..]).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = MetricsRecord::deserialize(&buf)
            .map_err(|e| StoreError::corruption(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }
}
