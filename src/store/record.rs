//! Metrics record type and its on-disk frame
//!
//! One record per write, appended to `metrics.dat`:
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes this field and the checksum)
//! +------------------+
//! | API Name         | (length-prefixed string)
//! +------------------+
//! | Total Hits       | (i64 LE)
//! +------------------+
//! | Successful Hits  | (i64 LE)
//! +------------------+
//! | Failed Hits      | (i64 LE)
//! +------------------+
//! | Checksum         | (u32 LE)
//! +------------------+
//! ```
//!
//! Checksum covers all bytes except the checksum itself.

use std::io;

use serde::{Deserialize, Serialize};

/// Minimum serialized size: length + name prefix + 3 counters + checksum.
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 24 + 4;

/// One row of the keyed counter table: an API name plus three hit counters.
///
/// `api_name` is the primary key. Counter fields are full-replace on write;
/// no relation between `total_hits` and the success/failure split is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub api_name: String,
    #[serde(default)]
    pub total_hits: i64,
    #[serde(default)]
    pub successful_hits: i64,
    #[serde(default)]
    pub failed_hits: i64,
}

impl MetricsRecord {
    pub fn new(api_name: impl Into<String>, total: i64, successful: i64, failed: i64) -> Self {
        Self {
            api_name: api_name.into(),
            total_hits: total,
            successful_hits: successful,
            failed_hits: failed,
        }
    }

    /// Serialize the record body (everything except length prefix and checksum).
    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.api_name.len() + 24);

        buf.extend_from_slice(&(self.api_name.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.api_name.as_bytes());

        buf.extend_from_slice(&self.total_hits.to_le_bytes());
        buf.extend_from_slice(&self.successful_hits.to_le_bytes());
        buf.extend_from_slice(&self.failed_hits.to_le_bytes());

        buf
    }

    /// Serialize the complete record to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        // Checksum covers: length + body
        let mut checksum_data = Vec::with_capacity(4 + body.len());
        checksum_data.extend_from_slice(&record_length.to_le_bytes());
        checksum_data.extend_from_slice(&body);
        let checksum = super::checksum::compute_checksum(&checksum_data);

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserialize a record from bytes, verifying checksum.
    ///
    /// Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }
        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record truncated",
            ));
        }

        // Verify checksum over length + body
        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        if !super::checksum::verify_checksum(&data[..checksum_offset], stored_checksum) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum mismatch",
            ));
        }

        let mut pos = 4;

        let name_len = u32::from_le_bytes([data[pos], data[pos + 1], data[pos + 2], data[pos + 3]])
            as usize;
        pos += 4;
        if pos + name_len + 24 + 4 != record_length {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Record length does not match field lengths",
            ));
        }
        let api_name = String::from_utf8(data[pos..pos + name_len].to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        pos += name_len;

        let total_hits = read_counter(data, &mut pos);
        let successful_hits = read_counter(data, &mut pos);
        let failed_hits = read_counter(data, &mut pos);

        Ok((
            Self {
                api_name,
                total_hits,
                successful_hits,
                failed_hits,
            },
            record_length,
        ))
    }
}

/// Reads one little-endian counter, advancing the position.
///
/// Bounds are guaranteed by the record-length check in `deserialize`.
fn read_counter(data: &[u8], pos: &mut usize) -> i64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[*pos..*pos + 8]);
    *pos += 8;
    i64::from_le_bytes(buf)
}

/// Names one of the three counters, for scalar projection lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Total,
    Successful,
    Failed,
}

impl CounterField {
    /// Projects this counter out of a record.
    pub fn of(&self, record: &MetricsRecord) -> i64 {
        match self {
            CounterField::Total => record.total_hits,
            CounterField::Successful => record.successful_hits,
            CounterField::Failed => record.failed_hits,
        }
    }
}
