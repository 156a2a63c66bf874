//! Store error types
//!
//! Two categories: I/O failures (the operation fails, the server continues)
//! and corruption (the store refuses to serve until repaired).

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the metrics store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure while reading or writing the record file
    #[error("store I/O failure: {context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Checksum or framing failure in the record file
    #[error("store corruption at offset {offset}: {message}")]
    Corruption { offset: u64, message: String },
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, message: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            message: message.into(),
        }
    }

    /// Whether this error indicates an unreadable record file.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::Corruption { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corruption_display_includes_offset() {
        let err = StoreError::corruption(42, "checksum mismatch");
        assert!(err.to_string().contains("offset 42"));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_io_error_is_not_corruption() {
        let err = StoreError::io(
            "open failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_corruption());
    }
}
