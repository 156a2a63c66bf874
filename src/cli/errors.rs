//! CLI-specific error types
//!
//! Every CLI error is fatal: the command prints the error and exits non-zero.

use std::fmt;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Already initialized
    AlreadyInitialized,
    /// Not initialized
    NotInitialized,
    /// Boot failed
    BootFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "HITSTORE_CONFIG_ERROR",
            Self::AlreadyInitialized => "HITSTORE_ALREADY_INITIALIZED",
            Self::NotInitialized => "HITSTORE_NOT_INITIALIZED",
            Self::BootFailed => "HITSTORE_BOOT_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn config_error(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::ConfigError,
            message: message.into(),
        }
    }

    pub fn already_initialized() -> Self {
        Self {
            code: CliErrorCode::AlreadyInitialized,
            message: "data directory is already initialized".to_string(),
        }
    }

    pub fn not_initialized() -> Self {
        Self {
            code: CliErrorCode::NotInitialized,
            message: "data directory is not initialized; run 'hitstore init' first".to_string(),
        }
    }

    pub fn boot_failed(message: impl Into<String>) -> Self {
        Self {
            code: CliErrorCode::BootFailed,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_code() {
        let err = CliError::config_error("bad config");
        let rendered = err.to_string();
        assert!(rendered.contains("HITSTORE_CONFIG_ERROR"));
        assert!(rendered.contains("bad config"));
    }

    #[test]
    fn test_not_initialized_code() {
        assert_eq!(
            CliError::not_initialized().code_str(),
            "HITSTORE_NOT_INITIALIZED"
        );
    }
}
