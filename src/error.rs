//! Error types for Stockpile
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for Stockpile operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Slot Errors
    // -------------------------------------------------------------------------
    /// A slot read returned fewer bytes than the fixed record width.
    /// Recoverable on read-only scans (the trailing fragment is skipped),
    /// fatal for update/delete.
    #[error("record size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A text field held invalid UTF-8 after stripping the zero padding.
    /// Recoverable on read-only scans, fatal for update/delete.
    #[error("record decode failed: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
