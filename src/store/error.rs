//! Store-specific error types
//!
//! These are the failures a store collaborator reports back to the traversal
//! engine. The engine never interprets them beyond [`StoreError::is_busy`];
//! they abort the current command and surface to the user unchanged.
//!
//! # Error Types
//!
//! - **`NotFound`**: The folder or item does not exist (anymore)
//! - **`InvalidPath`**: The path cannot be expressed in this store
//! - **`Busy`**: The device is temporarily busy; callers may retry
//! - **`Io`**: Host I/O failure
//! - **`Device`**: Opaque device failure with its own error code

use thiserror::Error;

/// Errors reported by a store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Folder or item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path is not valid for this store
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The device is busy and the operation may succeed if retried
    #[error("Device busy: {0}")]
    Busy(String),

    /// Host I/O failure
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Device failure carrying a device-specific code
    #[error("Device error {code}: {message}")]
    Device { code: i32, message: String },
}

impl StoreError {
    /// Numeric error code, passed through unchanged for device errors
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotFound(_) => -108,
            Self::InvalidPath(_) => -2,
            Self::Busy(_) => -110,
            Self::Io(_) => -1,
            Self::Device { code, .. } => *code,
        }
    }

    /// Whether retrying the same operation may succeed
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
