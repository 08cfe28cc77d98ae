//! Storage error types

use std::path::PathBuf;

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur while reading or writing the invoice document
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage key cannot be used as a file name
    #[error("Invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),

    /// The file system refused a read or write
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document is not a valid invoice collection
    #[error("Unreadable invoice document {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded
    #[error("Failed to encode invoices: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Checks if the stored document exists but cannot be decoded
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, StorageError::Decode { .. })
    }
}

/// Translates storage errors to port errors
///
/// - `Decode` and `Encode` -> `PortError::Transformation`
/// - `Io` -> `PortError::Connection`
/// - `InvalidKey` -> `PortError::Validation`
impl From<StorageError> for PortError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(_) => PortError::validation_field(err.to_string(), "storage_key"),
            StorageError::Io { .. } => PortError::Connection {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
            StorageError::Decode { .. } | StorageError::Encode(_) => {
                PortError::transformation(err.to_string())
            }
        }
    }
}
