//! Ports and adapters infrastructure
//!
//! The billing domain talks to persistence only through port traits. Each
//! port reports failures with [`PortError`], so the in-memory adapter used in
//! tests and the file adapter used by the dashboard fail in the same shape.

use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The backing store could not be reached
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored data could not be converted to or from domain records
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PortError {
    /// Creates a Validation error with field information
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        PortError::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if the stored data exists but cannot be read back
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, PortError::Transformation { .. })
    }
}

impl From<std::io::Error> for PortError {
    fn from(err: std::io::Error) -> Self {
        PortError::Connection {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for PortError {
    fn from(err: serde_json::Error) -> Self {
        PortError::Transformation {
            message: err.to_string(),
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared between the store and background tasks, so every
/// implementation must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_errors_are_transformation_errors() {
        let err = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        let port_err: PortError = err.into();
        assert!(port_err.is_corrupt_data());
    }

    #[test]
    fn test_io_errors_are_connection_errors() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let port_err: PortError = err.into();
        assert!(matches!(port_err, PortError::Connection { .. }));
        assert!(!port_err.is_corrupt_data());
    }

    #[test]
    fn test_validation_field_display() {
        let err = PortError::validation_field("bad key", "storage_key");
        assert_eq!(err.to_string(), "Validation error: bad key");
        assert!(matches!(err, PortError::Validation { field: Some(ref f), .. } if f == "storage_key"));
    }
}
