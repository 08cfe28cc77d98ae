//! Billing domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the billing domain
///
/// The date and metrics engine itself is total; these errors only arise at
/// the store boundary, where raw input is admitted and records are persisted.
#[derive(Debug, Error)]
pub enum BillingError {
    /// Invoice not found
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// Input rejected at admission
    #[error("Validation error: {0}")]
    Validation(String),

    /// Payment terms outside the supported set
    #[error("Unsupported payment terms: {0} days")]
    InvalidPaymentTerms(u32),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Storage port failure
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl From<validator::ValidationErrors> for BillingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        BillingError::Validation(errors.to_string())
    }
}
