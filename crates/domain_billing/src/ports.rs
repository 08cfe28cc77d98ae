//! Billing Domain Ports
//!
//! The invoice store persists the whole collection through the
//! [`InvoiceStorage`] port. Adapters:
//!
//! - **In-memory**: [`InMemoryInvoiceStorage`], for tests and ephemeral runs
//! - **JSON file**: `infra_storage::JsonFileInvoiceStorage`, used by the dashboard
//!
//! Both adapters round-trip the same JSON document, an array of invoice
//! records, so data written by one can be read by the other.

use std::sync::RwLock;

use core_kernel::{DomainPort, PortError};

use crate::invoice::Invoice;

/// Persistence port for the invoice collection
pub trait InvoiceStorage: DomainPort {
    /// Loads the stored collection
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and a
    /// `PortError::Transformation` when stored data cannot be decoded.
    fn load(&self) -> Result<Option<Vec<Invoice>>, PortError>;

    /// Replaces the stored collection
    fn save(&self, invoices: &[Invoice]) -> Result<(), PortError>;
}

/// In-memory implementation of [`InvoiceStorage`]
///
/// Keeps the serialized document rather than the records so that tests
/// exercise the same encoding as the file adapter.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStorage {
    document: RwLock<Option<String>>,
}

impl InMemoryInvoiceStorage {
    /// Creates an empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with the given invoices
    pub fn with_invoices(invoices: &[Invoice]) -> Result<Self, PortError> {
        let storage = Self::new();
        storage.save(invoices)?;
        Ok(storage)
    }

    /// Creates a storage holding an arbitrary raw document
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(document.into())),
        }
    }

    /// Returns the raw stored document
    pub fn document(&self) -> Option<String> {
        self.document
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl DomainPort for InMemoryInvoiceStorage {}

impl InvoiceStorage for InMemoryInvoiceStorage {
    fn load(&self) -> Result<Option<Vec<Invoice>>, PortError> {
        match self.document() {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    fn save(&self, invoices: &[Invoice]) -> Result<(), PortError> {
        let document = serde_json::to_string(invoices)?;
        let mut guard = self
            .document
            .write()
            .map_err(|_| PortError::internal("in-memory invoice storage lock poisoned"))?;
        *guard = Some(document);
        Ok(())
    }
}
