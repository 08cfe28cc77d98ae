//! Infrastructure Storage Layer
//!
//! This crate provides the file-backed adapter for the billing domain's
//! [`domain_billing::InvoiceStorage`] port.
//!
//! # Storage Model
//!
//! The whole invoice collection lives in one JSON document under a fixed
//! key, `<data_dir>/<key>.json`. Every save rewrites the document through a
//! temporary file and a rename, so a crash mid-write leaves the previous
//! version in place rather than a truncated one.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_storage::{JsonFileInvoiceStorage, DEFAULT_STORAGE_KEY};
//!
//! let storage = JsonFileInvoiceStorage::new("./data", DEFAULT_STORAGE_KEY)?;
//! let store = InvoiceStore::open(Arc::new(storage), clock, StoreConfig::default())?;
//! ```

pub mod error;
pub mod json_file;

pub use error::StorageError;
pub use json_file::{JsonFileInvoiceStorage, DEFAULT_STORAGE_KEY};
