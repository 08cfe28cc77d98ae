//! JSON file adapter for the invoice storage port

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_billing::{Invoice, InvoiceStorage};

use crate::error::StorageError;

/// Key the dashboard stores its collection under
pub const DEFAULT_STORAGE_KEY: &str = "invoices";

/// Stores the invoice collection as one JSON document on disk
///
/// The document is an array of invoice records, identical to what
/// [`domain_billing::InMemoryInvoiceStorage`] holds.
#[derive(Debug, Clone)]
pub struct JsonFileInvoiceStorage {
    dir: PathBuf,
    key: String,
}

impl JsonFileInvoiceStorage {
    /// Creates a storage for `<dir>/<key>.json`
    ///
    /// The directory is created on first save, not here.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` if `key` is empty or contains anything other than
    /// ASCII letters, digits, `-` and `_`.
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key));
        }

        Ok(Self {
            dir: dir.into(),
            key,
        })
    }

    /// Path of the stored document
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }

    /// Reads and decodes the document, `None` if it does not exist yet
    pub fn read(&self) -> Result<Option<Vec<Invoice>>, StorageError> {
        let path = self.path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::io(path, err)),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Decode { path, source })
    }

    /// Encodes and atomically replaces the document
    pub fn write(&self, invoices: &[Invoice]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| StorageError::io(&self.dir, err))?;

        let temp = self.temp_path();
        write_document(&temp, invoices)?;
        fs::rename(&temp, self.path()).map_err(|err| StorageError::io(&temp, err))
    }
}

fn write_document(path: &Path, invoices: &[Invoice]) -> Result<(), StorageError> {
    let file = File::create(path).map_err(|err| StorageError::io(path, err))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, invoices).map_err(StorageError::Encode)?;
    writer.flush().map_err(|err| StorageError::io(path, err))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|err| StorageError::io(path, err))
}

impl DomainPort for JsonFileInvoiceStorage {}

impl InvoiceStorage for JsonFileInvoiceStorage {
    #[instrument(skip(self), fields(path = %self.path().display()))]
    fn load(&self) -> Result<Option<Vec<Invoice>>, PortError> {
        let loaded = self.read()?;
        debug!(count = loaded.as_ref().map(Vec::len), "Read invoice document");
        Ok(loaded)
    }

    #[instrument(skip(self, invoices), fields(path = %self.path().display(), count = invoices.len()))]
    fn save(&self, invoices: &[Invoice]) -> Result<(), PortError> {
        self.write(invoices)?;
        debug!("Wrote invoice document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_uses_key() {
        let storage = JsonFileInvoiceStorage::new("/var/lib/invoices", "book-2024").unwrap();
        assert_eq!(storage.path(), PathBuf::from("/var/lib/invoices/book-2024.json"));
    }

    #[test]
    fn test_rejects_keys_that_escape_the_directory() {
        for key in ["", "../invoices", "a/b", "inv oices"] {
            let result = JsonFileInvoiceStorage::new("data", key);
            assert!(matches!(result, Err(StorageError::InvalidKey(_))), "key {:?}", key);
        }
    }
}
