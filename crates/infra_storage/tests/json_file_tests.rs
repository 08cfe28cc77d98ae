//! Tests for the JSON file invoice storage

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use core_kernel::FixedClock;
use domain_billing::{InvoiceQuery, InvoiceStatus, InvoiceStorage, InvoiceStore, StoreConfig};
use infra_storage::{JsonFileInvoiceStorage, StorageError, DEFAULT_STORAGE_KEY};
use rust_decimal_macros::dec;
use test_utils::{
    assert_money_eq, assert_statuses_current, DateFixtures, InvoiceFixtures, TestInvoiceBuilder,
};

/// A scratch directory removed when dropped
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("infra_storage_{}_{}", std::process::id(), name));
        let _ = fs::remove_dir_all(&dir);
        Self(dir)
    }

    fn storage(&self) -> JsonFileInvoiceStorage {
        JsonFileInvoiceStorage::new(&self.0, DEFAULT_STORAGE_KEY).unwrap()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_none() {
        let scratch = ScratchDir::new("missing");
        assert!(scratch.storage().load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let scratch = ScratchDir::new("round_trip");
        let storage = scratch.storage();
        let book = InvoiceFixtures::book();

        storage.save(&book).unwrap();

        assert!(storage.path().exists());
        assert_eq!(storage.load().unwrap(), Some(book));
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let scratch = ScratchDir::new("replace");
        let storage = scratch.storage();

        storage.save(&InvoiceFixtures::book()).unwrap();
        storage.save(&[InvoiceFixtures::open()]).unwrap();

        assert_eq!(storage.load().unwrap().map(|invoices| invoices.len()), Some(1));
        let leftovers: Vec<_> = fs::read_dir(&scratch.0).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "temporary file left behind");
    }

    #[test]
    fn test_document_uses_camel_case_records() {
        let scratch = ScratchDir::new("shape");
        let storage = scratch.storage();

        storage.save(&[InvoiceFixtures::paid_late()]).unwrap();

        let raw = fs::read_to_string(storage.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[0]["customerName"], "Acme Manufacturing Ltd");
        assert_eq!(json[0]["paymentDate"], "2024-02-02");
        assert_eq!(json[0]["paymentTerms"], 30);
    }

    #[test]
    fn test_corrupt_document_is_reported_as_corrupt() {
        let scratch = ScratchDir::new("corrupt");
        let storage = scratch.storage();
        fs::create_dir_all(&scratch.0).unwrap();
        fs::write(storage.path(), "[{\"id\": \"INV-001\"").unwrap();

        assert!(matches!(storage.read(), Err(StorageError::Decode { .. })));
        assert!(storage.load().unwrap_err().is_corrupt_data());
    }

    #[test]
    fn test_storage_key_selects_file() {
        let scratch = ScratchDir::new("keys");
        let first = JsonFileInvoiceStorage::new(&scratch.0, "first").unwrap();
        let second = JsonFileInvoiceStorage::new(&scratch.0, "second").unwrap();

        first.save(&InvoiceFixtures::book()).unwrap();

        assert!(second.load().unwrap().is_none());
    }
}

// ============================================================================
// Store Integration Tests
// ============================================================================

mod store_tests {
    use super::*;

    fn config() -> StoreConfig {
        StoreConfig {
            seed_samples: false,
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_store_changes_survive_reopen() {
        let scratch = ScratchDir::new("reopen");
        let clock = Arc::new(FixedClock::new(DateFixtures::today()));

        let mut store = InvoiceStore::open(Arc::new(scratch.storage()), clock.clone(), config()).unwrap();
        let added = store
            .add(
                TestInvoiceBuilder::new()
                    .with_customer("Sunrise Industries")
                    .with_amount(dec!(1500))
                    .build_new(),
            )
            .unwrap();
        store.mark_paid(&added.id, DateFixtures::late_payment()).unwrap();
        store.close().unwrap();

        let reopened = InvoiceStore::open(Arc::new(scratch.storage()), clock, config()).unwrap();
        let reloaded = reopened.get(&added.id).unwrap();
        assert_eq!(reloaded.customer_name, "Sunrise Industries");
        assert_eq!(reloaded.payment_date, Some(DateFixtures::late_payment()));
        assert_eq!(reloaded.status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_first_run_seeds_file() {
        let scratch = ScratchDir::new("seed");
        let clock = Arc::new(FixedClock::new(DateFixtures::today()));
        let seeded = StoreConfig {
            sample_count: 40,
            ..StoreConfig::default()
        };

        let store = InvoiceStore::open(Arc::new(scratch.storage()), clock, seeded).unwrap();

        let persisted = scratch.storage().load().unwrap().unwrap();
        assert_eq!(persisted.len(), 40);
        assert_eq!(store.len(), 40);
        assert_statuses_current(&persisted, DateFixtures::today());
    }

    #[test]
    fn test_metrics_over_file_backed_book() {
        let scratch = ScratchDir::new("metrics");
        scratch.storage().save(&InvoiceFixtures::book()).unwrap();
        let clock = Arc::new(FixedClock::new(DateFixtures::today()));

        let store = InvoiceStore::open(Arc::new(scratch.storage()), clock, config()).unwrap();
        let metrics = store.metrics(&InvoiceQuery::default());

        // open 25000 (overdue) + 4200 (pending)
        assert_money_eq(&metrics.total_outstanding, dec!(29200), store.currency());
        assert_money_eq(&metrics.total_overdue, dec!(25000), store.currency());
        // paid 2024-02-02 in February, paid 2024-01-26 in January
        assert_money_eq(&metrics.total_paid_this_month, dec!(25000), store.currency());
        // +2 and -5 average to -1.5
        assert_eq!(metrics.average_payment_delay, -2);
    }
}
