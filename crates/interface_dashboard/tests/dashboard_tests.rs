//! Tests for dashboard configuration and rendering

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use core_kernel::{Clock, Currency, FixedClock};
use domain_billing::{
    paginate, InMemoryInvoiceStorage, InvoiceQuery, InvoiceStatus, InvoiceStorage, InvoiceStore,
    MetricsAggregator, StoreConfig,
};
use rust_decimal::Decimal;
use interface_dashboard::config::DashboardConfig;
use interface_dashboard::error::DashboardError;
use interface_dashboard::{open_store_with_clock, render_dashboard, render_page, summary_cards};
use rust_decimal_macros::dec;
use test_utils::{DateFixtures, InvoiceFixtures};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("interface_dashboard_{}_{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

/// Clock pinned to one day that counts how often it is read
struct CountingClock {
    today: NaiveDate,
    reads: AtomicUsize,
}

impl CountingClock {
    fn new(today: NaiveDate) -> Self {
        Self {
            today,
            reads: AtomicUsize::new(0),
        }
    }

    fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for CountingClock {
    fn today(&self) -> NaiveDate {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.today
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = DashboardConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_prefixed_variables_override_defaults() {
        let config = DashboardConfig::from_vars([
            ("INVOICE_DATA_DIR", "/var/lib/invoices"),
            ("INVOICE_STORAGE_KEY", "book"),
            ("INVOICE_CURRENCY", "usd"),
            ("INVOICE_REFRESH_INTERVAL_SECS", "600"),
            ("INVOICE_SEED_SAMPLES", "false"),
            ("INVOICE_LOG_JSON", "true"),
        ])
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/invoices"));
        assert_eq!(config.storage_key, "book");
        assert_eq!(config.refresh_interval(), Some(Duration::from_secs(600)));
        assert!(!config.seed_samples);
        assert!(config.log_json);
        assert_eq!(config.sample_count, 150);
        assert_eq!(config.store_config().unwrap().currency, Currency::USD);
    }

    #[test]
    fn test_unprefixed_variables_are_ignored() {
        let config = DashboardConfig::from_vars([("DATA_DIR", "/elsewhere")]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let result = DashboardConfig::from_vars([("INVOICE_SAMPLE_COUNT", "many")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let config = DashboardConfig {
            currency: "XYZ".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(config.store_config(), Err(DashboardError::Currency(_))));
    }

    #[test]
    fn test_bad_storage_key_is_rejected() {
        let config = DashboardConfig {
            storage_key: "../escape".to_string(),
            ..DashboardConfig::default()
        };
        let clock = Arc::new(FixedClock::new(DateFixtures::today()));

        let result = open_store_with_clock(&config, clock);
        assert!(matches!(result, Err(DashboardError::Storage(_))));
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_summary_cards() {
        let book = InvoiceFixtures::book();
        let metrics = MetricsAggregator::new(Currency::INR).compute(&book, &book, DateFixtures::today());

        let cards = summary_cards(&metrics);

        assert_eq!(cards[0].title, "Total Outstanding");
        assert_eq!(cards[0].value, "₹ 29200.00");
        assert_eq!(cards[1].value, "₹ 25000.00");
        assert_eq!(cards[2].value, "₹ 25000.00");
        assert_eq!(cards[3].value, "-2 days");
    }

    #[test]
    fn test_page_rows_describe_days() {
        let today = DateFixtures::today();
        let book: Vec<_> = InvoiceFixtures::book()
            .into_iter()
            .map(|invoice| invoice.with_recomputed_status(today))
            .collect();

        let rendered = render_page(&paginate(&book, 1, 10), Currency::INR, today);

        assert!(rendered.contains("Overdue by 5 days"));
        assert!(rendered.contains("Paid 2 days late"));
        assert!(rendered.contains("Paid 5 days early"));
        assert!(rendered.contains("Due in 11 days"));
        assert!(rendered.contains("Page 1 of 1 (4 invoices)"));
    }

    #[test]
    fn test_empty_page() {
        let rendered = render_page(&paginate(&[], 1, 10), Currency::INR, DateFixtures::today());
        assert!(rendered.contains("No invoices found"));
        assert!(rendered.contains("Page 1 of 1 (0 invoices)"));
    }
}

// ============================================================================
// Dashboard Tests
// ============================================================================

mod dashboard_tests {
    use super::*;

    #[test]
    fn test_dashboard_over_file_store() {
        let dir = scratch_dir("render");
        let config = DashboardConfig {
            data_dir: dir.clone(),
            seed_samples: false,
            ..DashboardConfig::default()
        };
        config.storage().unwrap().save(&InvoiceFixtures::book()).unwrap();
        let clock = Arc::new(FixedClock::new(DateFixtures::today()));

        let store = open_store_with_clock(&config, clock).unwrap();
        let overdue_only = render_dashboard(&store, &InvoiceQuery::by_status(InvoiceStatus::Overdue), 1);

        assert!(overdue_only.contains("INV-001"));
        assert!(!overdue_only.contains("INV-004"));
        assert!(overdue_only.contains("Page 1 of 1 (1 invoices)"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_first_run_seeds_configured_count() {
        let dir = scratch_dir("seed");
        let config = DashboardConfig {
            data_dir: dir.clone(),
            sample_count: 12,
            ..DashboardConfig::default()
        };
        let clock = Arc::new(FixedClock::new(DateFixtures::today()));

        let store = open_store_with_clock(&config, clock).unwrap();
        let rendered = render_dashboard(&store, &InvoiceQuery::default(), 2);

        assert_eq!(store.len(), 12);
        assert!(rendered.contains("Page 2 of 2 (12 invoices)"));
        assert!(store.metrics(&InvoiceQuery::default()).total_outstanding.amount() >= Decimal::ZERO);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_render_reads_the_clock_once() {
        let storage = Arc::new(InMemoryInvoiceStorage::with_invoices(&InvoiceFixtures::book()).unwrap());
        let clock = Arc::new(CountingClock::new(DateFixtures::today()));
        let config = StoreConfig {
            seed_samples: false,
            ..StoreConfig::default()
        };
        let store = InvoiceStore::open(storage, clock.clone(), config).unwrap();
        let before = clock.reads();

        let rendered = render_dashboard(&store, &InvoiceQuery::default(), 1);

        assert_eq!(clock.reads() - before, 1);
        assert!(rendered.contains("₹ 29200.00"));
        assert!(rendered.contains("Overdue by 5 days"));
    }

    #[test]
    fn test_summary_amounts_are_exact() {
        let book = InvoiceFixtures::book();
        let metrics = MetricsAggregator::new(Currency::INR).compute(&book, &book, DateFixtures::today());

        assert_eq!(metrics.total_outstanding.amount(), dec!(29200));
        assert_eq!(metrics.total_overdue.amount(), dec!(25000));
    }
}
