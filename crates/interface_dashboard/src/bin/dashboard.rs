//! Invoice Tracker - Dashboard Binary
//!
//! Opens the invoice book, prints the summary cards and the first page of
//! invoices, then keeps statuses fresh in the background until shutdown.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin invoice-dashboard
//!
//! # Run with environment variables
//! INVOICE_DATA_DIR=/var/lib/invoices INVOICE_REFRESH_INTERVAL_SECS=600 cargo run --bin invoice-dashboard
//! ```
//!
//! # Environment Variables
//!
//! * `INVOICE_DATA_DIR` - Directory holding the invoice document (default: ./data)
//! * `INVOICE_STORAGE_KEY` - Document name without extension (default: invoices)
//! * `INVOICE_CURRENCY` - Book currency code (default: INR)
//! * `INVOICE_REFRESH_INTERVAL_SECS` - Seconds between status refreshes, 0 to disable (default: 3600)
//! * `INVOICE_SEED_SAMPLES` - Seed sample invoices into empty storage (default: true)
//! * `INVOICE_SAMPLE_COUNT` - Number of sample invoices (default: 150)
//! * `INVOICE_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `INVOICE_LOG_JSON` - Emit JSON log lines (default: false)

use std::sync::Arc;

use anyhow::Context;
use domain_billing::{InvoiceQuery, InvoiceStore, StatusRefresher};
use interface_dashboard::config::DashboardConfig;
use interface_dashboard::{init_tracing, open_store, render_dashboard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let (config, config_error) = load_config();

    init_tracing(&config.log_level, config.log_json).context("failed to install tracing subscriber")?;

    if let Some(err) = config_error {
        tracing::warn!(error = %err, "Invalid configuration in environment, using defaults");
    }

    tracing::info!(
        data_dir = %config.data_dir.display(),
        storage_key = %config.storage_key,
        currency = %config.currency,
        "Starting invoice dashboard"
    );

    let store = open_store(&config).context("failed to open invoice store")?;
    println!("{}", render_dashboard(&store, &InvoiceQuery::default(), 1));
    log_metrics(&store);

    let store = store.into_shared();
    let refresher = config
        .refresh_interval()
        .map(|period| StatusRefresher::new(store.clone(), period).start());

    shutdown_signal().await;

    if let Some(handle) = refresher {
        handle.stop().await;
    }

    let store = Arc::try_unwrap(store)
        .map_err(|_| anyhow::anyhow!("invoice store still in use at shutdown"))?
        .into_inner();
    log_metrics(&store);
    store.close().context("failed to persist invoices on shutdown")?;

    tracing::info!("Invoice dashboard stopped");
    Ok(())
}

/// Loads configuration from the environment, falling back to defaults
///
/// The load error, if any, is handed back so it can be logged once tracing
/// is installed.
fn load_config() -> (DashboardConfig, Option<config::ConfigError>) {
    match DashboardConfig::from_env() {
        Ok(config) => (config, None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    }
}

fn log_metrics(store: &InvoiceStore) {
    let metrics = store.metrics(&InvoiceQuery::default());
    tracing::info!(
        invoices = store.len(),
        total_outstanding = %metrics.total_outstanding,
        total_overdue = %metrics.total_overdue,
        total_paid_this_month = %metrics.total_paid_this_month,
        average_payment_delay = metrics.average_payment_delay,
        "Invoice summary"
    );
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down");
        }
    }
}
