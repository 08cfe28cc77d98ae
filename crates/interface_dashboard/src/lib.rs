//! Invoice Dashboard Layer
//!
//! Wires the billing domain to file storage and the system clock, and renders
//! the dashboard as plain text.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_dashboard::{config::DashboardConfig, open_store, render_dashboard};
//!
//! let config = DashboardConfig::from_env()?;
//! let store = open_store(&config)?;
//! println!("{}", render_dashboard(&store, &InvoiceQuery::default(), 1));
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod telemetry;

use std::sync::Arc;

use core_kernel::{Clock, SystemClock};
use domain_billing::{InvoiceQuery, InvoiceStore, PAGE_SIZE};

use crate::config::DashboardConfig;
use crate::error::DashboardError;

pub use report::{describe, render_page, render_summary, summary_cards, SummaryCard};
pub use telemetry::init_tracing;

/// Opens the configured file-backed store on the system clock
pub fn open_store(config: &DashboardConfig) -> Result<InvoiceStore, DashboardError> {
    open_store_with_clock(config, Arc::new(SystemClock))
}

/// Opens the configured file-backed store on the given clock
pub fn open_store_with_clock(
    config: &DashboardConfig,
    clock: Arc<dyn Clock>,
) -> Result<InvoiceStore, DashboardError> {
    let storage = config.storage()?;
    tracing::info!(path = %storage.path().display(), "Opening invoice store");

    let store = InvoiceStore::open(Arc::new(storage), clock, config.store_config()?)?;
    Ok(store)
}

/// Renders the summary cards and one page of the query's listing
///
/// Cards reflect the same filtered set the page is cut from. The clock is
/// read once, so cards and rows always describe the same day.
pub fn render_dashboard(store: &InvoiceStore, query: &InvoiceQuery, page: usize) -> String {
    let today = store.today();
    let metrics = store.metrics_at(query, today);
    let listing = store.page_at(query, page, PAGE_SIZE, today);

    format!(
        "{}\n{}",
        render_summary(&metrics),
        render_page(&listing, store.currency(), today)
    )
}
