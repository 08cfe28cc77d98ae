//! Billing Domain - Invoice Status and Metrics Engine
//!
//! This crate derives everything the invoice dashboard shows from the dates
//! recorded on each invoice. Nothing derived is trusted as stored truth:
//! status is recomputed at every load, mutation, refresh tick and read.
//!
//! # Components
//!
//! - **Status**: `paid` when a payment date exists, otherwise `overdue` once
//!   the due date is behind today, otherwise `pending`
//! - **Dates**: due-date projection from payment terms and signed day deltas
//!   (early/late/on-time for paid invoices, overdue-by/due-in for open ones)
//! - **Metrics**: outstanding and overdue totals over the displayed set,
//!   paid-this-month and average payment delay over the whole book
//! - **Store**: the owned invoice collection behind a storage port, plus a
//!   cancelable background refresh
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{InvoiceStore, NewInvoice, PaymentTerms, InvoiceQuery};
//!
//! let mut store = InvoiceStore::open(storage, clock, StoreConfig::default())?;
//!
//! let invoice = store.add(NewInvoice::new(
//!     "Acme Manufacturing Ltd",
//!     dec!(25000),
//!     invoice_date,
//!     PaymentTerms::Net30,
//! ))?;
//!
//! store.mark_paid(&invoice.id, payment_date)?;
//! let metrics = store.metrics(&InvoiceQuery::default());
//! ```

pub mod invoice;
pub mod status;
pub mod dates;
pub mod metrics;
pub mod query;
pub mod ports;
pub mod store;
pub mod refresh;
pub mod sample;
pub mod error;

pub use invoice::{Invoice, InvoiceStatus, NewInvoice, PaymentTerms};
pub use status::resolve_status;
pub use dates::{day_delta, describe_days, project_due_date, DayDescription, DayKind};
pub use metrics::{average_payment_delay, InvoiceMetrics, MetricsAggregator};
pub use query::{paginate, InvoiceQuery, Page, SortField, SortOrder, PAGE_SIZE};
pub use ports::{InMemoryInvoiceStorage, InvoiceStorage};
pub use store::{InvoiceStore, SharedInvoiceStore, StoreConfig};
pub use refresh::{RefreshHandle, StatusRefresher, DEFAULT_REFRESH_INTERVAL};
pub use sample::generate_sample_invoices;
pub use error::BillingError;
