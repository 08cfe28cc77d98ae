//! Invoice store
//!
//! The store owns the invoice collection for one book. It is the only writer:
//! it admits new invoices, records payments and persists the whole
//! collection through the [`InvoiceStorage`] port after every change.
//!
//! Reads hand out copies with status recomputed for the clock's "today",
//! read once per operation. Persisted status is never trusted.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use validator::Validate;

use core_kernel::{Clock, Currency, InvoiceId};

use crate::error::BillingError;
use crate::invoice::{Invoice, NewInvoice};
use crate::metrics::{InvoiceMetrics, MetricsAggregator};
use crate::ports::InvoiceStorage;
use crate::query::{paginate, InvoiceQuery, Page};
use crate::sample::generate_sample_invoices;

/// Store shared between callers and the background refresh task
///
/// The mutex serializes writers.
pub type SharedInvoiceStore = Arc<Mutex<InvoiceStore>>;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Currency the book is kept in
    pub currency: Currency,
    /// Seed sample invoices when storage is empty
    pub seed_samples: bool,
    /// Number of sample invoices to seed
    pub sample_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: Currency::INR,
            seed_samples: true,
            sample_count: 150,
        }
    }
}

/// The owned invoice collection
pub struct InvoiceStore {
    storage: Arc<dyn InvoiceStorage>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    invoices: Vec<Invoice>,
}

impl std::fmt::Debug for InvoiceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceStore")
            .field("config", &self.config)
            .field("invoices", &self.invoices.len())
            .finish()
    }
}

impl InvoiceStore {
    /// Opens the store, loading the persisted collection
    ///
    /// When storage holds nothing yet, sample invoices are seeded (if
    /// enabled) and persisted. When the stored document cannot be decoded
    /// the failure is logged and the store falls back to sample data; the
    /// unreadable document stays in place until the first mutation.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the backing store cannot be read at all, or if
    /// seeding an empty store fails to persist.
    pub fn open(
        storage: Arc<dyn InvoiceStorage>,
        clock: Arc<dyn Clock>,
        config: StoreConfig,
    ) -> Result<Self, BillingError> {
        let today = clock.today();

        let invoices = match storage.load() {
            Ok(Some(invoices)) => {
                info!(count = invoices.len(), "Loaded invoices from storage");
                invoices
            }
            Ok(None) => {
                let seeded = seed(&config, today);
                if !seeded.is_empty() {
                    storage.save(&seeded)?;
                    info!(count = seeded.len(), "Seeded empty storage with sample invoices");
                }
                seeded
            }
            Err(err) if err.is_corrupt_data() => {
                error!(error = %err, "Stored invoices are unreadable, falling back to sample data");
                seed(&config, today)
            }
            Err(err) => return Err(err.into()),
        };

        let mut store = Self {
            storage,
            clock,
            config,
            invoices,
        };
        let changed = store.recompute(today);
        debug!(changed, today = %today, "Recomputed statuses on open");

        Ok(store)
    }

    /// Returns the currency the book is kept in
    pub fn currency(&self) -> Currency {
        self.config.currency
    }

    /// Reads "today" from the store's clock
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Number of invoices in the book
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    /// Returns true if the book has no invoices
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    /// Admits a new invoice
    ///
    /// Assigns the next identifier after the highest existing sequence and
    /// projects the due date from the payment terms.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a blank customer name or a non-positive
    /// amount, `Storage` if the collection cannot be persisted (the invoice
    /// is then not added).
    pub fn add(&mut self, new: NewInvoice) -> Result<Invoice, BillingError> {
        new.validate()?;

        let today = self.clock.today();
        let id = InvoiceId::next_after(self.invoices.iter().map(|invoice| &invoice.id));
        let invoice = Invoice::issue(id, new, today);

        self.invoices.push(invoice.clone());
        if let Err(err) = self.persist() {
            self.invoices.pop();
            return Err(err);
        }

        info!(
            invoice_id = %invoice.id,
            amount = %invoice.amount,
            due_date = %invoice.due_date,
            "Invoice added"
        );
        Ok(invoice)
    }

    /// Records a payment date on an invoice
    ///
    /// # Errors
    ///
    /// Returns `InvoiceNotFound` for an unknown id, `InvalidOperation` if the
    /// invoice is already paid, `Storage` if the change cannot be persisted
    /// (the payment is then not recorded).
    pub fn mark_paid(&mut self, id: &InvoiceId, payment_date: NaiveDate) -> Result<Invoice, BillingError> {
        let today = self.clock.today();
        let position = self
            .invoices
            .iter()
            .position(|invoice| &invoice.id == id)
            .ok_or_else(|| BillingError::InvoiceNotFound(id.to_string()))?;

        let previous = self.invoices[position].clone();
        self.invoices[position].mark_paid(payment_date, today)?;

        if let Err(err) = self.persist() {
            self.invoices[position] = previous;
            return Err(err);
        }

        let invoice = self.invoices[position].clone();
        info!(
            invoice_id = %invoice.id,
            payment_date = %payment_date,
            delay_days = invoice.payment_delay().unwrap_or_default(),
            "Invoice marked paid"
        );
        Ok(invoice)
    }

    /// Returns one invoice with its status recomputed for today
    pub fn get(&self, id: &InvoiceId) -> Option<Invoice> {
        let today = self.clock.today();
        self.invoices
            .iter()
            .find(|invoice| &invoice.id == id)
            .map(|invoice| invoice.clone().with_recomputed_status(today))
    }

    /// Returns every invoice with status recomputed for today
    pub fn list(&self) -> Vec<Invoice> {
        self.list_at(self.clock.today())
    }

    /// Returns the invoices matching the query, ordered
    pub fn query(&self, query: &InvoiceQuery) -> Vec<Invoice> {
        query.apply(&self.list())
    }

    /// Returns one page of the invoices matching the query
    pub fn page(&self, query: &InvoiceQuery, page: usize, per_page: usize) -> Page<Invoice> {
        self.page_at(query, page, per_page, self.clock.today())
    }

    /// Returns one page of the matching invoices with statuses as of `today`
    pub fn page_at(&self, query: &InvoiceQuery, page: usize, per_page: usize, today: NaiveDate) -> Page<Invoice> {
        paginate(&query.apply(&self.list_at(today)), page, per_page)
    }

    /// Computes summary metrics for the invoices the query displays
    pub fn metrics(&self, query: &InvoiceQuery) -> InvoiceMetrics {
        self.metrics_at(query, self.clock.today())
    }

    /// Computes summary metrics as of `today`
    ///
    /// The displayed set and the full book are evaluated against the same
    /// date. Callers rendering several views of one snapshot read the clock
    /// once and pass the date to each.
    pub fn metrics_at(&self, query: &InvoiceQuery, today: NaiveDate) -> InvoiceMetrics {
        let all = self.list_at(today);
        let displayed = query.apply(&all);
        MetricsAggregator::new(self.config.currency).compute(&displayed, &all, today)
    }

    /// Recomputes every stored status, persisting if any changed
    ///
    /// The new statuses are committed only once they are saved, so a failed
    /// save leaves the transition pending for the next pass.
    ///
    /// Returns the number of invoices whose status changed.
    pub fn refresh_statuses(&mut self) -> Result<usize, BillingError> {
        let today = self.clock.today();
        let mut refreshed = self.invoices.clone();
        let changed = refreshed
            .iter_mut()
            .map(|invoice| invoice.refresh_status(today))
            .filter(|changed| *changed)
            .count();

        if changed == 0 {
            debug!(today = %today, "Invoice statuses unchanged");
            return Ok(0);
        }

        self.save(&refreshed)?;
        self.invoices = refreshed;
        info!(changed, today = %today, "Invoice statuses refreshed");
        Ok(changed)
    }

    /// Persists the collection one last time and releases the store
    pub fn close(self) -> Result<(), BillingError> {
        self.persist()?;
        info!(count = self.invoices.len(), "Invoice store closed");
        Ok(())
    }

    /// Wraps the store for sharing with background tasks
    pub fn into_shared(self) -> SharedInvoiceStore {
        Arc::new(Mutex::new(self))
    }

    fn list_at(&self, today: NaiveDate) -> Vec<Invoice> {
        self.invoices
            .iter()
            .cloned()
            .map(|invoice| invoice.with_recomputed_status(today))
            .collect()
    }

    fn recompute(&mut self, today: NaiveDate) -> usize {
        self.invoices
            .iter_mut()
            .map(|invoice| invoice.refresh_status(today))
            .filter(|changed| *changed)
            .count()
    }

    fn persist(&self) -> Result<(), BillingError> {
        self.save(&self.invoices)
    }

    fn save(&self, invoices: &[Invoice]) -> Result<(), BillingError> {
        self.storage.save(invoices).map_err(|err| {
            warn!(error = %err, "Failed to persist invoices");
            BillingError::from(err)
        })
    }
}

fn seed(config: &StoreConfig, today: NaiveDate) -> Vec<Invoice> {
    if !config.seed_samples {
        return Vec::new();
    }
    generate_sample_invoices(today, config.sample_count, &mut rand::thread_rng())
}
