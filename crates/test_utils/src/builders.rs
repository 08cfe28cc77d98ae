//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::InvoiceId;
use domain_billing::{project_due_date, resolve_status, Invoice, InvoiceStatus, NewInvoice, PaymentTerms};
use rust_decimal::Decimal;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for stored invoices
///
/// The due date is always projected from the invoice date and terms. The
/// status defaults to what the dates resolve to on the invoice date itself;
/// use [`TestInvoiceBuilder::with_stored_status`] to simulate a stale record.
pub struct TestInvoiceBuilder {
    sequence: u32,
    customer_name: String,
    amount: Decimal,
    invoice_date: NaiveDate,
    payment_terms: PaymentTerms,
    payment_date: Option<NaiveDate>,
    status: Option<InvoiceStatus>,
}

impl Default for TestInvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInvoiceBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            sequence: 1,
            customer_name: "Acme Manufacturing Ltd".to_string(),
            amount: MoneyFixtures::standard_amount(),
            invoice_date: DateFixtures::new_year(),
            payment_terms: PaymentTerms::Net30,
            payment_date: None,
            status: None,
        }
    }

    /// Sets the identifier sequence
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Sets the customer name
    pub fn with_customer(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the invoice date
    pub fn with_invoice_date(mut self, date: NaiveDate) -> Self {
        self.invoice_date = date;
        self
    }

    /// Sets the payment terms
    pub fn with_terms(mut self, terms: PaymentTerms) -> Self {
        self.payment_terms = terms;
        self
    }

    /// Records a payment date
    pub fn paid_on(mut self, date: NaiveDate) -> Self {
        self.payment_date = Some(date);
        self
    }

    /// Forces the stored status regardless of dates
    pub fn with_stored_status(mut self, status: InvoiceStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Builds the invoice
    pub fn build(self) -> Invoice {
        let due_date = project_due_date(self.invoice_date, self.payment_terms);
        let status = self
            .status
            .unwrap_or_else(|| resolve_status(self.payment_date, due_date, self.invoice_date));

        Invoice {
            id: InvoiceId::from_sequence(self.sequence),
            customer_name: self.customer_name,
            amount: self.amount,
            invoice_date: self.invoice_date,
            payment_terms: self.payment_terms,
            due_date,
            payment_date: self.payment_date,
            status,
        }
    }

    /// Builds the admission input for the same data
    pub fn build_new(self) -> NewInvoice {
        NewInvoice::new(self.customer_name, self.amount, self.invoice_date, self.payment_terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_projects_due_date() {
        let invoice = TestInvoiceBuilder::new()
            .with_terms(PaymentTerms::Net45)
            .build();

        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(invoice.id.as_str(), "INV-001");
        assert_eq!(invoice.status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_stored_status_override() {
        let invoice = TestInvoiceBuilder::new()
            .with_stored_status(InvoiceStatus::Paid)
            .build();

        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert!(invoice.payment_date.is_none());
    }
}
