//! Invoice records
//!
//! An invoice is created once with its terms and projected due date. The only
//! later mutation is recording a payment date; status is a projection of the
//! dates and is recomputed whenever it is observed.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use core_kernel::{Currency, InvoiceId, Money};

use crate::dates::{day_delta, describe_days, project_due_date, DayDescription};
use crate::error::BillingError;
use crate::status::resolve_status;

/// Invoice status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Unpaid and not yet past its due date
    #[default]
    Pending,
    /// Unpaid and past its due date
    Overdue,
    /// A payment date has been recorded
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Paid => "paid",
        }
    }

    /// Returns true for statuses that still count towards the outstanding total
    pub fn is_outstanding(&self) -> bool {
        matches!(self, InvoiceStatus::Pending | InvoiceStatus::Overdue)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment terms offered when an invoice is raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PaymentTerms {
    Net7,
    Net15,
    #[default]
    Net30,
    Net45,
    Net60,
}

impl PaymentTerms {
    /// Every supported term, shortest first
    pub const ALL: [PaymentTerms; 5] = [
        PaymentTerms::Net7,
        PaymentTerms::Net15,
        PaymentTerms::Net30,
        PaymentTerms::Net45,
        PaymentTerms::Net60,
    ];

    /// Number of calendar days between invoice date and due date
    pub fn days(&self) -> u32 {
        match self {
            PaymentTerms::Net7 => 7,
            PaymentTerms::Net15 => 15,
            PaymentTerms::Net30 => 30,
            PaymentTerms::Net45 => 45,
            PaymentTerms::Net60 => 60,
        }
    }
}

impl TryFrom<u32> for PaymentTerms {
    type Error = BillingError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        PaymentTerms::ALL
            .into_iter()
            .find(|terms| terms.days() == days)
            .ok_or(BillingError::InvalidPaymentTerms(days))
    }
}

impl From<PaymentTerms> for u32 {
    fn from(terms: PaymentTerms) -> u32 {
        terms.days()
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.days())
    }
}

/// Raw fields for an invoice that has not been admitted yet
#[derive(Debug, Clone, Validate)]
pub struct NewInvoice {
    /// Customer being billed
    #[validate(custom(function = "validate_customer_name"))]
    pub customer_name: String,
    /// Amount in the store's currency
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
    /// Date the invoice was raised
    pub invoice_date: NaiveDate,
    /// Payment terms
    pub payment_terms: PaymentTerms,
}

impl NewInvoice {
    pub fn new(
        customer_name: impl Into<String>,
        amount: Decimal,
        invoice_date: NaiveDate,
        payment_terms: PaymentTerms,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            amount,
            invoice_date,
            payment_terms,
        }
    }
}

fn validate_customer_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut err = ValidationError::new("customer_name_required");
        err.message = Some("Customer name is required".into());
        return Err(err);
    }
    Ok(())
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        let mut err = ValidationError::new("amount_not_positive");
        err.message = Some("Amount must be a positive number".into());
        return Err(err);
    }
    Ok(())
}

/// A recorded invoice
///
/// Serializes with camelCase keys, ISO dates, bare-integer payment terms and
/// a numeric amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Identifier, e.g. `INV-0042`
    pub id: InvoiceId,
    /// Customer being billed
    pub customer_name: String,
    /// Amount in the store's currency
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Date the invoice was raised
    pub invoice_date: NaiveDate,
    /// Payment terms
    pub payment_terms: PaymentTerms,
    /// Due date, projected from invoice date and terms at creation
    pub due_date: NaiveDate,
    /// Date the payment was received
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Derived status; recomputed on every read
    #[serde(default)]
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Creates an invoice from admitted input
    ///
    /// The customer name is trimmed and the due date projected from the
    /// payment terms. Callers validate `new` first.
    pub fn issue(id: InvoiceId, new: NewInvoice, today: NaiveDate) -> Self {
        let due_date = project_due_date(new.invoice_date, new.payment_terms);

        Self {
            id,
            customer_name: new.customer_name.trim().to_string(),
            amount: new.amount,
            invoice_date: new.invoice_date,
            payment_terms: new.payment_terms,
            due_date,
            payment_date: None,
            status: resolve_status(None, due_date, today),
        }
    }

    /// Returns true if a payment date has been recorded
    pub fn is_paid(&self) -> bool {
        self.payment_date.is_some()
    }

    /// Records the payment date
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if the invoice is already paid
    pub fn mark_paid(&mut self, payment_date: NaiveDate, today: NaiveDate) -> Result<(), BillingError> {
        if let Some(paid_on) = self.payment_date {
            return Err(BillingError::InvalidOperation(format!(
                "{} was already paid on {}",
                self.id, paid_on
            )));
        }
        self.payment_date = Some(payment_date);
        self.refresh_status(today);
        Ok(())
    }

    /// Signed days between due date and payment; negative means paid early
    pub fn payment_delay(&self) -> Option<i64> {
        self.payment_date
            .map(|paid_on| day_delta(paid_on, self.due_date))
    }

    /// Describes the invoice's position relative to its due date
    pub fn describe_days(&self, today: NaiveDate) -> DayDescription {
        describe_days(self.due_date, self.payment_date, today)
    }

    /// Returns the amount as money in the given currency
    pub fn amount_in(&self, currency: Currency) -> Money {
        Money::new(self.amount, currency)
    }
}
