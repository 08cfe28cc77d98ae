//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Days, NaiveDate};
use core_kernel::InvoiceId;
use domain_billing::{project_due_date, Invoice, InvoiceStatus, PaymentTerms};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for calendar dates between 2020 and 2029
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650).prop_map(|offset| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Days::new(offset))
}

/// Strategy for the supported payment terms
pub fn terms_strategy() -> impl Strategy<Value = PaymentTerms> {
    prop_oneof![
        Just(PaymentTerms::Net7),
        Just(PaymentTerms::Net15),
        Just(PaymentTerms::Net30),
        Just(PaymentTerms::Net45),
        Just(PaymentTerms::Net60),
    ]
}

/// Strategy for positive amounts with paisa precision
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for customer names
pub fn customer_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,12}( [A-Z][a-z]{2,10}){0,2}"
}

/// Strategy for stored invoices with consistent due dates
///
/// Roughly half are paid, between ten days before and twenty days after the
/// due date. The stored status is arbitrary, as it would be in stale data.
pub fn invoice_strategy() -> impl Strategy<Value = Invoice> {
    (
        1u32..10_000,
        customer_name_strategy(),
        positive_amount_strategy(),
        date_strategy(),
        terms_strategy(),
        prop::option::of(-10i64..20),
        stored_status_strategy(),
    )
        .prop_map(|(sequence, customer_name, amount, invoice_date, payment_terms, offset, status)| {
            let due_date = project_due_date(invoice_date, payment_terms);
            let payment_date = offset.map(|days| due_date + chrono::Duration::days(days));
            Invoice {
                id: InvoiceId::from_sequence(sequence),
                customer_name,
                amount,
                invoice_date,
                payment_terms,
                due_date,
                payment_date,
                status,
            }
        })
}

/// Strategy for a book of invoices with distinct identifiers
pub fn invoice_book_strategy(max_len: usize) -> impl Strategy<Value = Vec<Invoice>> {
    prop::collection::vec(invoice_strategy(), 0..max_len).prop_map(|mut invoices| {
        for (index, invoice) in invoices.iter_mut().enumerate() {
            invoice.id = InvoiceId::from_sequence(index as u32 + 1);
        }
        invoices
    })
}

fn stored_status_strategy() -> impl Strategy<Value = InvoiceStatus> {
    prop_oneof![
        Just(InvoiceStatus::Pending),
        Just(InvoiceStatus::Overdue),
        Just(InvoiceStatus::Paid),
    ]
}
