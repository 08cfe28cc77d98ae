//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_billing::{Invoice, InvoiceStatus};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount and currency
///
/// # Panics
///
/// Panics if the currencies differ or the amounts are not equal
pub fn assert_money_eq(actual: &Money, amount: Decimal, currency: Currency) {
    assert_eq!(
        actual.currency(),
        currency,
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        currency
    );
    assert_eq!(
        actual.amount(),
        amount,
        "Money amounts differ: actual={}, expected={}",
        actual.amount(),
        amount
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts the status an invoice resolves to on `today`
///
/// The stored status is ignored; this checks what a reader would see.
pub fn assert_status(invoice: &Invoice, today: NaiveDate, expected: InvoiceStatus) {
    let actual = invoice.clone().with_recomputed_status(today).status;
    assert_eq!(
        actual, expected,
        "Invoice {} on {}: expected {}, got {} (due {}, paid {:?})",
        invoice.id, today, expected, actual, invoice.due_date, invoice.payment_date
    );
}

/// Asserts that every invoice's stored status matches its dates on `today`
pub fn assert_statuses_current(invoices: &[Invoice], today: NaiveDate) {
    for invoice in invoices {
        assert_status(invoice, today, invoice.status);
    }
}
