//! Summary metrics
//!
//! The dashboard summary folds two collections: the invoices currently on
//! display (after filtering and search) and the whole book. Outstanding and
//! overdue totals follow the display; paid-this-month and the average payment
//! delay always describe the whole book.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use core_kernel::{same_month, Currency, Money};

use crate::invoice::{Invoice, InvoiceStatus};
use crate::status::resolve_status;

/// Aggregate figures for the summary view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMetrics {
    /// Pending plus overdue amounts in the displayed set
    pub total_outstanding: Money,
    /// Overdue amounts in the displayed set
    pub total_overdue: Money,
    /// Amounts paid in today's calendar month, across the whole book
    pub total_paid_this_month: Money,
    /// Mean signed payment delay in days, across the whole book
    pub average_payment_delay: i64,
}

impl InvoiceMetrics {
    /// Metrics of an empty book
    pub fn zero(currency: Currency) -> Self {
        Self {
            total_outstanding: Money::zero(currency),
            total_overdue: Money::zero(currency),
            total_paid_this_month: Money::zero(currency),
            average_payment_delay: 0,
        }
    }
}

/// Computes [`InvoiceMetrics`] in a fixed currency
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator {
    currency: Currency,
}

impl MetricsAggregator {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Folds the displayed and full invoice sets into summary metrics
    ///
    /// Status is re-resolved against `today` for every invoice, so a status
    /// that went stale since the caller last looked cannot skew a total.
    ///
    /// # Arguments
    ///
    /// * `displayed` - Invoices currently shown (filtered/searched)
    /// * `all` - Every invoice in the book
    /// * `today` - Reference date, read once by the caller
    pub fn compute(&self, displayed: &[Invoice], all: &[Invoice], today: NaiveDate) -> InvoiceMetrics {
        let mut metrics = InvoiceMetrics::zero(self.currency);

        for invoice in displayed {
            let status = resolve_status(invoice.payment_date, invoice.due_date, today);
            if status.is_outstanding() {
                metrics.total_outstanding = metrics.total_outstanding.plus(invoice.amount);
            }
            if status == InvoiceStatus::Overdue {
                metrics.total_overdue = metrics.total_overdue.plus(invoice.amount);
            }
        }

        metrics.total_paid_this_month = all
            .iter()
            .filter(|invoice| {
                invoice
                    .payment_date
                    .is_some_and(|paid_on| same_month(paid_on, today))
            })
            .fold(Money::zero(self.currency), |acc, invoice| acc.plus(invoice.amount));

        metrics.average_payment_delay = average_payment_delay(all);

        metrics
    }
}

/// Mean signed payment delay over every paid invoice
///
/// Early payments count negative. The mean is rounded half away from zero,
/// so a mean of -2.5 days reports as -3. Returns 0 when nothing is paid.
pub fn average_payment_delay(invoices: &[Invoice]) -> i64 {
    let (sum, count) = invoices
        .iter()
        .filter_map(Invoice::payment_delay)
        .fold((0i64, 0i64), |(sum, count), delay| (sum + delay, count + 1));

    if count == 0 {
        return 0;
    }

    (Decimal::from(sum) / Decimal::from(count))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::PaymentTerms;
    use core_kernel::InvoiceId;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn invoice(seq: u32, amount: Decimal, due: NaiveDate, paid: Option<NaiveDate>) -> Invoice {
        Invoice {
            id: InvoiceId::from_sequence(seq),
            customer_name: format!("Customer {}", seq),
            amount,
            invoice_date: due - chrono::Days::new(30),
            payment_terms: PaymentTerms::Net30,
            due_date: due,
            payment_date: paid,
            status: InvoiceStatus::Pending,
        }
    }

    #[test]
    fn test_empty_book_has_zero_metrics() {
        let metrics = MetricsAggregator::new(Currency::INR).compute(&[], &[], date(2024, 2, 5));
        assert_eq!(metrics, InvoiceMetrics::zero(Currency::INR));
    }

    #[test]
    fn test_stale_status_is_ignored() {
        // Stored as pending but due before today.
        let stale = invoice(1, dec!(700), date(2024, 1, 31), None);
        let all = vec![stale];

        let metrics = MetricsAggregator::new(Currency::INR).compute(&all, &all, date(2024, 2, 5));
        assert_eq!(metrics.total_overdue.amount(), dec!(700));
        assert_eq!(metrics.total_outstanding.amount(), dec!(700));
    }

    #[test]
    fn test_average_delay_rounds_half_away_from_zero() {
        let due = date(2024, 1, 31);
        let all = vec![
            invoice(1, dec!(100), due, Some(date(2024, 1, 26))),
            invoice(2, dec!(100), due, Some(due)),
        ];
        assert_eq!(average_payment_delay(&all), -3);
    }
}
