//! Status derivation
//!
//! Status is a pure function of the payment date, the due date and today.
//! It is never settable on its own; [`Invoice::with_recomputed_status`] is
//! the one transform applied at every read and write boundary.

use chrono::NaiveDate;

use crate::invoice::{Invoice, InvoiceStatus};

/// Resolves an invoice's status from its dates
///
/// A recorded payment always means `Paid`, even when it came after the due
/// date. Otherwise the invoice is `Overdue` once its due date is strictly
/// before today and `Pending` until then, so an invoice due today is still
/// pending.
pub fn resolve_status(
    payment_date: Option<NaiveDate>,
    due_date: NaiveDate,
    today: NaiveDate,
) -> InvoiceStatus {
    if payment_date.is_some() {
        return InvoiceStatus::Paid;
    }

    if due_date < today {
        InvoiceStatus::Overdue
    } else {
        InvoiceStatus::Pending
    }
}

impl Invoice {
    /// Returns the invoice with its status recomputed for `today`
    pub fn with_recomputed_status(mut self, today: NaiveDate) -> Self {
        self.refresh_status(today);
        self
    }

    /// Recomputes the status in place, returning true if it changed
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        let status = resolve_status(self.payment_date, self.due_date, today);
        let changed = status != self.status;
        self.status = status;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_paid_wins_over_past_due_date() {
        let status = resolve_status(Some(date(2024, 3, 1)), date(2024, 1, 31), date(2024, 6, 1));
        assert_eq!(status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_due_today_is_pending() {
        let status = resolve_status(None, date(2024, 1, 31), date(2024, 1, 31));
        assert_eq!(status, InvoiceStatus::Pending);
    }

    #[test]
    fn test_due_yesterday_is_overdue() {
        let status = resolve_status(None, date(2024, 1, 31), date(2024, 2, 1));
        assert_eq!(status, InvoiceStatus::Overdue);
    }
}
