//! Due-date arithmetic
//!
//! All arithmetic here is on calendar dates. Timestamps are reduced with
//! `core_kernel::calendar_day` before they reach these functions, which keeps
//! day counts free of time-of-day and DST drift: two dates a whole number of
//! days apart always produce exactly that number.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::invoice::PaymentTerms;

/// Where an invoice stands relative to its due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    /// Paid before the due date
    Early,
    /// Paid on the due date
    OnTime,
    /// Paid after the due date
    Late,
    /// Unpaid and past the due date
    Overdue,
    /// Unpaid; `count` days remain
    Due,
}

/// A day count paired with what it measures
///
/// `count` is never negative; the sign lives in `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayDescription {
    pub kind: DayKind,
    pub count: u64,
}

impl DayDescription {
    pub fn new(kind: DayKind, count: u64) -> Self {
        Self { kind, count }
    }
}

/// Projects the due date `terms` calendar days after the invoice date
///
/// Saturates at the last representable date instead of overflowing.
pub fn project_due_date(invoice_date: NaiveDate, terms: PaymentTerms) -> NaiveDate {
    invoice_date
        .checked_add_days(Days::new(u64::from(terms.days())))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole calendar days from `b` to `a`
///
/// Positive when `a` is later than `b`. Calendar dates differ by whole days,
/// so the ceiling of the day difference is the difference itself.
pub fn day_delta(a: NaiveDate, b: NaiveDate) -> i64 {
    a.signed_duration_since(b).num_days()
}

/// Describes an invoice's due-date position
///
/// With a payment date the description compares payment against due date:
/// paying on the due date is `OnTime` with a count of zero. Without one it
/// compares the due date against today: `Overdue` by the days elapsed, or
/// `Due` in the days remaining (zero on the due date itself).
pub fn describe_days(
    due_date: NaiveDate,
    payment_date: Option<NaiveDate>,
    today: NaiveDate,
) -> DayDescription {
    match payment_date {
        Some(paid_on) => {
            let delta = day_delta(paid_on, due_date);
            let kind = match delta {
                0 => DayKind::OnTime,
                d if d < 0 => DayKind::Early,
                _ => DayKind::Late,
            };
            DayDescription::new(kind, delta.unsigned_abs())
        }
        None => {
            let delta = day_delta(due_date, today);
            if delta < 0 {
                DayDescription::new(DayKind::Overdue, delta.unsigned_abs())
            } else {
                DayDescription::new(DayKind::Due, delta.unsigned_abs())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_projection_crosses_month_end() {
        assert_eq!(project_due_date(date(2024, 1, 1), PaymentTerms::Net30), date(2024, 1, 31));
        assert_eq!(project_due_date(date(2024, 1, 20), PaymentTerms::Net15), date(2024, 2, 4));
    }

    #[test]
    fn test_projection_counts_leap_day() {
        assert_eq!(project_due_date(date(2024, 2, 25), PaymentTerms::Net7), date(2024, 3, 3));
        assert_eq!(project_due_date(date(2023, 2, 25), PaymentTerms::Net7), date(2023, 3, 4));
    }

    #[test]
    fn test_projection_saturates() {
        assert_eq!(project_due_date(NaiveDate::MAX, PaymentTerms::Net60), NaiveDate::MAX);
    }

    #[test]
    fn test_payment_on_due_date_is_on_time() {
        let due = date(2024, 1, 31);
        assert_eq!(describe_days(due, Some(due), date(2024, 5, 1)), DayDescription::new(DayKind::OnTime, 0));
    }

    #[test]
    fn test_unpaid_on_due_date_is_due_in_zero() {
        let due = date(2024, 1, 31);
        assert_eq!(describe_days(due, None, due), DayDescription::new(DayKind::Due, 0));
    }
}
