//! Calendar-date handling
//!
//! Everything downstream works on `NaiveDate` values: a timestamp is reduced
//! to its local calendar day before it takes part in any day arithmetic, so
//! time-of-day can never shift a day count.
//!
//! "Today" is obtained from a [`Clock`] and read once per logical operation.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use std::sync::RwLock;

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    /// Returns today's date in the local calendar
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        calendar_day(&Local::now())
    }
}

/// Clock pinned to a settable date
///
/// Used by tests and by replays that need a reproducible "today".
#[derive(Debug)]
pub struct FixedClock {
    today: RwLock<NaiveDate>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: RwLock::new(today),
        }
    }

    /// Moves the clock to another date
    pub fn set(&self, today: NaiveDate) {
        match self.today.write() {
            Ok(mut guard) => *guard = today,
            Err(poisoned) => *poisoned.into_inner() = today,
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        match self.today.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Strips the time of day from an instant, keeping its calendar date in the
/// instant's own timezone
pub fn calendar_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Returns true when both dates fall in the same calendar month of the same year
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
