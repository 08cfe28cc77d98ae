//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the invoice book. Dates are pinned so
//! that status and day counts are predictable.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_billing::{Invoice, PaymentTerms};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::builders::TestInvoiceBuilder;

/// Fixture for calendar dates used across the suite
pub struct DateFixtures;

impl DateFixtures {
    /// Invoice date of the reference invoice
    pub fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Due date of the reference invoice under 30-day terms
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    /// Two days after the due date
    pub fn late_payment() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 2).unwrap()
    }

    /// Five days before the due date
    pub fn early_payment() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()
    }

    /// "Today" for most scenarios, five days past the due date
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
    }
}

/// Fixture for amounts
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical invoice amount
    pub fn standard_amount() -> Decimal {
        dec!(25000)
    }

    /// The smallest amount admission accepts at paisa precision
    pub fn smallest_amount() -> Decimal {
        dec!(0.01)
    }

    /// Creates an INR amount
    pub fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }
}

/// Fixture for invoices in well-known states
pub struct InvoiceFixtures;

impl InvoiceFixtures {
    /// Raised on new year with 30-day terms, still open
    pub fn open() -> Invoice {
        TestInvoiceBuilder::new().build()
    }

    /// The open invoice, paid two days late
    pub fn paid_late() -> Invoice {
        TestInvoiceBuilder::new()
            .with_sequence(2)
            .paid_on(DateFixtures::late_payment())
            .build()
    }

    /// The open invoice, paid five days early
    pub fn paid_early() -> Invoice {
        TestInvoiceBuilder::new()
            .with_sequence(3)
            .paid_on(DateFixtures::early_payment())
            .build()
    }

    /// A small book mixing every status as of [`DateFixtures::today`]
    pub fn book() -> Vec<Invoice> {
        vec![
            Self::open(),
            Self::paid_late(),
            Self::paid_early(),
            TestInvoiceBuilder::new()
                .with_sequence(4)
                .with_customer("Prime Logistics")
                .with_amount(dec!(4200))
                .with_invoice_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
                .with_terms(PaymentTerms::Net15)
                .build(),
        ]
    }
}

/// Fixture for customer names
pub struct CustomerFixtures;

impl CustomerFixtures {
    /// Deterministic company names for a given seed
    pub fn names(count: usize, seed: u64) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| CompanyName().fake_with_rng(&mut rng))
            .collect()
    }
}
