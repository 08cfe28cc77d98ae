//! Sample invoices for a first run
//!
//! A fresh book is seeded with a spread of invoices raised over the last
//! quarter: roughly 40% paid (some early, some late), the rest open and, for
//! older ones, overdue.

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

use core_kernel::InvoiceId;

use crate::dates::project_due_date;
use crate::invoice::{Invoice, PaymentTerms};
use crate::status::resolve_status;

/// Padding used for seeded identifiers
pub const SAMPLE_ID_WIDTH: usize = 4;

const NAMED_CUSTOMERS: [&str; 10] = [
    "Acme Manufacturing Ltd",
    "Tech Solutions Inc",
    "Global Trading Co",
    "Sunrise Industries",
    "Delta Services",
    "Prime Logistics",
    "Innovation Labs",
    "Mega Corp",
    "Startup Hub",
    "Business Partners Ltd",
];

const CUSTOMER_PREFIXES: [&str; 30] = [
    "Acme", "Tech", "Global", "Sunrise", "Delta", "Prime", "Innovation", "Mega", "Startup",
    "Business", "Elite", "Pro", "Star", "Royal", "Premium", "Ultra", "Super", "Apex", "Nexus",
    "Vector", "Quantum", "Alpha", "Beta", "Gamma", "Sigma", "Omega", "Zenith", "Phoenix", "Titan",
    "Orion",
];

const CUSTOMER_SUFFIXES: [&str; 20] = [
    "Manufacturing Ltd", "Solutions Inc", "Trading Co", "Industries", "Services", "Logistics",
    "Labs", "Corp", "Hub", "Partners Ltd", "Group", "Enterprises", "Holdings", "Systems",
    "Technologies", "International", "Global", "Worldwide", "Dynamics", "Ventures",
];

/// Share of seeded invoices that carry a payment date
const PAID_SHARE: f64 = 0.4;

/// Generates `count` sample invoices relative to `today`
///
/// Invoice dates fall up to 89 days back. Paid invoices settle between five
/// days before and nine days after their due date, never later than today.
pub fn generate_sample_invoices<R: Rng + ?Sized>(
    today: NaiveDate,
    count: usize,
    rng: &mut R,
) -> Vec<Invoice> {
    (0..count)
        .map(|index| {
            let sequence = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let invoice_date = today
                .checked_sub_days(Days::new(rng.gen_range(0..90)))
                .unwrap_or(today);
            let payment_terms = *PaymentTerms::ALL
                .choose(rng)
                .unwrap_or(&PaymentTerms::Net30);
            let due_date = project_due_date(invoice_date, payment_terms);

            let payment_date = if rng.gen_bool(PAID_SHARE) {
                let offset: i64 = rng.gen_range(-5..10);
                let paid_on = due_date
                    .checked_add_signed(chrono::Duration::days(offset))
                    .unwrap_or(due_date);
                Some(paid_on.min(today))
            } else {
                None
            };

            Invoice {
                id: InvoiceId::with_width(sequence, SAMPLE_ID_WIDTH),
                customer_name: customer_name(index, rng),
                amount: Decimal::from(rng.gen_range(10_000u32..110_000)),
                invoice_date,
                payment_terms,
                due_date,
                payment_date,
                status: resolve_status(payment_date, due_date, today),
            }
        })
        .collect()
}

fn customer_name<R: Rng + ?Sized>(index: usize, rng: &mut R) -> String {
    if let Some(name) = NAMED_CUSTOMERS.get(index) {
        return (*name).to_string();
    }

    let prefix = CUSTOMER_PREFIXES.choose(rng).copied().unwrap_or("Acme");
    let suffix = CUSTOMER_SUFFIXES.choose(rng).copied().unwrap_or("Corp");
    format!("{} {}", prefix, suffix)
}
