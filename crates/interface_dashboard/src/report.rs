//! Plain-text dashboard report
//!
//! Renders the four summary cards and one page of the invoice list the way
//! the dashboard shows them.

use std::fmt::Write;

use chrono::NaiveDate;

use core_kernel::Currency;
use domain_billing::{DayDescription, DayKind, Invoice, InvoiceMetrics, Page};

/// One summary card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: &'static str,
}

/// Builds the summary cards for a metrics snapshot
pub fn summary_cards(metrics: &InvoiceMetrics) -> [SummaryCard; 4] {
    [
        SummaryCard {
            title: "Total Outstanding",
            value: metrics.total_outstanding.round_to_currency().to_string(),
            subtitle: "Pending + Overdue",
        },
        SummaryCard {
            title: "Total Overdue",
            value: metrics.total_overdue.round_to_currency().to_string(),
            subtitle: "Past due date",
        },
        SummaryCard {
            title: "Total Paid (This Month)",
            value: metrics.total_paid_this_month.round_to_currency().to_string(),
            subtitle: "Paid in current month",
        },
        SummaryCard {
            title: "Average Payment Delay",
            value: format!("{} days", metrics.average_payment_delay),
            subtitle: "For paid invoices",
        },
    ]
}

/// Human-readable form of a day description
pub fn describe(description: DayDescription) -> String {
    let count = description.count;
    match description.kind {
        DayKind::Early => format!("Paid {} days early", count),
        DayKind::OnTime => "Paid on time".to_string(),
        DayKind::Late => format!("Paid {} days late", count),
        DayKind::Overdue => format!("Overdue by {} days", count),
        DayKind::Due => format!("Due in {} days", count),
    }
}

/// Renders the summary cards, one per line
pub fn render_summary(metrics: &InvoiceMetrics) -> String {
    let mut out = String::new();
    for card in summary_cards(metrics) {
        let _ = writeln!(out, "{:<24} {:>16}  ({})", card.title, card.value, card.subtitle);
    }
    out
}

/// Renders one page of invoices as a table
///
/// Amounts are shown in `currency`, the book currency.
pub fn render_page(page: &Page<Invoice>, currency: Currency, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<9} {:<28} {:>16} {:<10} {:<10} {:<8} {}",
        "ID", "Customer", "Amount", "Invoiced", "Due", "Status", "Days"
    );

    for invoice in &page.items {
        let _ = writeln!(
            out,
            "{:<9} {:<28} {:>16} {:<10} {:<10} {:<8} {}",
            invoice.id.as_str(),
            truncate(&invoice.customer_name, 28),
            invoice.amount_in(currency).round_to_currency().to_string(),
            invoice.invoice_date.to_string(),
            invoice.due_date.to_string(),
            invoice.status.as_str(),
            describe(invoice.describe_days(today)),
        );
    }

    if page.items.is_empty() {
        let _ = writeln!(out, "No invoices found");
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} invoices)",
        page.page,
        page.total_pages.max(1),
        page.total_items
    );
    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
