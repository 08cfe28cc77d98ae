//! Listing invoices
//!
//! Filtering, search, ordering and paging for the invoice list. Queries match
//! against the status carried on each invoice, so callers pass invoices that
//! were recomputed for today (as [`crate::InvoiceStore::list`] returns them).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::invoice::{Invoice, InvoiceStatus};

/// Invoices shown per page
pub const PAGE_SIZE: usize = 10;

/// Field the list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Amount,
    #[default]
    InvoiceDate,
    DueDate,
}

/// Direction of the ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Query parameters for listing invoices
///
/// The default lists everything, newest invoice date first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    /// Filter by status
    pub status: Option<InvoiceStatus>,
    /// Case-insensitive match on invoice id or customer name
    pub search: Option<String>,
    /// Ordering field
    pub sort_by: SortField,
    /// Ordering direction
    pub order: SortOrder,
}

impl InvoiceQuery {
    /// Creates a query to find by status
    pub fn by_status(status: InvoiceStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds a search term to the query
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Sets the ordering
    pub fn sorted_by(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort_by = field;
        self.order = order;
        self
    }

    /// Selects a sort field the way a column header does
    ///
    /// Picking the current field flips the direction; picking another field
    /// switches to it, descending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.order = self.order.reversed();
        } else {
            self.sort_by = field;
            self.order = SortOrder::Descending;
        }
    }

    /// Returns true if the invoice passes the status filter and search
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if self.status.is_some_and(|status| status != invoice.status) {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                invoice.id.as_str().to_lowercase().contains(&term)
                    || invoice.customer_name.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    /// Filters and orders the invoices
    ///
    /// Ordering is stable, so ties keep their book order.
    pub fn apply(&self, invoices: &[Invoice]) -> Vec<Invoice> {
        let mut selected: Vec<Invoice> = invoices
            .iter()
            .filter(|invoice| self.matches(invoice))
            .cloned()
            .collect();

        selected.sort_by(|a, b| {
            let ordering = compare_by(self.sort_by, a, b);
            match self.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });

        selected
    }
}

fn compare_by(field: SortField, a: &Invoice, b: &Invoice) -> Ordering {
    match field {
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::InvoiceDate => a.invoice_date.cmp(&b.invoice_date),
        SortField::DueDate => a.due_date.cmp(&b.due_date),
    }
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    /// Page size used
    pub per_page: usize,
    /// Items across all pages
    pub total_items: usize,
    /// Number of pages; zero for an empty listing
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Cuts one page out of `items`
///
/// Pages are 1-based. A request before the first or past the last page is
/// clamped to the nearest existing page. A zero page size is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_empty_listing() {
        let page = paginate::<u32>(&[], 3, PAGE_SIZE);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let items: Vec<u32> = (1..=23).collect();
        let page = paginate(&items, 3, PAGE_SIZE);
        assert_eq!(page.items, vec![21, 22, 23]);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_paginate_clamps_out_of_range() {
        let items: Vec<u32> = (1..=23).collect();
        assert_eq!(paginate(&items, 0, PAGE_SIZE).page, 1);
        assert_eq!(paginate(&items, 99, PAGE_SIZE).page, 3);
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = InvoiceQuery::default();
        query.toggle_sort(SortField::InvoiceDate);
        assert_eq!(query.order, SortOrder::Ascending);

        query.toggle_sort(SortField::Amount);
        assert_eq!(query.sort_by, SortField::Amount);
        assert_eq!(query.order, SortOrder::Descending);
    }
}
