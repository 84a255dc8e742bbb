//! Read-only queries over a store snapshot
//!
//! Every function here is pure with respect to the slice it is given. A
//! month outside 1-12 (or no month at all) matches nothing.

use crate::reports::{BarChart, PieChart, Statistics};
use crate::Transaction;

/// Parameters of `/list-transactions`
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub month: Option<u32>,
    pub search_text: Option<String>,
    pub page: usize,
    pub per_page: usize,
}

impl ListQuery {
    pub fn new(month: Option<u32>, per_page: usize) -> Self {
        Self {
            month,
            search_text: None,
            page: 1,
            per_page,
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = Some(search_text.into());
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// Parse a month query value, leniently
pub fn parse_month(value: Option<&str>) -> Option<u32> {
    value
        .and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|m| (1..=12).contains(m))
}

/// Records sold in `month` of any year, in store order
pub fn filter_by_month(records: &[Transaction], month: Option<u32>) -> Vec<&Transaction> {
    let Some(month) = month.filter(|m| (1..=12).contains(m)) else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|t| t.sale_month() == Some(month))
        .collect()
}

/// Case-sensitive substring match on title, description or price
pub fn matches_search(transaction: &Transaction, search_text: &str) -> bool {
    transaction.title.contains(search_text)
        || transaction.description.contains(search_text)
        || transaction.price_text().contains(search_text)
}

/// The `[start, end)` window of page `page` (1-based); empty when out of range
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }

    let Some(start) = (page - 1).checked_mul(per_page) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }

    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn list_transactions(records: &[Transaction], query: &ListQuery) -> Vec<Transaction> {
    let mut matches = filter_by_month(records, query.month);

    if let Some(text) = query.search_text.as_deref().filter(|s| !s.is_empty()) {
        matches.retain(|t| matches_search(t, text));
    }

    paginate(&matches, query.page, query.per_page)
        .iter()
        .map(|t| (*t).clone())
        .collect()
}

pub fn compute_statistics(records: &[Transaction], month: Option<u32>) -> Statistics {
    let matches = filter_by_month(records, month);
    let sold_items = matches.len();

    Statistics {
        total_sale_amount: matches.iter().map(|t| t.price).sum(),
        sold_items,
        not_sold_items: records.len() - sold_items,
    }
}

pub fn compute_bar_chart(records: &[Transaction], month: Option<u32>) -> BarChart {
    let mut chart = BarChart::default();
    for transaction in filter_by_month(records, month) {
        chart.add(transaction.price);
    }
    chart
}

pub fn compute_pie_chart(records: &[Transaction], month: Option<u32>) -> PieChart {
    let mut chart = PieChart::default();
    for transaction in filter_by_month(records, month) {
        chart.add(&transaction.category);
    }
    chart
}

// ==================== Tests ====================
