use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::types::{Category, Transaction};

/// Conjunction of optional criteria. An unset criterion matches everything.
///
/// ```rust,ignore
/// let filter = TransactionFilter::new()
///     .query("zomato")
///     .amount_range(Decimal::from(-5000), Decimal::ZERO);
/// let dinners = ledger.filter(&filter);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    query: String,
    categories: Option<BTreeSet<Category>>,
    amount_range: Option<RangeInclusive<Decimal>>,
    date_range: Option<RangeInclusive<NaiveDate>>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring of the description. Empty matches all.
    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_lowercase();
        self
    }

    pub fn categories<I>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = Category>,
    {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    /// Inclusive on both ends.
    pub fn amount_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.amount_range = Some(min..=max);
        self
    }

    /// Inclusive on both ends.
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some(start..=end);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        (self.query.is_empty() || transaction.description.to_lowercase().contains(&self.query))
            && self
                .categories
                .as_ref()
                .is_none_or(|set| set.contains(&transaction.category))
            && self
                .amount_range
                .as_ref()
                .is_none_or(|range| range.contains(&transaction.amount))
            && self
                .date_range
                .as_ref()
                .is_none_or(|range| range.contains(&transaction.date))
    }

    /// Matching transactions in their original order.
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect()
    }
}
