use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analytics::{self, BudgetVariance, CategoryTotal, MonthlySummary, TOP_N, Totals};
use crate::classifier::CategoryRules;
use crate::errors::{StatementError, StatementResult};
use crate::filter::TransactionFilter;
use crate::normalizer::NormalizedRow;
use crate::types::{Category, Transaction};

/// The canonical transaction table of one statement. Never mutated once
/// built; filtering returns a new ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Assigns a category to every normalized row.
    pub fn classify(rows: Vec<NormalizedRow>, rules: &CategoryRules) -> Self {
        let transactions = rows
            .into_iter()
            .map(|row| {
                let category = rules.classify(
                    row.source_hint.as_deref(),
                    &row.description,
                    row.transaction_type,
                );
                Transaction {
                    date: row.date,
                    description: row.description,
                    amount: row.amount,
                    transaction_type: row.transaction_type,
                    balance: row.balance,
                    source_hint: row.source_hint,
                    category,
                }
            })
            .collect();

        Self::new(transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn totals(&self) -> StatementResult<Totals> {
        analytics::totals(&self.transactions)
    }

    pub fn monthly_summary(&self) -> StatementResult<Vec<MonthlySummary>> {
        analytics::monthly_summary(&self.transactions)
    }

    pub fn budget_variance(&self, budget: Decimal) -> StatementResult<Vec<BudgetVariance>> {
        analytics::budget_variance(&self.transactions, budget)
    }

    pub fn category_totals(&self) -> StatementResult<Vec<CategoryTotal>> {
        analytics::category_totals(&self.transactions)
    }

    pub fn top_incomes(&self) -> Vec<Transaction> {
        analytics::top_incomes(&self.transactions, TOP_N)
    }

    pub fn top_expenses(&self) -> Vec<Transaction> {
        analytics::top_expenses(&self.transactions, TOP_N)
    }

    pub fn categories(&self) -> Vec<Category> {
        analytics::categories(&self.transactions)
    }

    pub fn amount_bounds(&self) -> Option<(Decimal, Decimal)> {
        analytics::amount_bounds(&self.transactions)
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        analytics::date_bounds(&self.transactions)
    }

    pub fn filter(&self, filter: &TransactionFilter) -> Ledger {
        Ledger::new(filter.apply(&self.transactions))
    }

    /// Everything the dashboard shows for one set of parameters. Totals,
    /// trends and budget use the whole statement; the table and the top
    /// lists use the filtered rows.
    pub fn view(&self, params: &ViewParams) -> StatementResult<Dashboard> {
        if params.budget < Decimal::ZERO {
            return Err(StatementError::InvalidBudget);
        }

        let filtered = self.filter(&params.to_filter());
        Ok(Dashboard {
            totals: self.totals()?,
            monthly: self.monthly_summary()?,
            budget: self.budget_variance(params.budget)?,
            category_totals: self.category_totals()?,
            top_incomes: filtered.top_incomes(),
            top_expenses: filtered.top_expenses(),
            filtered,
        })
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// Parameters chosen in the presentation layer. Unset ranges and selections
/// cover the whole statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    pub budget: Decimal,
    pub query: String,
    pub categories: Option<BTreeSet<Category>>,
    pub amount_range: Option<(Decimal, Decimal)>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            budget: Decimal::from(20_000),
            query: String::new(),
            categories: None,
            amount_range: None,
            date_range: None,
        }
    }
}

impl ViewParams {
    fn to_filter(&self) -> TransactionFilter {
        let mut filter = TransactionFilter::new().query(&self.query);
        if let Some(categories) = &self.categories {
            filter = filter.categories(categories.iter().copied());
        }
        if let Some((min, max)) = self.amount_range {
            filter = filter.amount_range(min, max);
        }
        if let Some((start, end)) = self.date_range {
            filter = filter.date_range(start, end);
        }
        filter
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub monthly: Vec<MonthlySummary>,
    pub budget: Vec<BudgetVariance>,
    pub category_totals: Vec<CategoryTotal>,
    pub filtered: Ledger,
    pub top_incomes: Vec<Transaction>,
    pub top_expenses: Vec<Transaction>,
}
