//! Read-only aggregations over canonical transactions.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{StatementError, StatementResult};
use crate::types::{Category, Transaction};

/// Number of rows shown in the top incomes / top expenses tables.
pub const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    /// Magnitude of all outflows, never negative.
    pub expenses: Decimal,
    pub net_flow: Decimal,
    /// Percentage of income left after expenses; zero without income.
    pub savings_rate: Decimal,
}

fn overflow(what: &str) -> StatementError {
    StatementError::AmountOverflow(what.to_string())
}

fn checked_sum<I>(amounts: I, what: &str) -> StatementResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or_else(|| overflow(what))
}

pub fn totals(transactions: &[Transaction]) -> StatementResult<Totals> {
    let income = checked_sum(
        transactions.iter().filter(|t| t.is_income()).map(|t| t.amount),
        "total income",
    )?;
    let expenses = checked_sum(
        transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount),
        "total expenses",
    )?
    .abs();

    // both operands are non-negative
    let net_flow = income - expenses;
    let savings_rate = if income > Decimal::ZERO {
        net_flow
            .checked_div(income)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| overflow("savings rate"))?
    } else {
        Decimal::ZERO
    };

    Ok(Totals {
        income,
        expenses,
        net_flow,
        savings_rate,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    /// Signed sum of outflows (zero or negative).
    pub expense: Decimal,
    pub net: Decimal,
}

impl MonthlySummary {
    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

fn month_key(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Income, expense and net per calendar month, oldest first.
pub fn monthly_summary(transactions: &[Transaction]) -> StatementResult<Vec<MonthlySummary>> {
    let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let (income, expense) = months.entry(month_key(t.date)).or_default();
        let slot = if t.is_income() { income } else { expense };
        *slot = slot
            .checked_add(t.amount)
            .ok_or_else(|| overflow("monthly summary"))?;
    }

    // income >= 0 and expense <= 0, so the net cannot overflow
    Ok(months
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlySummary {
            year,
            month,
            income,
            expense,
            net: income + expense,
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetVariance {
    pub year: i32,
    pub month: u32,
    pub budget: Decimal,
    pub actual_expenses: Decimal,
    /// `budget - actual_expenses`; negative means over budget.
    pub difference: Decimal,
}

/// One row per month present in the data, including months without any
/// expense.
pub fn budget_variance(
    transactions: &[Transaction],
    budget: Decimal,
) -> StatementResult<Vec<BudgetVariance>> {
    Ok(monthly_summary(transactions)?
        .into_iter()
        .map(|m| {
            let actual_expenses = m.expense.abs();
            BudgetVariance {
                year: m.year,
                month: m.month,
                budget,
                actual_expenses,
                difference: budget - actual_expenses,
            }
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub amount: Decimal,
}

/// Absolute expense per category, ordered by category label.
pub fn category_totals(transactions: &[Transaction]) -> StatementResult<Vec<CategoryTotal>> {
    let mut by_label: BTreeMap<&'static str, CategoryTotal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let total = by_label.entry(t.category.label()).or_insert(CategoryTotal {
            category: t.category,
            amount: Decimal::ZERO,
        });
        total.amount = total
            .amount
            .checked_add(t.amount.abs())
            .ok_or_else(|| overflow("category totals"))?;
    }
    Ok(by_label.into_values().collect())
}

/// Largest incomes first. Ties keep file order.
pub fn top_incomes(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut incomes: Vec<_> = transactions.iter().filter(|t| t.is_income()).collect();
    incomes.sort_by(|a, b| b.amount.cmp(&a.amount));
    incomes.into_iter().take(n).cloned().collect()
}

/// Most negative amounts first. Ties keep file order.
pub fn top_expenses(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut expenses: Vec<_> = transactions.iter().filter(|t| t.is_expense()).collect();
    expenses.sort_by(|a, b| a.amount.cmp(&b.amount));
    expenses.into_iter().take(n).cloned().collect()
}

/// Distinct categories present, ordered by label.
pub fn categories(transactions: &[Transaction]) -> Vec<Category> {
    let mut categories: Vec<_> = transactions.iter().map(|t| t.category).collect();
    categories.sort_by_key(|c| c.label());
    categories.dedup();
    categories
}

pub fn amount_bounds(transactions: &[Transaction]) -> Option<(Decimal, Decimal)> {
    let min = transactions.iter().map(|t| t.amount).min()?;
    let max = transactions.iter().map(|t| t.amount).max()?;
    Some((min, max))
}

pub fn date_bounds(transactions: &[Transaction]) -> Option<(NaiveDate, NaiveDate)> {
    let min = transactions.iter().map(|t| t.date).min()?;
    let max = transactions.iter().map(|t| t.date).max()?;
    Some((min, max))
}
