//! Maps a raw table laid out by a [`BankProfile`] onto canonical rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::{StatementError, StatementResult};
use crate::parsers::prelude::*;
use crate::profiles::{AmountColumns, BankProfile};
use crate::types::TransactionType;

/// A canonical row before category assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub balance: Decimal,
    pub source_hint: Option<String>,
}

enum AmountIndex {
    Signed(usize),
    Split { debit: usize, credit: usize },
}

struct ColumnIndex {
    date: usize,
    description: usize,
    amount: AmountIndex,
    hint: Option<usize>,
}

impl ColumnIndex {
    fn resolve(table: &RawTable, profile: &BankProfile) -> StatementResult<Self> {
        let date = require_column(table, &profile.date_column)?;
        let description = require_column(table, &profile.description_column)?;
        let amount = match &profile.amount {
            AmountColumns::Signed(column) => AmountIndex::Signed(require_column(table, column)?),
            AmountColumns::Split { debit, credit } => AmountIndex::Split {
                debit: require_column(table, debit)?,
                credit: require_column(table, credit)?,
            },
        };

        Ok(Self {
            date,
            description,
            amount,
            hint: profile
                .source_category_column
                .as_deref()
                .and_then(|name| table.column(name)),
        })
    }
}

fn require_column(table: &RawTable, name: &str) -> StatementResult<usize> {
    table.column(name).ok_or_else(|| StatementError::SchemaMismatch {
        column: name.to_string(),
    })
}

/// Unparseable amounts count as zero; the row is kept.
fn amount_or_zero(cell: &Cell, line: usize) -> Decimal {
    if cell.is_empty() {
        return Decimal::ZERO;
    }
    cell.to_decimal().unwrap_or_else(|| {
        warn!(line, value = ?cell, "unparseable amount, using 0");
        Decimal::ZERO
    })
}

/// Removes every `#` mark and surrounding whitespace; blank tags are absent.
pub fn clean_hint(raw: &str) -> Option<String> {
    let hint = raw.replace('#', "");
    let hint = hint.trim();
    if hint.is_empty() {
        None
    } else {
        Some(hint.to_string())
    }
}

/// Normalizes every row of `table`. Rows whose date does not parse are
/// dropped before the running balance is accumulated.
pub fn normalize(table: &RawTable, profile: &BankProfile) -> StatementResult<Vec<NormalizedRow>> {
    let columns = ColumnIndex::resolve(table, profile)?;
    if profile.source_category_column.is_some() && columns.hint.is_none() {
        debug!(profile = %profile.label, "source category column not present, hints disabled");
    }

    let mut balance = Decimal::ZERO;
    let mut normalized = Vec::with_capacity(table.len());

    for (line, row) in table.rows().iter().enumerate() {
        let Some(date) = RawTable::cell(row, columns.date).to_date(&profile.date_format) else {
            debug!(line, "excluding row with unparseable date");
            continue;
        };

        let overflow = || StatementError::AmountOverflow(format!("line {}", line));
        let amount = match columns.amount {
            AmountIndex::Signed(index) => amount_or_zero(RawTable::cell(row, index), line),
            AmountIndex::Split { debit, credit } => amount_or_zero(RawTable::cell(row, credit), line)
                .checked_sub(amount_or_zero(RawTable::cell(row, debit), line))
                .ok_or_else(overflow)?,
        };
        balance = balance.checked_add(amount).ok_or_else(overflow)?;

        normalized.push(NormalizedRow {
            date,
            description: RawTable::cell(row, columns.description)
                .to_text()
                .unwrap_or_default(),
            amount,
            transaction_type: TransactionType::from_amount(amount),
            balance,
            source_hint: columns
                .hint
                .and_then(|index| RawTable::cell(row, index).to_text())
                .and_then(|text| clean_hint(&text)),
        });
    }

    debug!(
        rows = table.len(),
        kept = normalized.len(),
        profile = %profile.label,
        "statement normalized"
    );
    Ok(normalized)
}
