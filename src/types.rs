use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// `Income` for zero and positive amounts, `Expense` otherwise.
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            TransactionType::Expense
        } else {
            TransactionType::Income
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => f.pad("Income"),
            TransactionType::Expense => f.pad("Expense"),
        }
    }
}

/// Spending category assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Utilities,
    Salary,
    Shopping,
    Rent,
    Transfers,
    Groceries,
    Bills,
    Income,
    Uncategorized,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Salary => "Salary",
            Category::Shopping => "Shopping",
            Category::Rent => "Rent",
            Category::Transfers => "Transfers",
            Category::Groceries => "Groceries",
            Category::Bills => "Bills",
            Category::Income => "Income",
            Category::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// One canonical ledger line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Positive = inflow, negative = outflow.
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    /// Running balance over the surviving rows, in file order.
    pub balance: Decimal,
    /// Tag carried by the source institution, `#` and whitespace stripped.
    pub source_hint: Option<String>,
    pub category: Category,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn create_test_transaction() -> Transaction {
        Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            description: "Zomato dinner".to_string(),
            amount: Decimal::from_str("-1200").unwrap(),
            transaction_type: TransactionType::Expense,
            balance: Decimal::from_str("48800").unwrap(),
            source_hint: None,
            category: Category::Food,
        }
    }

    #[rstest]
    #[case("50000", TransactionType::Income)]
    #[case("0", TransactionType::Income)]
    #[case("-0.00", TransactionType::Income)]
    #[case("-0.01", TransactionType::Expense)]
    #[case("-1200", TransactionType::Expense)]
    fn test_type_from_amount(#[case] amount: &str, #[case] expected: TransactionType) {
        let amount = Decimal::from_str(amount).unwrap();
        assert_eq!(TransactionType::from_amount(amount), expected);
    }

    #[test]
    fn test_category_display_matches_label() {
        assert_eq!(Category::Uncategorized.to_string(), "Uncategorized");
        assert_eq!(Category::Bills.to_string(), "Bills");
        assert_eq!(format!("{:<6}|", Category::Rent), "Rent  |");
    }

    #[test]
    fn test_transaction_serialization() {
        let transaction = create_test_transaction();

        let json = serde_json::to_string(&transaction).unwrap();
        assert!(json.contains("Zomato dinner"));
        assert!(json.contains("Expense"));
        assert!(json.contains("Food"));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, transaction);
        assert!(deserialized.is_expense());
        assert!(!deserialized.is_income());
    }
}
