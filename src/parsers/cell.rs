use chrono::NaiveDate;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Missing-value spellings commonly found in statement exports.
const MISSING_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// One cell of a statement before normalization.
///
/// Spreadsheets hand over typed numbers and dates, delimited text only
/// strings; coercion to the canonical fields happens here.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    /// Builds a cell from raw text, mapping the usual missing-value spellings
    /// to [`Cell::Empty`].
    pub fn from_text(raw: &str) -> Self {
        if MISSING_TOKENS.contains(&raw.trim()) {
            Cell::Empty
        } else {
            Cell::Text(raw.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Parses the cell as a calendar date using a `strftime` pattern.
    pub fn to_date(&self, format: &str) -> Option<NaiveDate> {
        match self {
            Cell::Date(date) => Some(*date),
            Cell::Text(text) => NaiveDate::parse_from_str(text.trim(), format).ok(),
            Cell::Empty | Cell::Number(_) => None,
        }
    }

    /// Parses the cell as a decimal amount, accepting plain or scientific
    /// notation.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            Cell::Number(value) => Decimal::from_f64(*value),
            Cell::Text(text) => {
                let s = text.trim();
                Decimal::from_str(s)
                    .or_else(|_| Decimal::from_scientific(s))
                    .ok()
            }
            Cell::Empty | Cell::Date(_) => None,
        }
    }

    /// Text rendering of the cell; `None` when the cell is missing.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(text) => Some(text.clone()),
            Cell::Number(value) => Some(value.to_string()),
            Cell::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rstest::rstest;

    #[rstest]
    #[case("05/01/2024", "%d/%m/%Y", 2024, 1, 5)]
    #[case("  31/12/2025  ", "%d/%m/%Y", 2025, 12, 31)]
    #[case("2024-02-29", "%Y-%m-%d", 2024, 2, 29)]
    #[case("12/26/2025", "%m/%d/%Y", 2025, 12, 26)]
    fn test_text_to_date(
        #[case] input: &str,
        #[case] format: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let date = Cell::from_text(input).to_date(format).unwrap();
        assert_eq!(date.year(), year);
        assert_eq!(date.month(), month);
        assert_eq!(date.day(), day);
    }

    #[rstest]
    #[case("2024-01-05", "%d/%m/%Y")]   // wrong layout for the profile
    #[case("32/01/2024", "%d/%m/%Y")]   // no such day
    #[case("29/02/2023", "%d/%m/%Y")]   // not a leap year
    #[case("invalid-date", "%d/%m/%Y")]
    #[case("", "%d/%m/%Y")]
    fn test_text_to_date_invalid(#[case] input: &str, #[case] format: &str) {
        assert!(Cell::from_text(input).to_date(format).is_none());
    }

    #[test]
    fn test_typed_date_ignores_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(Cell::Date(date).to_date("%d/%m/%Y"), Some(date));
        assert_eq!(Cell::Number(45366.0).to_date("%d/%m/%Y"), None);
    }

    #[rstest]
    #[case("-1200", "-1200")]
    #[case(" 50000.50 ", "50000.50")]
    #[case("1e3", "1000")]
    #[case("0", "0")]
    fn test_text_to_decimal(#[case] input: &str, #[case] expected: &str) {
        let value = Cell::from_text(input).to_decimal().unwrap();
        assert_eq!(value, Decimal::from_str(expected).unwrap());
    }

    #[rstest]
    #[case("1,200.00")]
    #[case("₹500")]
    #[case("abc")]
    #[case("")]
    fn test_text_to_decimal_invalid(#[case] input: &str) {
        assert!(Cell::from_text(input).to_decimal().is_none());
    }

    #[test]
    fn test_number_to_decimal() {
        assert_eq!(
            Cell::Number(-250.75).to_decimal(),
            Some(Decimal::from_str("-250.75").unwrap())
        );
        assert_eq!(Cell::Number(f64::NAN).to_decimal(), None);
    }

    #[rstest]
    #[case("nan")]
    #[case("NaN")]
    #[case("N/A")]
    #[case("null")]
    #[case("   ")]
    fn test_missing_tokens_are_empty(#[case] input: &str) {
        let cell = Cell::from_text(input);
        assert!(cell.is_empty());
        assert_eq!(cell.to_text(), None);
    }

    #[test]
    fn test_to_text() {
        assert_eq!(Cell::from_text(" Zomato ").to_text().as_deref(), Some(" Zomato "));
        assert_eq!(Cell::Number(42.0).to_text().as_deref(), Some("42"));
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).to_text().as_deref(),
            Some("2024-01-05")
        );
    }
}
