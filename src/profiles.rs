//! Bank profiles: named schema descriptors mapping an institution's export
//! layout onto canonical transaction fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{StatementError, StatementResult};

/// Physical layout of an uploaded statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceFormat {
    #[serde(rename = "csv")]
    DelimitedText,
    #[serde(rename = "spreadsheet")]
    Spreadsheet,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::DelimitedText => f.pad("delimited text"),
            SourceFormat::Spreadsheet => f.pad("spreadsheet"),
        }
    }
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

impl SourceFormat {
    /// Decides the format from the filename extension, falling back to
    /// sniffing the content when no filename is known.
    pub fn detect(filename: Option<&str>, content: Option<&[u8]>) -> StatementResult<Self> {
        if let Some(name) = filename {
            let ext = Path::new(name)
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);

            return match ext.as_deref() {
                Some("csv") => Ok(SourceFormat::DelimitedText),
                Some("xlsx" | "xls" | "xlsm" | "ods") => Ok(SourceFormat::Spreadsheet),
                _ => Err(StatementError::UnsupportedFormat),
            };
        }

        match content {
            Some(bytes) if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) => {
                Ok(SourceFormat::Spreadsheet)
            }
            Some(bytes) if !bytes.is_empty() && std::str::from_utf8(bytes).is_ok() => {
                Ok(SourceFormat::DelimitedText)
            }
            _ => Err(StatementError::UnsupportedFormat),
        }
    }
}

/// How the signed amount is laid out in the source. Exactly one
/// representation exists per profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountColumns {
    /// One column, positive = inflow, negative = outflow.
    Signed(String),
    /// Separate outflow/inflow columns; amount is `credit - debit`.
    Split { debit: String, credit: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankProfile {
    pub label: String,
    pub source_format: SourceFormat,
    pub date_column: String,
    pub description_column: String,
    pub amount: AmountColumns,
    #[serde(default)]
    pub header_row_offset: usize,
    pub date_format: String,
    #[serde(default)]
    pub source_category_column: Option<String>,
    #[serde(default)]
    pub sheet_name: Option<String>,
}

impl BankProfile {
    /// Columns that must exist in the header row. The source category column
    /// is optional and never listed here.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut columns = vec![self.date_column.as_str(), self.description_column.as_str()];
        match &self.amount {
            AmountColumns::Signed(column) => columns.push(column),
            AmountColumns::Split { debit, credit } => {
                columns.push(debit);
                columns.push(credit);
            }
        }
        columns
    }
}

fn paytm_passbook(label: &str, source_format: SourceFormat, sheet_name: Option<&str>) -> BankProfile {
    BankProfile {
        label: label.to_string(),
        source_format,
        date_column: "Date".to_string(),
        description_column: "Transaction Details".to_string(),
        amount: AmountColumns::Signed("Amount".to_string()),
        header_row_offset: 0,
        date_format: "%d/%m/%Y".to_string(),
        source_category_column: Some("Tags".to_string()),
        sheet_name: sheet_name.map(str::to_string),
    }
}

/// Immutable collection of profiles, looked up by label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRegistry {
    profiles: Vec<BankProfile>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<BankProfile>) -> Self {
        Self { profiles }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            paytm_passbook("Paytm Passbook (CSV)", SourceFormat::DelimitedText, None),
            paytm_passbook(
                "Paytm Passbook (Excel)",
                SourceFormat::Spreadsheet,
                Some("Passbook Payment History"),
            ),
            BankProfile {
                label: "Generic Debit/Credit (CSV)".to_string(),
                source_format: SourceFormat::DelimitedText,
                date_column: "Date".to_string(),
                description_column: "Description".to_string(),
                amount: AmountColumns::Split {
                    debit: "Debit".to_string(),
                    credit: "Credit".to_string(),
                },
                header_row_offset: 0,
                date_format: "%Y-%m-%d".to_string(),
                source_category_column: None,
                sheet_name: None,
            },
        ])
    }

    /// Loads a registry from a JSON array of profiles.
    pub fn from_json(json: &str) -> StatementResult<Self> {
        serde_json::from_str(json).map_err(|e| StatementError::InvalidProfileConfig(e.to_string()))
    }

    pub fn profiles(&self) -> &[BankProfile] {
        &self.profiles
    }

    pub fn get(&self, label: &str) -> Option<&BankProfile> {
        self.profiles.iter().find(|p| p.label == label)
    }

    /// Profiles accepting `format`, in registration order. Never empty on
    /// success.
    pub fn compatible_with(&self, format: SourceFormat) -> StatementResult<Vec<&BankProfile>> {
        let matching: Vec<_> = self
            .profiles
            .iter()
            .filter(|p| p.source_format == format)
            .collect();

        if matching.is_empty() {
            return Err(StatementError::NoCompatibleProfile(format));
        }
        Ok(matching)
    }
}
