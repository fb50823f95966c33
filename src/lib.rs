//! Normalize personal bank statement exports, categorize transactions and
//! compute spending analytics.
//!
//! ```rust,ignore
//! use bank_statement_insights::{LedgerBuilder, ViewParams};
//!
//! let ledger = LedgerBuilder::new()
//!     .content(&file_bytes)
//!     .filename("passbook.csv")
//!     .profile("Paytm Passbook (CSV)")
//!     .build()?;
//!
//! let dashboard = ledger.view(&ViewParams::default())?;
//! ```

mod builder;
mod ledger;
mod types;

pub mod analytics;
pub mod classifier;
pub mod errors;
pub mod filter;
pub mod normalizer;
pub mod parsers;
pub mod profiles;

pub use builder::LedgerBuilder;
pub use classifier::{CategoryRules, HintRule, KeywordRule, classify};
pub use errors::{StatementError, StatementResult};
pub use filter::TransactionFilter;
pub use ledger::{Dashboard, Ledger, ViewParams};
pub use normalizer::{NormalizedRow, normalize};
pub use parsers::prelude::*;
pub use profiles::{AmountColumns, BankProfile, ProfileRegistry, SourceFormat};
pub use types::{Category, Transaction, TransactionType};
