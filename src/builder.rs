use std::fs;

use tracing::debug;

use crate::{
    classifier::CategoryRules,
    errors::{StatementError, StatementResult},
    ledger::Ledger,
    normalizer,
    parsers::prelude::*,
    profiles::{BankProfile, ProfileRegistry, SourceFormat},
};

impl SourceFormat {
    fn read_table(self, content: &[u8], profile: &BankProfile) -> StatementResult<RawTable> {
        let table = if CsvReader::is_supported(self) {
            CsvReader::read(content, profile)
        } else if SpreadsheetReader::is_supported(self) {
            SpreadsheetReader::read(content, profile)
        } else {
            return Err(StatementError::UnsupportedFormat);
        };

        table.map_err(StatementError::ParseFailed)
    }
}

/// Runs one upload through format detection, profile selection, reading,
/// normalization and classification.
#[derive(Default)]
pub struct LedgerBuilder {
    content: Option<Vec<u8>>,
    filepath: Option<String>,
    format: Option<SourceFormat>,
    profile: Option<String>,
    registry: Option<ProfileRegistry>,
    rules: Option<CategoryRules>,
}

impl LedgerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: &[u8]) -> Self {
        self.content = Some(content.to_vec());
        self
    }

    pub fn filename(mut self, filename: &str) -> Self {
        self.filepath = Some(filename.to_string());
        self
    }

    pub fn format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Label of the bank profile to apply. Defaults to the first profile
    /// compatible with the detected format.
    pub fn profile(mut self, label: &str) -> Self {
        self.profile = Some(label.to_string());
        self
    }

    pub fn registry(mut self, registry: ProfileRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn rules(mut self, rules: CategoryRules) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn build(self) -> StatementResult<Ledger> {
        let format = self
            .format
            .map(Ok)
            .unwrap_or_else(|| {
                SourceFormat::detect(self.filepath.as_deref(), self.content.as_deref())
            })?;

        let registry = self.registry.unwrap_or_default();
        let compatible = registry.compatible_with(format)?;
        let profile = match self.profile.as_deref() {
            Some(label) => compatible
                .into_iter()
                .find(|p| p.label == label)
                .ok_or_else(|| StatementError::UnknownProfile(label.to_string()))?,
            None => compatible
                .into_iter()
                .next()
                .ok_or(StatementError::NoCompatibleProfile(format))?,
        };
        debug!(%format, profile = %profile.label, "bank profile selected");

        let content = self
            .content
            .map(Ok)
            .unwrap_or_else(|| {
                self.filepath
                    .ok_or(StatementError::MissingContentAndFilepath)
                    .and_then(|path| fs::read(path).map_err(Into::into))
            })?;

        let table = format.read_table(&content, profile)?;
        debug!(columns = table.headers().len(), rows = table.len(), "raw table read");

        let rows = normalizer::normalize(&table, profile)?;
        Ok(Ledger::classify(rows, &self.rules.unwrap_or_default()))
    }
}
