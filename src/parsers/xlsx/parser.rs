use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDate;

use crate::parsers::{cell::Cell, table::RawTable, traits::TableReader};
use crate::profiles::{BankProfile, SourceFormat};

pub struct SpreadsheetReader;

impl TableReader for SpreadsheetReader {
    fn is_supported(format: SourceFormat) -> bool {
        format == SourceFormat::Spreadsheet
    }

    fn read(content: &[u8], profile: &BankProfile) -> Result<RawTable, String> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(content.to_vec()))
            .map_err(|e| format!("Failed to open spreadsheet: {}", e))?;

        let sheet = match &profile.sheet_name {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or("Spreadsheet contains no sheets")?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| format!("Failed to read sheet '{}': {}", sheet, e))?;

        table_from_range(&range, profile.header_row_offset)
    }
}

/// `header_row_offset` counts from the top of the sheet, but a calamine range
/// starts at its first non-empty row.
fn table_from_range(range: &Range<Data>, header_row_offset: usize) -> Result<RawTable, String> {
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows().skip(header_row_offset.saturating_sub(first_row));

    let headers: Vec<String> = rows
        .next()
        .ok_or("Missing header row")?
        .iter()
        .map(|data| cell_from_data(data).to_text().unwrap_or_default())
        .collect();

    let rows: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>())
        .filter(|row| !row.iter().all(Cell::is_empty))
        .collect();

    Ok(RawTable::new(headers, rows))
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(text) => Cell::from_text(text),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        Data::DateTime(value) => value
            .as_datetime()
            .map(|dt| Cell::Date(dt.date()))
            .unwrap_or(Cell::Number(value.as_f64())),
        Data::DateTimeIso(text) => text
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::from_text(text)),
        Data::DurationIso(text) => Cell::from_text(text),
    }
}
