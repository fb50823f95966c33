use crate::parsers::{cell::Cell, table::RawTable, traits::TableReader};
use crate::profiles::{BankProfile, SourceFormat};
use csv::ReaderBuilder;

pub struct CsvReader;

impl TableReader for CsvReader {
    fn is_supported(format: SourceFormat) -> bool {
        format == SourceFormat::DelimitedText
    }

    fn read(content: &[u8], profile: &BankProfile) -> Result<RawTable, String> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content);

        // preamble rows above the header (bank title, statement period)
        let mut records = reader.records().skip(profile.header_row_offset);

        let header = records
            .next()
            .ok_or("Missing header row")?
            .map_err(|e| format!("CSV read error: {}", e))?;
        let headers: Vec<String> = header.iter().map(str::to_string).collect();

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for result in records {
            let record = result.map_err(|e| format!("CSV read error: {}", e))?;
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }
            rows.push(record.iter().map(Cell::from_text).collect());
        }

        Ok(RawTable::new(headers, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ProfileRegistry;
    use rstest::rstest;

    const SAMPLE_CSV: &str = r#"Date,Transaction Details,Amount,Tags
05/01/2024,Salary from ACME,50000,#Income
10/01/2024,"Zomato dinner, with friends",-1200,
"#;

    fn paytm_csv() -> BankProfile {
        ProfileRegistry::builtin()
            .get("Paytm Passbook (CSV)")
            .cloned()
            .unwrap()
    }

    #[rstest]
    #[case(SourceFormat::DelimitedText, true)]
    #[case(SourceFormat::Spreadsheet, false)]
    fn test_is_supported(#[case] format: SourceFormat, #[case] expected: bool) {
        assert_eq!(CsvReader::is_supported(format), expected);
    }

    #[test]
    fn test_read_valid_csv() {
        let table = CsvReader::read(SAMPLE_CSV.as_bytes(), &paytm_csv()).unwrap();

        assert_eq!(table.headers().len(), 4);
        assert_eq!(table.column("Tags"), Some(3));
        assert_eq!(table.len(), 2);

        let row = &table.rows()[1];
        assert_eq!(
            RawTable::cell(row, 1),
            &Cell::Text("Zomato dinner, with friends".to_string())
        );
        assert!(RawTable::cell(row, 3).is_empty());
    }

    #[test]
    fn test_read_with_header_offset() {
        let content = "Paytm Passbook Statement\nGenerated 2024-02-01\nDate,Transaction Details,Amount\n05/01/2024,Cashback,25\n";
        let mut profile = paytm_csv();
        profile.header_row_offset = 2;

        let table = CsvReader::read(content.as_bytes(), &profile).unwrap();
        assert_eq!(table.column("Date"), Some(0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let content = "Date,Transaction Details,Amount\n05/01/2024,Cashback,25\n,,\n06/01/2024,Uber,-120\n";
        let table = CsvReader::read(content.as_bytes(), &paytm_csv()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_read_empty_content() {
        let result = CsvReader::read(b"", &paytm_csv());
        assert!(result.is_err());
    }

    #[test]
    fn test_offset_past_end() {
        let mut profile = paytm_csv();
        profile.header_row_offset = 10;
        let result = CsvReader::read(SAMPLE_CSV.as_bytes(), &profile);
        assert_eq!(result.unwrap_err(), "Missing header row");
    }
}
