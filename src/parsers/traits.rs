use super::table::RawTable;
use crate::profiles::{BankProfile, SourceFormat};

pub trait TableReader {
    fn read(content: &[u8], profile: &BankProfile) -> Result<RawTable, String>;

    fn is_supported(format: SourceFormat) -> bool;
}
