pub mod cell;
pub mod csv;
pub mod table;
pub mod traits;
pub mod xlsx;

pub mod prelude {
    pub use super::cell::Cell;
    pub use super::csv::prelude::*;
    pub use super::table::RawTable;
    pub use super::traits::TableReader;
    pub use super::xlsx::prelude::*;
}
