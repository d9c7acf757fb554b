//! Tabular data model, serialization and preprocessing

pub mod binning;
pub mod loader;
pub mod table;

pub use binning::{sturges, BinningError, EqualFrequencyDiscretizer};
pub use loader::TableLoader;
pub use table::{Table, TableError, Value};
