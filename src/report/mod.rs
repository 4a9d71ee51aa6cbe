//! Report module - tabular output

mod table;

pub use table::ResultTable;
