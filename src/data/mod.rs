//! Data module - CSV loading and grouping by year

mod loader;
mod processor;

pub use loader::{DataLoader, SaleRecord};
pub use processor::{DataProcessor, YearGroups};
