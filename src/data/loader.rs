//! CSV Data Loader Module
//! Reads the sales file with Polars and extracts (year, price) records.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Expected at least 2 columns (year, price), found {0}")]
    MissingColumns(usize),
    #[error("Malformed value in data row {row}: {detail}")]
    Malformed { row: usize, detail: String },
}

/// One residential sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaleRecord {
    pub year: i32,
    pub price: f64,
}

impl SaleRecord {
    pub fn new(year: i32, price: f64) -> Self {
        Self { year, price }
    }
}

/// Loads sales records from CSV. Columns are positional: year, price, then
/// anything else, which is ignored.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with exactly one header row.
    pub fn load_csv(path: &Path) -> Result<Vec<SaleRecord>, LoaderError> {
        info!(path = %path.display(), "loading sales data");

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            // Infer from every row so a late fractional price is not parsed as i64
            .with_infer_schema_length(None)
            .finish()?
            .collect()?;

        debug!(rows = df.height(), columns = df.width(), "csv parsed");
        Self::from_frame(&df)
    }

    /// Extract records from an in-memory frame.
    pub fn from_frame(df: &DataFrame) -> Result<Vec<SaleRecord>, LoaderError> {
        let columns = df.get_columns();
        if columns.len() < 2 {
            return Err(LoaderError::MissingColumns(columns.len()));
        }

        let years = columns[0].cast(&DataType::Float64)?;
        let prices = columns[1].cast(&DataType::Float64)?;
        let years = years.f64()?;
        let prices = prices.f64()?;

        let mut records = Vec::with_capacity(df.height());
        for (i, (year, price)) in years.into_iter().zip(prices.into_iter()).enumerate() {
            // +2: one for the header, one for 1-based numbering
            let row = i + 2;
            let (Some(year), Some(price)) = (year, price) else {
                return Err(LoaderError::Malformed {
                    row,
                    detail: "missing or non-numeric year/price".to_string(),
                });
            };

            if !year.is_finite() || year.fract() != 0.0 {
                return Err(LoaderError::Malformed {
                    row,
                    detail: format!("year {} is not a whole number", year),
                });
            }
            if !price.is_finite() {
                return Err(LoaderError::Malformed {
                    row,
                    detail: format!("price {} is not finite", price),
                });
            }

            if year < i32::MIN as f64 || year > i32::MAX as f64 {
                return Err(LoaderError::Malformed {
                    row,
                    detail: format!("year {} is out of range", year),
                });
            }

            records.push(SaleRecord::new(year as i32, price));
        }

        info!(records = records.len(), "sales data loaded");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("sales_stats_{}_{}.csv", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_year_and_price_skipping_header() {
        let path = write_temp_csv(
            "basic",
            "Year,Price,Zip\n2001,210000,12345\n2002,500000.5,54321\n2001,290000,11111\n",
        );
        let records = DataLoader::load_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            records,
            vec![
                SaleRecord::new(2001, 210000.0),
                SaleRecord::new(2002, 500000.5),
                SaleRecord::new(2001, 290000.0),
            ]
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = std::env::temp_dir().join("sales_stats_does_not_exist.csv");
        assert!(DataLoader::load_csv(&path).is_err());
    }

    #[test]
    fn non_numeric_price_is_malformed() {
        let path = write_temp_csv("bad_price", "Year,Price\n2001,210000\n2002,abc\n");
        let result = DataLoader::load_csv(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(LoaderError::Malformed { row: 3, .. })));
    }

    #[test]
    fn single_column_frame_is_rejected() {
        let df = DataFrame::new(vec![Column::new("year".into(), vec![2001i64, 2002])]).unwrap();
        assert!(matches!(
            DataLoader::from_frame(&df),
            Err(LoaderError::MissingColumns(1))
        ));
    }

    #[test]
    fn late_fractional_price_after_many_whole_rows() {
        let mut contents = String::from("Year,Price\n");
        for _ in 0..10_500 {
            contents.push_str("2001,250000\n");
        }
        contents.push_str("2002,250000.5\n");
        let path = write_temp_csv("late_fraction", &contents);
        let result = DataLoader::load_csv(&path);
        std::fs::remove_file(&path).ok();

        let records = result.unwrap();
        assert_eq!(records.len(), 10_501);
        assert_eq!(records[10_500], SaleRecord::new(2002, 250000.5));
    }

    #[test]
    fn out_of_range_year_is_malformed() {
        let df = DataFrame::new(vec![
            Column::new("year".into(), vec![2001.0f64, 3e9]),
            Column::new("price".into(), vec![100.0f64, 200.0]),
        ])
        .unwrap();
        assert!(matches!(
            DataLoader::from_frame(&df),
            Err(LoaderError::Malformed { row: 3, .. })
        ));
    }

    #[test]
    fn fractional_year_is_malformed() {
        let df = DataFrame::new(vec![
            Column::new("year".into(), vec![2001.5f64]),
            Column::new("price".into(), vec![100.0f64]),
        ])
        .unwrap();
        assert!(matches!(
            DataLoader::from_frame(&df),
            Err(LoaderError::Malformed { row: 2, .. })
        ));
    }
}
