//! Data Processor Module
//! Partitions sales records into per-year price groups.

use crate::config::YearRange;
use crate::data::SaleRecord;
use std::collections::BTreeMap;

/// Prices grouped by year, restricted to a year range. Every year in the
/// range has an entry, possibly empty.
#[derive(Debug, Clone, Default)]
pub struct YearGroups {
    groups: BTreeMap<i32, Vec<f64>>,
}

impl YearGroups {
    /// Years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.groups.keys().copied()
    }

    /// Prices recorded for a year. Empty for years with no sales.
    pub fn prices(&self, year: i32) -> &[f64] {
        self.groups.get(&year).map(Vec::as_slice).unwrap_or(&[])
    }
}

pub struct DataProcessor;

impl DataProcessor {
    /// Prices for a single year, in input order.
    pub fn prices_for_year(records: &[SaleRecord], year: i32) -> Vec<f64> {
        records
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.price)
            .collect()
    }

    /// Group records by year over `range`. Records outside the range are dropped.
    pub fn group_by_year(records: &[SaleRecord], range: YearRange) -> YearGroups {
        let mut groups: BTreeMap<i32, Vec<f64>> =
            range.years().into_iter().map(|y| (y, Vec::new())).collect();

        for record in records {
            if let Some(prices) = groups.get_mut(&record.year) {
                prices.push(record.price);
            }
        }

        YearGroups { groups }
    }
}
