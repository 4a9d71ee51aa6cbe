//! Statistics Calculator Module
//! Reduces yearly price groups to scalar statistics.

use crate::config::{PriceBand, YearRange};
use crate::data::{DataProcessor, SaleRecord, YearGroups};
use statrs::statistics::Statistics;
use std::fmt;
use tracing::debug;

/// A statistic that can be computed for one year of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatKind {
    Mean,
    Median,
    StdDev,
    Probability,
}

impl StatKind {
    /// All kinds in canonical column order.
    pub const ALL: [StatKind; 4] = [
        StatKind::Mean,
        StatKind::Median,
        StatKind::StdDev,
        StatKind::Probability,
    ];

    pub fn title(self) -> &'static str {
        match self {
            StatKind::Mean => "Mean Price of Residential Units by Year",
            StatKind::Median => "Median Price of Residential Units by Year",
            StatKind::StdDev => "Standard Deviation of Residential Units by Year",
            StatKind::Probability => "Probability of $200K-$300K Prices by Year",
        }
    }

    /// Y axis label for charts, and value column label for single-stat tables.
    pub fn axis_label(self) -> &'static str {
        match self {
            StatKind::Mean => "Mean Sale Price",
            StatKind::Median => "Median Sale Price",
            StatKind::StdDev => "Standard Deviation in Sale Pricing",
            StatKind::Probability => "Probability ($200K-$300K)",
        }
    }

    /// Column label used in combined tables.
    pub fn column_label(self) -> &'static str {
        match self {
            StatKind::Mean => "Mean Sales",
            StatKind::Median => "Median Sales",
            StatKind::StdDev => "Standard Deviation of Sales",
            StatKind::Probability => "Probability of Sale Being Between $200K and $300K",
        }
    }

    /// Probabilities display as percentages, everything else as currency.
    pub fn is_percentage(self) -> bool {
        matches!(self, StatKind::Probability)
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatKind::Mean => "mean",
            StatKind::Median => "median",
            StatKind::StdDev => "std",
            StatKind::Probability => "probability",
        };
        f.write_str(name)
    }
}

/// One statistic evaluated for every year of a range.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySeries {
    pub kind: StatKind,
    pub points: Vec<(i32, f64)>,
}

impl YearlySeries {
    pub fn years(&self) -> Vec<i32> {
        self.points.iter().map(|&(y, _)| y).collect()
    }

    /// Points with a defined value; years without sales are skipped.
    pub fn finite_points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().copied().filter(|(_, v)| v.is_finite())
    }
}

/// Handles the yearly statistic reductions.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Reduce a group of prices to one statistic. Empty groups yield NaN for
    /// every kind.
    pub fn compute(values: &[f64], kind: StatKind, band: PriceBand) -> f64 {
        if values.is_empty() {
            return f64::NAN;
        }

        match kind {
            StatKind::Mean => values.iter().sum::<f64>() / values.len() as f64,
            StatKind::Median => Self::median(values),
            StatKind::StdDev => values.iter().population_std_dev(),
            StatKind::Probability => {
                let in_band = values.iter().filter(|&&p| band.contains(p)).count();
                in_band as f64 / values.len() as f64
            }
        }
    }

    fn median(values: &[f64]) -> f64 {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        }
    }

    /// Statistic for a single year of sales.
    pub fn statistic_for_year(
        records: &[SaleRecord],
        year: i32,
        kind: StatKind,
        band: PriceBand,
    ) -> f64 {
        let prices = DataProcessor::prices_for_year(records, year);
        Self::compute(&prices, kind, band)
    }

    /// One value per year in `range`, ascending. Each year is independent.
    pub fn series_for_years(
        records: &[SaleRecord],
        range: YearRange,
        kind: StatKind,
        band: PriceBand,
    ) -> YearlySeries {
        let groups = DataProcessor::group_by_year(records, range);
        Self::series_from_groups(&groups, kind, band)
    }

    /// Series for several kinds over the same grouping, in the order given.
    pub fn series_for_kinds(
        records: &[SaleRecord],
        range: YearRange,
        kinds: &[StatKind],
        band: PriceBand,
    ) -> Vec<YearlySeries> {
        let groups = DataProcessor::group_by_year(records, range);
        kinds
            .iter()
            .map(|&kind| Self::series_from_groups(&groups, kind, band))
            .collect()
    }

    fn series_from_groups(groups: &YearGroups, kind: StatKind, band: PriceBand) -> YearlySeries {
        let points: Vec<(i32, f64)> = groups
            .years()
            .map(|year| (year, Self::compute(groups.prices(year), kind, band)))
            .collect();

        debug!(%kind, years = points.len(), "series computed");
        YearlySeries { kind, points }
    }
}
