//! Table Formatter
//! Lays yearly series out as rows of display strings with a leading year column.

use crate::stats::{StatKind, YearlySeries};
use serde::Serialize;
use std::fmt;

/// Cell text for years without sales.
pub const NOT_AVAILABLE: &str = "N/A";

const YEAR_HEADER: &str = "Year";

/// `$1,234,567.89`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// `0.3333` -> `33.33%`
pub fn format_percentage(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}%", value * 100.0)
}

fn format_value(kind: StatKind, value: f64) -> String {
    if kind.is_percentage() {
        format_percentage(value)
    } else {
        format_currency(value)
    }
}

/// Header row plus one row of display strings per year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Build a table from parallel series. A single series is labeled with
    /// its axis label, several with their column labels. All series must
    /// cover the same years.
    pub fn from_series(series: &[YearlySeries]) -> Self {
        let mut headers = vec![YEAR_HEADER.to_string()];
        match series {
            [single] => headers.push(single.kind.axis_label().to_string()),
            _ => headers.extend(series.iter().map(|s| s.kind.column_label().to_string())),
        }

        let years = series.first().map(|s| s.years()).unwrap_or_default();
        let rows = years
            .iter()
            .enumerate()
            .map(|(i, year)| {
                let mut row = vec![year.to_string()];
                row.extend(series.iter().map(|s| {
                    let value = s.points.get(i).map(|&(_, v)| v).unwrap_or(f64::NAN);
                    format_value(s.kind, value)
                }));
                row
            })
            .collect();

        Self { headers, rows }
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }
        widths
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let line: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:>w$}", cell, w = w))
                .collect();
            writeln!(f, "{}", line.join("  "))
        };

        write_row(f, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(f, "{}", rule.join("  "))?;
        for row in &self.rows {
            write_row(f, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(kind: StatKind, values: &[f64]) -> YearlySeries {
        YearlySeries {
            kind,
            points: values
                .iter()
                .enumerate()
                .map(|(i, &v)| (2001 + i as i32, v))
                .collect(),
        }
    }

    #[test]
    fn currency_has_separators_and_cents() {
        assert_eq!(format_currency(250000.5), "$250,000.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1500.0), "-$1,500.00");
        assert_eq!(format_currency(f64::NAN), NOT_AVAILABLE);
    }

    #[test]
    fn percentage_has_two_decimals() {
        assert_eq!(format_percentage(0.3333), "33.33%");
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(f64::NAN), NOT_AVAILABLE);
    }

    #[test]
    fn single_series_table_uses_axis_label() {
        let table = ResultTable::from_series(&[series(StatKind::Probability, &[1.0, 0.0])]);
        assert_eq!(table.headers, vec!["Year", "Probability ($200K-$300K)"]);
        assert_eq!(
            table.rows,
            vec![vec!["2001", "100.00%"], vec!["2002", "0.00%"]]
        );
    }

    #[test]
    fn combined_table_has_parallel_columns() {
        let table = ResultTable::from_series(&[
            series(StatKind::Mean, &[250000.5, f64::NAN]),
            series(StatKind::Probability, &[0.3333, f64::NAN]),
        ]);
        assert_eq!(
            table.headers,
            vec![
                "Year",
                "Mean Sales",
                "Probability of Sale Being Between $200K and $300K"
            ]
        );
        assert_eq!(table.rows[0], vec!["2001", "$250,000.50", "33.33%"]);
        assert_eq!(table.rows[1], vec!["2002", NOT_AVAILABLE, NOT_AVAILABLE]);
    }

    #[test]
    fn display_aligns_columns() {
        let table = ResultTable::from_series(&[series(StatKind::Median, &[5.0, 123456.0])]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Year  Median Sale Price");
        assert_eq!(lines[2], "2001              $5.00");
        assert_eq!(lines[3], "2002        $123,456.00");
    }

    #[test]
    fn serializes_to_json() {
        let table = ResultTable::from_series(&[series(StatKind::Mean, &[1.0])]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["headers"][1], "Mean Sale Price");
        assert_eq!(json["rows"][0][1], "$1.00");
    }
}
