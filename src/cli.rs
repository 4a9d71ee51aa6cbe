use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use crate::selection::{RenderMode, StatSelection};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "sales-stats",
    about = "Yearly residential sales statistics as a bar chart or a table",
    version
)]
pub struct SalesCli {
    /// Mean sale price per year
    #[arg(long, action = ArgAction::SetTrue)]
    pub mean: bool,

    /// Median sale price per year
    #[arg(long, action = ArgAction::SetTrue)]
    pub median: bool,

    /// Population standard deviation of sale prices per year
    #[arg(long, action = ArgAction::SetTrue)]
    pub std: bool,

    /// Probability of a sale falling inside the price band
    #[arg(long, action = ArgAction::SetTrue)]
    pub prob: bool,

    /// Print a table instead of charting (always the case for several statistics)
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "chart")]
    pub table: bool,

    /// Chart the statistic (default)
    #[arg(long, action = ArgAction::SetTrue)]
    pub chart: bool,

    /// Write the chart to a PNG instead of opening a window; defaults to the
    /// configured output path
    #[arg(long, value_name = "FILE")]
    pub png: Option<Option<PathBuf>>,

    /// Open the written PNG with the system viewer
    #[arg(long, action = ArgAction::SetTrue, requires = "png")]
    pub open: bool,

    /// Table output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to config (JSON); built-in defaults when omitted
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Sales CSV, overriding the configured path
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

impl SalesCli {
    pub fn selection(&self) -> StatSelection {
        StatSelection {
            mean: self.mean,
            median: self.median,
            std: self.std,
            prob: self.prob,
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.table {
            RenderMode::Table
        } else {
            RenderMode::Chart
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        SalesCli::command().debug_assert();
    }

    #[test]
    fn flags_map_to_selection_and_mode() {
        let cli = SalesCli::parse_from(["sales-stats", "--mean", "--prob", "--table"]);
        assert_eq!(
            cli.selection(),
            StatSelection {
                mean: true,
                median: false,
                std: false,
                prob: true,
            }
        );
        assert_eq!(cli.render_mode(), RenderMode::Table);
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn chart_is_the_default_mode() {
        let cli = SalesCli::parse_from(["sales-stats", "--median"]);
        assert_eq!(cli.render_mode(), RenderMode::Chart);
        assert!(cli.png.is_none());
    }

    #[test]
    fn png_path_is_optional() {
        let cli = SalesCli::parse_from(["sales-stats", "--std", "--png"]);
        assert_eq!(cli.png, Some(None));

        let cli = SalesCli::parse_from(["sales-stats", "--std", "--png", "out.png", "--open"]);
        assert_eq!(cli.png, Some(Some(PathBuf::from("out.png"))));
        assert!(cli.open);
    }

    #[test]
    fn open_requires_png() {
        assert!(SalesCli::try_parse_from(["sales-stats", "--std", "--open"]).is_err());
    }

    #[test]
    fn table_and_chart_conflict() {
        assert!(SalesCli::try_parse_from(["sales-stats", "--mean", "--table", "--chart"]).is_err());
    }
}
