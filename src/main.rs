//! Sales Stats - yearly residential sales statistics
//!
//! Loads a sales CSV, reduces each year's prices to the requested statistics
//! and shows them as a bar chart with a trend line or as a table.

mod charts;
mod cli;
mod config;
mod data;
mod gui;
mod report;
mod selection;
mod stats;

use anyhow::{anyhow, Context, Result};
use charts::{ChartData, StaticChartRenderer};
use clap::Parser;
use cli::{OutputFormat, SalesCli};
use config::AppConfig;
use data::{DataLoader, SaleRecord};
use gui::SalesChartApp;
use report::ResultTable;
use selection::{RenderPlan, StatRequest};
use stats::StatsCalculator;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// What a run produces once statistics are computed.
#[derive(Debug)]
enum Report {
    Table(ResultTable),
    Chart(ChartData),
}

fn build_report(records: &[SaleRecord], plan: RenderPlan, config: &AppConfig) -> Report {
    match plan {
        RenderPlan::Table(kinds) => {
            let series =
                StatsCalculator::series_for_kinds(records, config.years, &kinds, config.price_band);
            Report::Table(ResultTable::from_series(&series))
        }
        RenderPlan::Chart(kind) => {
            let series =
                StatsCalculator::series_for_years(records, config.years, kind, config.price_band);
            Report::Chart(ChartData::from_series(
                &series,
                config.years,
                config.chart.major_tick_step,
            ))
        }
    }
}

fn print_table(table: &ResultTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", table),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(table).context("Serialize table")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn show_chart(chart_data: ChartData, cli: &SalesCli, config: &AppConfig) -> Result<()> {
    let Some(png) = &cli.png else {
        return SalesChartApp::run(chart_data).map_err(|e| anyhow!("Chart window failed: {}", e));
    };

    let path: PathBuf = png.clone().unwrap_or_else(|| config.chart.output.clone());
    StaticChartRenderer::render_png(
        &chart_data,
        &path,
        (config.chart.width, config.chart.height),
    )
    .with_context(|| format!("Render chart to {}", path.display()))?;
    println!("Chart written to {}", path.display());

    if cli.open {
        open::that(&path).with_context(|| format!("Open {}", path.display()))?;
    }
    Ok(())
}

fn run(cli: SalesCli) -> Result<()> {
    // Usage errors surface before any file is touched
    let request = StatRequest::from_selection(&cli.selection())?;

    let mut config = AppConfig::load(cli.config.as_deref()).context("Load configuration")?;
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }

    let records = DataLoader::load_csv(&config.data_path)
        .with_context(|| format!("Load sales data from {}", config.data_path.display()))?;

    let plan = RenderPlan::new(request, cli.render_mode());
    info!(?plan, "rendering");

    match build_report(&records, plan, &config) {
        Report::Table(table) => print_table(&table, cli.format),
        Report::Chart(chart_data) => show_chart(chart_data, &cli, &config),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(SalesCli::parse())
}
