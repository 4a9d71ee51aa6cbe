//! Stats module - yearly reductions and trend fitting

mod calculator;
mod regression;

pub use calculator::{StatKind, StatsCalculator, YearlySeries};
pub use regression::LinearFit;
