//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartPlotter, FIT_COLOR};
pub use renderer::StaticChartRenderer;
