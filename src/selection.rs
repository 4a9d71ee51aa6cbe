//! Statistic selection and render planning.

use crate::stats::StatKind;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error(
        "Please specify at least one statistic to showcase (--mean, --median, --std or --prob)"
    )]
    NoStatistics,
}

/// Which statistics the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatSelection {
    pub mean: bool,
    pub median: bool,
    pub std: bool,
    pub prob: bool,
}

impl StatSelection {
    /// Selected kinds in canonical order.
    pub fn kinds(&self) -> Vec<StatKind> {
        let flags = [self.mean, self.median, self.std, self.prob];
        StatKind::ALL
            .into_iter()
            .zip(flags)
            .filter_map(|(kind, selected)| selected.then_some(kind))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatRequest {
    Single(StatKind),
    Combined(Vec<StatKind>),
}

impl StatRequest {
    pub fn from_selection(selection: &StatSelection) -> Result<Self, SelectionError> {
        let mut kinds = selection.kinds();
        match kinds.len() {
            0 => Err(SelectionError::NoStatistics),
            1 => Ok(StatRequest::Single(kinds.remove(0))),
            _ => Ok(StatRequest::Combined(kinds)),
        }
    }
}

/// Preferred output surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    #[default]
    Chart,
    Table,
}

/// What will actually be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderPlan {
    Chart(StatKind),
    Table(Vec<StatKind>),
}

impl RenderPlan {
    /// Charts exist only for a single statistic; combined requests always
    /// become a table.
    pub fn new(request: StatRequest, mode: RenderMode) -> Self {
        match (request, mode) {
            (StatRequest::Single(kind), RenderMode::Chart) => RenderPlan::Chart(kind),
            (StatRequest::Single(kind), RenderMode::Table) => RenderPlan::Table(vec![kind]),
            (StatRequest::Combined(kinds), mode) => {
                if mode == RenderMode::Chart {
                    warn!(
                        count = kinds.len(),
                        "multiple statistics selected, rendering a table instead of a chart"
                    );
                }
                RenderPlan::Table(kinds)
            }
        }
    }
}
