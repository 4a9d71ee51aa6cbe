//! Chart Plotter Module
//! Chart data preparation and the interactive egui_plot bar chart.

use crate::config::YearRange;
use crate::stats::{LinearFit, StatKind, YearlySeries};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, LineStyle, Plot, PlotPoints, Points};

pub const BAR_COLOR: Color32 = Color32::from_rgb(31, 119, 180); // Blue
pub const MARKER_COLOR: Color32 = Color32::from_rgb(255, 165, 0); // Orange
pub const FIT_COLOR: Color32 = Color32::from_rgb(220, 20, 60); // Red

const X_LABEL: &str = "Year";

/// Everything needed to draw one statistic's chart.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub kind: StatKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// One point per year; NaN where the year had no sales
    pub points: Vec<(i32, f64)>,
    pub fit: Option<LinearFit>,
    pub years: YearRange,
    pub major_tick_step: i32,
}

impl ChartData {
    pub fn from_series(series: &YearlySeries, years: YearRange, major_tick_step: i32) -> Self {
        let fit_points: Vec<(f64, f64)> = series
            .finite_points()
            .map(|(year, value)| (year as f64, value))
            .collect();

        Self {
            kind: series.kind,
            title: series.kind.title().to_string(),
            x_label: X_LABEL.to_string(),
            y_label: series.kind.axis_label().to_string(),
            points: series.points.clone(),
            fit: LinearFit::fit(&fit_points),
            years,
            major_tick_step,
        }
    }

    /// Points with a defined value.
    pub fn finite_points(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.points.iter().copied().filter(|(_, v)| v.is_finite())
    }

    /// Major tick years: multiples of the step that bracket the year range.
    pub fn major_ticks(&self) -> Vec<i32> {
        let step = self.major_tick_step.max(1);
        let first = self.years.start.div_euclid(step) * step;
        let last = -((-self.years.end).div_euclid(step)) * step;
        (first..=last).step_by(step as usize).collect()
    }

    /// Minor tick years: every year between the first and last major tick.
    pub fn minor_ticks(&self) -> Vec<i32> {
        let majors = self.major_ticks();
        match (majors.first(), majors.last()) {
            (Some(&first), Some(&last)) => (first..=last).collect(),
            _ => Vec::new(),
        }
    }

    /// Largest finite value, or 0 when there is none.
    pub fn max_value(&self) -> f64 {
        self.finite_points()
            .map(|(_, v)| v)
            .fold(0.0_f64, f64::max)
    }

    /// Best-fit line evaluated at the first and last charted year.
    pub fn fit_segment(&self) -> Option<[(f64, f64); 2]> {
        let fit = self.fit?;
        let x0 = self.years.start as f64;
        let x1 = self.years.end as f64;
        Some([(x0, fit.predict(x0)), (x1, fit.predict(x1))])
    }
}

/// Creates the interactive chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw bars, marker line and best-fit line for one statistic
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart_data: &ChartData) {
        let majors = chart_data.major_ticks();
        let minors = chart_data.minor_ticks();
        let major_step = chart_data.major_tick_step.max(1) as f64;

        Plot::new(format!("bar_chart_{}", chart_data.kind))
            .legend(Legend::default())
            .x_axis_label(chart_data.x_label.clone())
            .y_axis_label(chart_data.y_label.clone())
            .include_y(0.0)
            .allow_scroll(false)
            // Major ticks at the step cadence, minor ticks every year
            .x_grid_spacer(move |_input| {
                let mut marks: Vec<GridMark> = minors
                    .iter()
                    .filter(|y| !majors.contains(y))
                    .map(|&y| GridMark {
                        value: y as f64,
                        step_size: 1.0,
                    })
                    .collect();
                marks.extend(majors.iter().map(|&y| GridMark {
                    value: y as f64,
                    step_size: major_step,
                }));
                marks
            })
            .x_axis_formatter(move |mark, _range| {
                if mark.step_size >= major_step {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = chart_data
                    .finite_points()
                    .map(|(year, value)| Bar::new(year as f64, value).width(0.8))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(BAR_COLOR)
                        .name(chart_data.y_label.clone()),
                );

                let values: Vec<[f64; 2]> = chart_data
                    .finite_points()
                    .map(|(year, value)| [year as f64, value])
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(values.iter().copied()))
                        .color(MARKER_COLOR)
                        .width(1.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(values.iter().copied()))
                        .radius(3.0)
                        .color(MARKER_COLOR),
                );

                if let (Some(fit), Some(segment)) = (chart_data.fit, chart_data.fit_segment()) {
                    let line: Vec<[f64; 2]> = segment.iter().map(|&(x, y)| [x, y]).collect();
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(line))
                            .color(FIT_COLOR)
                            .width(1.5)
                            .style(LineStyle::dashed_loose())
                            .name(fit.equation()),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(points: Vec<(i32, f64)>) -> ChartData {
        ChartData::from_series(
            &YearlySeries {
                kind: StatKind::Mean,
                points,
            },
            YearRange::default(),
            5,
        )
    }

    #[test]
    fn default_range_ticks_every_five_years() {
        let data = chart(vec![(2001, 1.0)]);
        assert_eq!(data.major_ticks(), vec![2000, 2005, 2010, 2015, 2020]);
        assert_eq!(data.minor_ticks().len(), 21);
        assert_eq!(data.minor_ticks()[0], 2000);
    }

    #[test]
    fn ticks_extend_past_unaligned_range_end() {
        let mut data = chart(vec![]);
        data.years = YearRange {
            start: 2003,
            end: 2011,
        };
        assert_eq!(data.major_ticks(), vec![2000, 2005, 2010, 2015]);
    }

    #[test]
    fn fit_ignores_years_without_sales() {
        let data = chart(vec![
            (2001, 10.0),
            (2002, f64::NAN),
            (2003, 30.0),
            (2004, 40.0),
        ]);
        let fit = data.fit.unwrap();
        assert!((fit.slope - 10.0).abs() < 1e-6);
        assert_eq!(data.finite_points().count(), 3);
        assert_eq!(data.max_value(), 40.0);
    }

    #[test]
    fn labels_follow_statistic() {
        let data = chart(vec![(2001, 1.0)]);
        assert_eq!(data.title, StatKind::Mean.title());
        assert_eq!(data.y_label, "Mean Sale Price");
        assert_eq!(data.x_label, "Year");
        assert!(data.fit.is_none());
        assert!(data.fit_segment().is_none());
    }
}
