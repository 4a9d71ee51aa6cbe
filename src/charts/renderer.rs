//! Static Chart Renderer
//! Writes the yearly bar chart to a PNG file with plotters.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. One bar per year with a value
//! 3. Orange marker line through the bar tops
//! 4. Red dashed best-fit line, labeled with its equation in the legend
//! 5. Year axis with major labels every few years (rotated) and a tick per year

use crate::charts::ChartData;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const MARKER_COLOR: RGBColor = RGBColor(255, 165, 0);
const FIT_COLOR: RGBColor = RGBColor(220, 20, 60);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

const FONT: &str = "sans-serif";
const BAR_HALF_WIDTH: f64 = 0.4;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing error: {0}")]
    Drawing(String),
    #[error("Nothing to chart: no year has a value")]
    NoData,
}

fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the chart into a PNG at `path`.
    pub fn render_png(
        data: &ChartData,
        path: &Path,
        size: (u32, u32),
    ) -> Result<(), RenderError> {
        if data.finite_points().next().is_none() {
            return Err(RenderError::NoData);
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(drawing)?;

        let majors = data.major_ticks();
        let minors = data.minor_ticks();
        let x_min = *majors.first().unwrap_or(&data.years.start) as f64 - 0.5;
        let x_max = *majors.last().unwrap_or(&data.years.end) as f64 + 0.5;
        let (y_min, y_max) = Self::value_bounds(data);

        debug!(x_min, x_max, y_min, y_max, "chart bounds");

        let mut chart = ChartBuilder::on(&root)
            .caption(&data.title, (FONT, 24).into_font())
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(110)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(drawing)?;

        // The year axis is drawn by hand below so only major years get labels
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_x_axis()
            .light_line_style(GRID_COLOR.stroke_width(1))
            .y_desc(data.y_label.as_str())
            .y_label_formatter(&|v| format!("{:.2}", v))
            .label_style((FONT, 14))
            .axis_desc_style((FONT, 16))
            .draw()
            .map_err(drawing)?;

        chart
            .draw_series(data.finite_points().map(|(year, value)| {
                let x = year as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, value)],
                    BAR_COLOR.filled(),
                )
            }))
            .map_err(drawing)?;

        let values: Vec<(f64, f64)> = data
            .finite_points()
            .map(|(year, value)| (year as f64, value))
            .collect();
        chart
            .draw_series(LineSeries::new(
                values.iter().copied(),
                MARKER_COLOR.stroke_width(1),
            ))
            .map_err(drawing)?;
        chart
            .draw_series(
                values
                    .iter()
                    .map(|&point| Circle::new(point, 4, MARKER_COLOR.filled())),
            )
            .map_err(drawing)?;

        if let (Some(fit), Some(segment)) = (data.fit, data.fit_segment()) {
            chart
                .draw_series(DashedLineSeries::new(
                    segment,
                    10,
                    6,
                    FIT_COLOR.stroke_width(2),
                ))
                .map_err(drawing)?
                .label(fit.equation())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &FIT_COLOR));

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .label_font((FONT, 14))
                .draw()
                .map_err(drawing)?;
        }

        // Year axis: a tick per year, longer ticks and rotated labels on majors
        let plotting_area = chart.plotting_area();
        let to_px = |year: f64| plotting_area.map_coordinate(&(year, y_min));
        let (px_start, axis_y) = to_px(x_min);
        let (px_end, _) = to_px(x_max);

        root.draw(&PathElement::new(
            vec![(px_start, axis_y), (px_end, axis_y)],
            &BLACK,
        ))
        .map_err(drawing)?;

        let label_style = TextStyle::from((FONT, 14).into_font())
            .transform(FontTransform::Rotate90)
            .pos(Pos::new(HPos::Left, VPos::Center));

        for year in &minors {
            let (px, _) = to_px(*year as f64);
            let is_major = majors.contains(year);
            let length = if is_major { 8 } else { 4 };
            root.draw(&PathElement::new(
                vec![(px, axis_y), (px, axis_y + length)],
                &BLACK,
            ))
            .map_err(drawing)?;

            if is_major {
                root.draw(&Text::new(
                    year.to_string(),
                    (px, axis_y + 12),
                    label_style.clone(),
                ))
                .map_err(drawing)?;
            }
        }

        root.draw(&Text::new(
            data.x_label.clone(),
            ((px_start + px_end) / 2, axis_y + 50),
            TextStyle::from((FONT, 16).into_font()),
        ))
        .map_err(drawing)?;

        root.present().map_err(drawing)?;

        info!(path = %path.display(), width = size.0, height = size.1, "chart written");
        Ok(())
    }

    /// Y bounds covering bars from zero and the whole best-fit segment, with
    /// some headroom.
    fn value_bounds(data: &ChartData) -> (f64, f64) {
        let segment = data.fit_segment();
        let fit_max = segment.map(|s| s[0].1.max(s[1].1)).unwrap_or(0.0);
        let fit_min = segment.map(|s| s[0].1.min(s[1].1)).unwrap_or(0.0);

        let top = data.max_value().max(fit_max);
        let top = if top > 0.0 { top * 1.1 } else { 1.0 };
        let bottom = fit_min.min(0.0) * 1.1;
        (bottom, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YearRange;
    use crate::stats::{StatKind, YearlySeries};

    fn chart(points: Vec<(i32, f64)>) -> ChartData {
        ChartData::from_series(
            &YearlySeries {
                kind: StatKind::Probability,
                points,
            },
            YearRange::default(),
            5,
        )
    }

    #[test]
    fn empty_chart_is_refused_before_drawing() {
        let data = chart(vec![(2001, f64::NAN), (2002, f64::NAN)]);
        let path = std::env::temp_dir().join("sales_stats_empty_chart.png");
        assert!(matches!(
            StaticChartRenderer::render_png(&data, &path, (640, 480)),
            Err(RenderError::NoData)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn renders_full_range_to_png() {
        let points = (2001..=2020)
            .map(|year| (year, 0.2 + (year - 2001) as f64 * 0.01))
            .collect();
        let data = chart(points);
        let path = std::env::temp_dir().join(format!(
            "sales_stats_chart_{}.png",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let result = StaticChartRenderer::render_png(&data, &path, (800, 600));
        let written = path.exists();
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok(), "{:?}", result);
        assert!(written);
    }

    #[test]
    fn bounds_include_zero_and_headroom() {
        let data = chart(vec![(2001, 0.5), (2002, 1.0)]);
        let (bottom, top) = StaticChartRenderer::value_bounds(&data);
        assert!(bottom <= 0.0);
        assert!(top >= 1.1 - 1e-9);
    }

    #[test]
    fn bounds_follow_negative_trend_extrapolation() {
        // Steep decline: the fitted line dips below zero by 2020
        let data = chart(vec![(2001, 100.0), (2002, 50.0), (2003, 0.0)]);
        let (bottom, _) = StaticChartRenderer::value_bounds(&data);
        let segment = data.fit_segment().unwrap();
        assert!(bottom <= segment[1].1);
    }
}
