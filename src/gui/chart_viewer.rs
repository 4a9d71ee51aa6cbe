//! Chart Viewer Widget
//! Title, trend summary and the interactive bar chart for one statistic.

use crate::charts::{ChartData, ChartPlotter, FIT_COLOR};
use egui::RichText;

const CHART_SPACING: f32 = 10.0;

/// Displays a single yearly chart.
pub struct ChartViewer {
    pub chart_data: ChartData,
}

impl ChartViewer {
    pub fn new(chart_data: ChartData) -> Self {
        Self { chart_data }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&self.chart_data.title).size(20.0).strong());
        });
        ui.add_space(CHART_SPACING);

        match self.chart_data.fit {
            Some(fit) => {
                ui.label(
                    RichText::new(format!("Trend: {}", fit.equation()))
                        .size(13.0)
                        .color(FIT_COLOR),
                );
            }
            None => {
                ui.label(RichText::new("Trend: not enough years with sales").size(13.0));
            }
        }

        let missing = self
            .chart_data
            .points
            .iter()
            .filter(|(_, v)| !v.is_finite())
            .count();
        if missing > 0 {
            ui.label(
                RichText::new(format!("{} year(s) without sales are not shown", missing))
                    .size(11.0)
                    .italics(),
            );
        }

        ui.add_space(CHART_SPACING);
        ChartPlotter::draw_bar_chart(ui, &self.chart_data);
    }
}
