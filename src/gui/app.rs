//! Sales Chart Application
//! Window hosting the chart viewer.

use crate::charts::ChartData;
use crate::gui::ChartViewer;

/// Main application window.
pub struct SalesChartApp {
    chart_viewer: ChartViewer,
}

impl SalesChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, chart_data: ChartData) -> Self {
        Self {
            chart_viewer: ChartViewer::new(chart_data),
        }
    }

    /// Open the window and block until it is closed.
    pub fn run(chart_data: ChartData) -> eframe::Result<()> {
        let title = chart_data.title.clone();
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 700.0])
                .with_min_inner_size([640.0, 480.0])
                .with_title(title.as_str()),
            ..Default::default()
        };

        eframe::run_native(
            &title,
            options,
            Box::new(|cc| Ok(Box::new(SalesChartApp::new(cc, chart_data)))),
        )
    }
}

impl eframe::App for SalesChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
