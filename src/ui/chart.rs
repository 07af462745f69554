//! Chart rendering.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, VLine};

use crate::app::FlightExplorerApp;
use crate::chart::{ChartSpec, Trace, EMPTY_SELECTION_MESSAGE, NO_ROWS_MESSAGE};
use crate::pipeline::{timebase, TimeAxis};
use crate::state::trace_color;

/// Drawn points of one trace. Missing values are left out.
fn trace_points(trace: &Trace) -> Vec<[f64; 2]> {
    trace
        .points
        .iter()
        .filter(|p| p.y.is_finite())
        .map(|p| [p.x, p.y])
        .collect()
}

impl FlightExplorerApp {
    /// Render the main chart, or the reason there is none
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = &self.fatal_error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new(format!("Could not load flight data:\n{}", error))
                        .size(16.0)
                        .color(egui::Color32::from_rgb(191, 78, 48)),
                );
            });
            return;
        }

        let Some(chart) = self.chart.clone() else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Loading flight data...")
                        .size(18.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        };

        if chart.is_empty() {
            let message = if self.view.selected.is_empty() {
                EMPTY_SELECTION_MESSAGE
            } else {
                NO_ROWS_MESSAGE
            };
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new(message)
                        .size(18.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(&chart.layout.title).size(18.0).strong());
        });

        let hover_x = self.hover_x;
        let pointer_x = self.render_plot(ui, &chart, hover_x);

        self.hover_x = pointer_x
            .and_then(|x| chart.hover_readout(x))
            .map(|readout| readout.x);
    }

    /// Draw the plot and return the pointer x when hovered
    fn render_plot(&self, ui: &mut egui::Ui, chart: &ChartSpec, hover_x: Option<f64>) -> Option<f64> {
        let mut plot = Plot::new("flight_chart")
            .legend(Legend::default())
            .x_axis_label(chart.layout.x_axis_title.clone())
            .y_axis_label(chart.layout.y_axis_title.clone())
            .show_x(false)
            .show_y(false);

        if chart.x_axis == TimeAxis::Absolute {
            plot = plot.x_axis_formatter(|mark, _range| timebase::format_epoch_seconds(mark.value));
        }

        let response = plot.show(ui, |plot_ui| {
            for (i, trace) in chart.traces.iter().enumerate() {
                let color = trace_color(i);
                let color = egui::Color32::from_rgb(color[0], color[1], color[2]);
                let points = trace_points(trace);

                plot_ui.line(
                    Line::new(trace.name.clone(), PlotPoints::from(points.clone()))
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(trace.name.clone(), PlotPoints::from(points))
                        .color(color)
                        .radius(2.5),
                );
            }

            // Hover guide at the snapped bucket
            if let Some(x) = hover_x {
                plot_ui.vline(
                    VLine::new("Hover", x)
                        .color(egui::Color32::from_gray(160))
                        .width(1.0),
                );
            }

            plot_ui.pointer_coordinate().map(|p| p.x)
        });

        let pointer_x = response.inner;

        // Unified readout next to the pointer
        if let Some(readout) = pointer_x.and_then(|x| chart.hover_readout(x)) {
            response.response.on_hover_ui_at_pointer(|ui| {
                ui.label(egui::RichText::new(&readout.header).strong());
                for (i, line) in readout.lines.iter().enumerate() {
                    let color = trace_color(i);
                    ui.label(
                        egui::RichText::new(line)
                            .color(egui::Color32::from_rgb(color[0], color[1], color[2])),
                    );
                }
            });
        }

        pointer_x
    }
}
