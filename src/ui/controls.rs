//! Title bar and view controls.

use eframe::egui;
use strum::IntoEnumIterator;

use crate::app::{FlightExplorerApp, APP_TITLE};
use crate::pipeline::{timebase, TimeAxis};
use crate::state::{FilterMode, LoadingState, SUPPORTED_EXTENSIONS};

impl FlightExplorerApp {
    /// Render the title row with file actions
    pub fn render_title_bar(&mut self, ui: &mut egui::Ui) {
        let is_loading = matches!(self.loading_state, LoadingState::Loading(_));

        ui.horizontal(|ui| {
            ui.heading(APP_TITLE);
            ui.separator();

            if let LoadingState::Loading(filename) = &self.loading_state {
                ui.spinner();
                ui.label(format!("Loading {}...", filename));
            } else if let Some(flight) = &self.flight {
                ui.label(
                    egui::RichText::new(format!("{} ({} rows)", flight.name, flight.table.len()))
                        .color(egui::Color32::GRAY),
                );
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!is_loading, egui::Button::new("Reload"))
                    .clicked()
                {
                    self.reload();
                }
                if ui
                    .add_enabled(!is_loading, egui::Button::new("Open..."))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Flight Logs", SUPPORTED_EXTENSIONS)
                        .pick_file()
                    {
                        self.start_loading_file(path);
                    }
                }
            });
        });
    }

    /// Render every control bound to [`crate::state::ViewState`]
    pub fn render_controls(&mut self, ui: &mut egui::Ui) {
        let Some(flight) = &self.flight else {
            ui.label(egui::RichText::new("No flight loaded").color(egui::Color32::GRAY));
            return;
        };

        let plottable: Vec<String> = flight
            .table
            .plottable_columns()
            .into_iter()
            .map(str::to_string)
            .collect();

        egui::ScrollArea::vertical().show(ui, |ui| {
            // Column selection
            ui.label(egui::RichText::new("Select columns to plot:").strong());
            ui.add_space(4.0);
            if plottable.is_empty() {
                ui.label(
                    egui::RichText::new("No numeric columns in this file")
                        .color(egui::Color32::GRAY),
                );
            }
            for name in &plottable {
                let mut checked = self.view.is_selected(name);
                if ui.checkbox(&mut checked, name.as_str()).changed() {
                    self.view.toggle_column(name);
                }
            }

            ui.add_space(8.0);
            ui.separator();

            ui.checkbox(&mut self.view.normalize, "Normalize data (0 to 1 range)");

            ui.add_space(8.0);
            ui.separator();

            self.render_time_filter(ui);

            ui.add_space(8.0);
            ui.separator();

            ui.label(egui::RichText::new("X-axis:").strong());
            for axis in TimeAxis::iter() {
                ui.radio_value(&mut self.view.x_axis, axis, axis.as_ref());
            }

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Bin size:");
                ui.add(
                    egui::DragValue::new(&mut self.view.bin_size)
                        .speed(0.05)
                        .max_decimals(3)
                        .suffix(" s"),
                );
            });
        });
    }

    /// Filter mode radio and the range sliders for the active mode
    fn render_time_filter(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Filter by time:").strong());
        for mode in FilterMode::iter() {
            ui.radio_value(&mut self.view.filter_mode, mode, mode.as_ref());
        }

        match self.view.filter_mode {
            FilterMode::None => {}
            FilterMode::Elapsed => {
                let (min, max) = self.view.elapsed_bounds;
                ui.label("Select time range (seconds):");
                ui.add(
                    egui::Slider::new(&mut self.view.elapsed_range.0, min..=max)
                        .text("start")
                        .clamping(egui::SliderClamping::Always),
                );
                ui.add(
                    egui::Slider::new(&mut self.view.elapsed_range.1, min..=max)
                        .text("end")
                        .clamping(egui::SliderClamping::Always),
                );
            }
            FilterMode::Absolute => {
                let (min, max) = self.view.absolute_bounds;
                ui.label("Select datetime range:");
                ui.add(
                    egui::Slider::new(&mut self.view.absolute_range.0, min..=max)
                        .text("start")
                        .step_by(1.0)
                        .clamping(egui::SliderClamping::Always)
                        .custom_formatter(|v, _| timebase::format_epoch_seconds(v)),
                );
                ui.add(
                    egui::Slider::new(&mut self.view.absolute_range.1, min..=max)
                        .text("end")
                        .step_by(1.0)
                        .clamping(egui::SliderClamping::Always)
                        .custom_formatter(|v, _| timebase::format_epoch_seconds(v)),
                );
            }
        }
    }
}
