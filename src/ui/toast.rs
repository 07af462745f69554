//! Transient notices for load results and rolled back control values.

use eframe::egui;

use crate::app::FlightExplorerApp;

fn rgb([r, g, b]: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(r, g, b)
}

impl FlightExplorerApp {
    /// Draw the current toast along the bottom edge of the window
    pub fn render_toast(&mut self, ctx: &egui::Context) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
        let Some(toast) = &self.toast else {
            return;
        };

        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -16.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(rgb(toast.kind.color()))
                    .show(ui, |ui| {
                        ui.set_max_width(420.0);
                        ui.label(
                            egui::RichText::new(&toast.message)
                                .color(rgb(toast.kind.text_color())),
                        );
                    });
            });

        ctx.request_repaint_after(toast.remaining());
    }
}
