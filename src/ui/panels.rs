use eframe::egui::{self, Color32, Pos2, RichText, Ui};

use crate::hover::Tooltip;
use crate::state::SessionState;

pub const TITLE: &str = "Plot of GrowData Sensors Over UK";

/// Offset of the tooltip box from its anchor, in points (right, up).
const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(50.0, -50.0);

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Title and sensor counts above the map.
pub fn top_bar(ui: &mut Ui, state: &SessionState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(TITLE);
        ui.separator();
        ui.label(format!(
            "{} sensors loaded, {} inside the map",
            state.loaded_count,
            state.sensors.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Tooltip
// ---------------------------------------------------------------------------

/// Rounded white box with the hovered sensor's details.
pub fn tooltip(ctx: &egui::Context, tooltip: &Tooltip, anchor: Pos2) {
    egui::Area::new(egui::Id::new("sensor_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(anchor + TOOLTIP_OFFSET)
        .interactable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::Frame::popup(ui.style())
                .fill(Color32::WHITE)
                .show(ui, |ui: &mut Ui| {
                    ui.label(RichText::new(&tooltip.text).color(Color32::BLACK).monospace());
                });
        });
}
