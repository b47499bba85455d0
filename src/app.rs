use eframe::egui;

use crate::state::SessionState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct GrowMapApp {
    pub state: SessionState,
}

impl GrowMapApp {
    pub fn new(state: SessionState) -> Self {
        Self { state }
    }
}

impl eframe::App for GrowMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: map + hover ----
        let anchor = egui::CentralPanel::default()
            .show(ctx, |ui| plot::sensor_map(ui, &mut self.state).inner)
            .inner;

        if let Some(anchor) = anchor {
            panels::tooltip(ctx, &self.state.overlay.tooltip, anchor);
        }
    }
}
