use eframe::egui::{Color32, Pos2, Ui, Vec2};
use egui_plot::{
    Legend, MarkerShape, Plot, PlotImage, PlotPoint, PlotPoints, PlotResponse, Points,
};

use crate::hover::{Pointer, ScreenProjection};
use crate::state::SessionState;

pub const SCATTER_NAME: &str = "Sensor Locations";
const MARKER_RADIUS: f32 = 2.5;
const HIGHLIGHT_RADIUS: f32 = 5.0;

// ---------------------------------------------------------------------------
// Sensor map (central panel)
// ---------------------------------------------------------------------------

/// Draw the map, the sensor scatter and the hover highlight, and run the
/// hover handler for this frame.
///
/// The response's `inner` is the screen anchor of the tooltip when it is
/// visible.
pub fn sensor_map(ui: &mut Ui, state: &mut SessionState) -> PlotResponse<Option<Pos2>> {
    let SessionState {
        sensors,
        bounds,
        map_texture,
        overlay,
        ..
    } = state;

    let scatter_color = Color32::from_rgba_unmultiplied(0, 0, 255, 153);
    let highlight_color = Color32::from_rgba_unmultiplied(255, 0, 0, 179);

    Plot::new("sensor_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .include_x(bounds.lon_min)
        .include_x(bounds.lon_max)
        .include_y(bounds.lat_min)
        .include_y(bounds.lat_max)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // Map stretched over the bounding box.
            if let Some(texture) = map_texture {
                let [cx, cy] = bounds.center();
                plot_ui.image(PlotImage::new(
                    texture.id(),
                    PlotPoint::new(cx, cy),
                    Vec2::new(bounds.width() as f32, bounds.height() as f32),
                ));
            }

            let points: PlotPoints = sensors.iter().map(|s| s.position()).collect();
            plot_ui.points(
                Points::new(points)
                    .name(SCATTER_NAME)
                    .color(scatter_color)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(MARKER_RADIUS),
            );

            let in_frame = |pos: Pos2| plot_ui.transform().frame().contains(pos);
            let pointer = match plot_ui.ctx().input(|i| i.pointer.hover_pos()) {
                Some(pos) if plot_ui.response().hovered() && in_frame(pos) => Pointer::Inside(pos),
                _ => Pointer::Outside,
            };

            if overlay.on_hover(pointer, sensors.as_slice(), plot_ui.transform()) {
                plot_ui.ctx().request_repaint();
            }

            if overlay.highlight.visible {
                if let Some(position) = overlay.highlight.position {
                    plot_ui.points(
                        Points::new(PlotPoints::new(vec![position]))
                            .color(highlight_color)
                            .shape(MarkerShape::Circle)
                            .filled(true)
                            .radius(HIGHLIGHT_RADIUS),
                    );
                }
            }

            overlay
                .tooltip
                .visible
                .then(|| plot_ui.transform().to_screen(overlay.tooltip.anchor))
        })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use eframe::egui::{self, ColorImage, Rect, TextureOptions};

    use super::*;
    use crate::data::model::{BoundingBox, SensorRecord};

    fn input(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))),
            events,
            ..Default::default()
        }
    }

    fn render_once(
        ctx: &egui::Context,
        state: &mut SessionState,
        events: Vec<egui::Event>,
    ) -> PlotResponse<Option<Pos2>> {
        let mut response = None;
        let _ = ctx.run(input(events), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                response = Some(sensor_map(ui, state));
            });
        });
        response.expect("central panel always shows the plot")
    }

    fn sensor(lon: f64, lat: f64) -> SensorRecord {
        SensorRecord {
            serial: Some("PI0001".into()),
            longitude: lon,
            latitude: lat,
            sensor_type: None,
            begin_time: None,
            end_time: None,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn renders_empty_dataset() {
        let ctx = egui::Context::default();
        let mut state = SessionState::new(Vec::new(), BoundingBox::UK, 3);
        let blank = ColorImage::new([2, 2], Color32::WHITE);
        state.set_map_texture(ctx.load_texture("map", blank, TextureOptions::LINEAR));

        assert_eq!(render_once(&ctx, &mut state, Vec::new()).inner, None);
        assert!(!state.overlay.tooltip.visible);
        assert!(!state.overlay.highlight.visible);
    }

    #[test]
    fn renders_sensors_without_pointer() {
        let ctx = egui::Context::default();
        let mut state = SessionState::new(vec![sensor(-1.5, 52.0)], BoundingBox::UK, 1);

        assert_eq!(render_once(&ctx, &mut state, Vec::new()).inner, None);
        assert_eq!(state.overlay.hovered, None);
    }

    #[test]
    fn pointer_over_sensor_shows_tooltip_then_leaving_hides_it() {
        let ctx = egui::Context::default();
        let mut state = SessionState::new(
            vec![sensor(-4.0, 55.0), sensor(-1.5, 52.0)],
            BoundingBox::UK,
            2,
        );

        // First frame lays the plot out so the pointer can be placed on a marker.
        let first = render_once(&ctx, &mut state, Vec::new());
        let target = first.transform.to_screen([-1.5, 52.0]);
        assert!(first.transform.frame().contains(target));

        let moved = vec![egui::Event::PointerMoved(target)];
        render_once(&ctx, &mut state, moved.clone());
        let anchor = render_once(&ctx, &mut state, moved).inner;

        assert_eq!(state.overlay.hovered, Some(1));
        assert!(state.overlay.tooltip.visible);
        assert!(state.overlay.highlight.visible);
        assert!(state.overlay.tooltip.text.contains("Longitude: -1.5000"));
        let anchor = anchor.expect("tooltip anchor while hovering");
        assert!(anchor.distance(target) < 1.0);

        // Pointer in the window but outside the plot frame.
        let outside = vec![egui::Event::PointerMoved(Pos2::new(1.0, 1.0))];
        assert_eq!(render_once(&ctx, &mut state, outside).inner, None);
        assert!(!state.overlay.tooltip.visible);
        assert!(!state.overlay.highlight.visible);

        render_once(&ctx, &mut state, vec![egui::Event::PointerGone]);
        assert_eq!(state.overlay.hovered, None);
    }
}
