use eframe::egui::Pos2;
use egui_plot::{PlotPoint, PlotTransform};

use crate::data::model::SensorRecord;

/// Cursor distance, in screen points, within which a marker counts as hit.
pub const HIT_RADIUS: f32 = 5.0;

// ---------------------------------------------------------------------------
// Data → screen projection
// ---------------------------------------------------------------------------

/// Maps plot coordinates `[lon, lat]` to screen positions.
pub trait ScreenProjection {
    fn to_screen(&self, point: [f64; 2]) -> Pos2;
}

impl ScreenProjection for PlotTransform {
    fn to_screen(&self, point: [f64; 2]) -> Pos2 {
        self.position_from_point(&PlotPoint::new(point[0], point[1]))
    }
}

/// Where the pointer is relative to the plot's data area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pointer {
    Outside,
    Inside(Pos2),
}

// ---------------------------------------------------------------------------
// Hover handles
// ---------------------------------------------------------------------------

/// Floating text box anchored to a data point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    pub anchor: [f64; 2],
    pub text: String,
}

/// Enlarged marker drawn over the hovered sensor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    pub visible: bool,
    /// `None` until the first hit.
    pub position: Option<[f64; 2]>,
}

/// The mutable hover state of a session. Both handles start hidden.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverOverlay {
    pub tooltip: Tooltip,
    pub highlight: Highlight,
    /// Index into the filtered dataset of the hovered sensor.
    pub hovered: Option<usize>,
}

impl HoverOverlay {
    /// Update both handles for a pointer sample. Returns `true` when the
    /// overlay changed and a repaint should be requested.
    pub fn on_hover<P: ScreenProjection + ?Sized>(
        &mut self,
        pointer: Pointer,
        records: &[SensorRecord],
        projection: &P,
    ) -> bool {
        let before = self.clone();

        let hit = match pointer {
            Pointer::Outside => None,
            Pointer::Inside(cursor) => hit_test(cursor, records, projection, HIT_RADIUS),
        };

        match hit {
            Some(idx) => {
                let record = &records[idx];
                if self.hovered != Some(idx) {
                    log::debug!("hovering sensor {idx} ({:?})", record.serial);
                }
                self.tooltip.text = tooltip_text(record);
                self.tooltip.anchor = record.position();
                self.tooltip.visible = true;
                self.highlight.position = Some(record.position());
                self.highlight.visible = true;
                self.hovered = Some(idx);
            }
            None => self.hide(),
        }

        *self != before
    }

    pub fn hide(&mut self) {
        self.tooltip.visible = false;
        self.highlight.visible = false;
        self.hovered = None;
    }
}

/// Index of the first record whose marker lies within `radius` of `cursor`.
pub fn hit_test<P: ScreenProjection + ?Sized>(
    cursor: Pos2,
    records: &[SensorRecord],
    projection: &P,
    radius: f32,
) -> Option<usize> {
    records
        .iter()
        .position(|r| projection.to_screen(r.position()).distance(cursor) <= radius)
}

/// Multi-line description shown in the tooltip.
pub fn tooltip_text(record: &SensorRecord) -> String {
    const NA: &str = "N/A";
    format!(
        "Serial: {}\nLongitude: {:.4}\nLatitude: {:.4}\nSensorType: {}\nBeginTime: {}\nEndTime: {}",
        record.serial.as_deref().unwrap_or(NA),
        record.longitude,
        record.latitude,
        record.sensor_type.as_deref().unwrap_or(NA),
        record.begin_time.as_deref().unwrap_or(NA),
        record.end_time.as_deref().unwrap_or(NA),
    )
}
