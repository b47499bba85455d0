use eframe::egui::TextureHandle;

use crate::data::model::{BoundingBox, FilteredDataset};
use crate::hover::HoverOverlay;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Everything the viewer needs after startup, independent of rendering.
pub struct SessionState {
    /// Sensors inside `bounds`, in file order. Never changes after startup.
    pub sensors: FilteredDataset,

    /// Geographic extent of the map image.
    pub bounds: BoundingBox,

    /// Rows read from the CSV before filtering.
    pub loaded_count: usize,

    /// Background map texture (None until the window exists).
    pub map_texture: Option<TextureHandle>,

    /// Tooltip and highlight, updated on every pointer move.
    pub overlay: HoverOverlay,
}

impl std::fmt::Debug for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionState")
            .field("sensors", &self.sensors)
            .field("bounds", &self.bounds)
            .field("loaded_count", &self.loaded_count)
            .field("map_texture", &self.map_texture.as_ref().map(|_| "TextureHandle"))
            .field("overlay", &self.overlay)
            .finish()
    }
}

impl SessionState {
    pub fn new(sensors: FilteredDataset, bounds: BoundingBox, loaded_count: usize) -> Self {
        Self {
            sensors,
            bounds,
            loaded_count,
            map_texture: None,
            overlay: HoverOverlay::default(),
        }
    }

    /// Attach the uploaded background texture.
    pub fn set_map_texture(&mut self, texture: TextureHandle) {
        self.map_texture = Some(texture);
    }
}
