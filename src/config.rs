use std::path::PathBuf;

use crate::data::model::BoundingBox;

// ---------------------------------------------------------------------------
// Session configuration
// ---------------------------------------------------------------------------

/// Inputs and window geometry for one viewer session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Sensor CSV.
    pub data_path: PathBuf,
    /// Background map, stretched over `bounds`.
    pub image_path: PathBuf,
    pub bounds: BoundingBox,
    /// Initial inner window size in points.
    pub window_size: [f32; 2],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("GrowLocations.csv"),
            image_path: PathBuf::from("map7.png"),
            bounds: BoundingBox::UK,
            window_size: [1200.0, 1000.0],
        }
    }
}
