use anyhow::anyhow;
use eframe::egui::{self, ColorImage, TextureOptions};

use crate::app::GrowMapApp;
use crate::config::SessionConfig;
use crate::data::clean::{correct_axes, normalize_serial};
use crate::data::filter::filter_to_box;
use crate::data::loader;
use crate::error::SessionError;
use crate::state::SessionState;
use crate::ui::panels::TITLE;

/// Load, clean and filter the sensors and decode the map image.
///
/// Nothing here touches the window system, so every startup failure is
/// reported before a window is opened.
pub fn prepare(config: &SessionConfig) -> Result<(SessionState, ColorImage), SessionError> {
    let raw = loader::load(&config.data_path)?;
    let loaded_count = raw.len();

    let corrected = correct_axes(normalize_serial(raw));
    let sensors = filter_to_box(&corrected, &config.bounds)?;

    let map_image = loader::load_background_image(&config.image_path)?;

    Ok((SessionState::new(sensors, config.bounds, loaded_count), map_image))
}

/// Run the viewer until the user closes the window.
pub fn run(config: SessionConfig) -> Result<(), SessionError> {
    let (mut state, map_image) = prepare(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GrowData Sensor Map",
        options,
        Box::new(move |cc| {
            let texture = cc
                .egui_ctx
                .load_texture("map", map_image, TextureOptions::LINEAR);
            state.set_map_texture(texture);
            Ok(Box::new(GrowMapApp::new(state)))
        }),
    )
    .map_err(|e| anyhow!("window system failed: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    struct Fixture {
        dir: PathBuf,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir()
                .join(format!("grow-map-session-{}-{name}", std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            Fixture { dir }
        }

        fn config(&self) -> SessionConfig {
            SessionConfig {
                data_path: self.dir.join("GrowLocations.csv"),
                image_path: self.dir.join("map7.png"),
                ..SessionConfig::default()
            }
        }

        fn write_csv(&self, text: &str) {
            std::fs::write(self.dir.join("GrowLocations.csv"), text).unwrap();
        }

        fn write_png(&self) {
            image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 220, 255, 255]))
                .save(self.dir.join("map7.png"))
                .unwrap();
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.dir).ok();
        }
    }

    #[test]
    fn prepares_filtered_state() {
        let fx = Fixture::new("ok");
        fx.write_csv(
            "Serial,Latitude,Longitude,SensorType\n\
             PI040298AD-x,-1.5,52.0,Soil\n\
             PI999,40.0,52.0,Soil\n",
        );
        fx.write_png();

        let (state, image) = prepare(&fx.config()).unwrap();
        assert_eq!(state.loaded_count, 2);
        assert_eq!(state.sensors.len(), 1);
        assert_eq!(state.sensors[0].serial.as_deref(), Some("PI040298AD"));
        assert!(state.map_texture.is_none());
        assert!(!state.overlay.tooltip.visible);
        assert_eq!(image.size, [8, 8]);
    }

    #[test]
    fn zero_sensors_in_box_still_prepares() {
        let fx = Fixture::new("empty");
        fx.write_csv("Serial,Latitude,Longitude\nPI1,100.0,0.0\n");
        fx.write_png();

        let (state, _) = prepare(&fx.config()).unwrap();
        assert!(state.sensors.is_empty());
    }

    #[test]
    fn missing_csv_aborts() {
        let fx = Fixture::new("nocsv");
        fx.write_png();
        let err = prepare(&fx.config()).unwrap_err();
        assert!(err.console_message().starts_with("Error: File not found."));
    }

    #[test]
    fn missing_image_aborts() {
        let fx = Fixture::new("nopng");
        fx.write_csv("Serial,Latitude,Longitude\nPI1,-1.0,52.0\n");
        let err = prepare(&fx.config()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::FileNotFound { ref path, .. } if path.ends_with("map7.png")
        ));
    }

    #[test]
    fn missing_coordinate_column_aborts() {
        let fx = Fixture::new("nocol");
        fx.write_csv("Serial,Longitude\nPI1,52.0\n");
        fx.write_png();
        let err = prepare(&fx.config()).unwrap_err();
        assert!(err
            .console_message()
            .starts_with("Error: Missing expected column in the dataset."));
    }

    #[test]
    fn padded_header_is_a_missing_column() {
        let fx = Fixture::new("padded");
        fx.write_csv("Serial, Latitude,Longitude\nPI1,-1.0,52.0\n");
        fx.write_png();
        let err = prepare(&fx.config()).unwrap_err();
        assert!(matches!(err, SessionError::MissingColumn(ref c) if c == "Longitude"));
    }

    #[test]
    fn text_coordinate_aborts() {
        let fx = Fixture::new("text");
        fx.write_csv("Serial,Latitude,Longitude\nPI1,west,52.0\n");
        fx.write_png();
        let err = prepare(&fx.config()).unwrap_err();
        assert!(err
            .console_message()
            .starts_with("An unexpected error occurred: "));
    }
}
