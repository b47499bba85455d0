use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, anyhow};
use eframe::egui::ColorImage;
use image::ImageReader;

use super::model::{Cell, RawDataset};
use crate::error::SessionError;

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load the sensor table from a CSV file.
///
/// The first row is the header; labels are kept exactly as written. Every
/// other row becomes one row of cells, typed with [`Cell::parse`]. Short rows
/// are padded with nulls.
pub fn load(path: &Path) -> Result<RawDataset, SessionError> {
    let file = File::open(path).map_err(|e| SessionError::from_io(path, e))?;
    let dataset = load_csv(BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;

    log::info!(
        "Loaded {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.column_names,
        path.display()
    );
    Ok(dataset)
}

/// Parse CSV from any reader.
pub fn load_csv<R: Read>(reader: R) -> anyhow::Result<RawDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let column_names: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        if record.len() > column_names.len() {
            return Err(anyhow!(
                "CSV row {row_no}: expected {} fields, saw {}",
                column_names.len(),
                record.len()
            ));
        }

        let mut row: Vec<Cell> = record.iter().map(Cell::parse).collect();
        row.resize(column_names.len(), Cell::null());
        rows.push(row);
    }

    Ok(RawDataset { column_names, rows })
}

// ---------------------------------------------------------------------------
// Background image
// ---------------------------------------------------------------------------

/// Decode the map image into RGBA pixels ready for upload as a texture.
pub fn load_background_image(path: &Path) -> Result<ColorImage, SessionError> {
    let file = File::open(path).map_err(|e| SessionError::from_io(path, e))?;

    let image = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .with_context(|| format!("detecting image format of {}", path.display()))?
        .decode()
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgba8();

    let size = [image.width() as usize, image.height() as usize];
    log::info!("Loaded map image {} ({}x{})", path.display(), size[0], size[1]);

    Ok(ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
