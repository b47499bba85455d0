use std::sync::OnceLock;

use regex::Regex;

use super::model::{Cell, CellValue, RawDataset};

/// Column holding the sensor serial number.
pub const SERIAL: &str = "Serial";
pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";

fn serial_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\bPI[0-9A-Z]+\b").expect("serial pattern is valid"))
}

/// Extract the `PI…` core of a serial number, if present.
pub fn extract_serial(raw: &str) -> Option<&str> {
    serial_pattern().find(raw).map(|m| m.as_str())
}

/// Reduce every `Serial` cell to its `PI…` code. Cells without one become null.
///
/// Datasets without a `Serial` column are returned unchanged.
pub fn normalize_serial(mut dataset: RawDataset) -> RawDataset {
    let Some(idx) = dataset.column_index(SERIAL) else {
        return dataset;
    };

    let mut unmatched = 0usize;
    for row in &mut dataset.rows {
        let cell = &mut row[idx];
        if cell.value.is_null() {
            continue;
        }
        let normalized = match extract_serial(&cell.text) {
            Some(code) => Cell {
                text: code.to_string(),
                value: CellValue::String(code.to_string()),
            },
            None => {
                unmatched += 1;
                Cell::null()
            }
        };
        *cell = normalized;
    }

    if unmatched > 0 {
        log::debug!("{unmatched} serial values had no PI code");
    }
    dataset
}

/// Swap the `Latitude` and `Longitude` labels.
///
/// The source file stores longitudes under "Latitude" and latitudes under
/// "Longitude"; only the labels move, the data stays where it is. Applying
/// this twice restores the original labelling.
pub fn correct_axes(mut dataset: RawDataset) -> RawDataset {
    for name in &mut dataset.column_names {
        if name == LATITUDE {
            *name = LONGITUDE.to_string();
        } else if name == LONGITUDE {
            *name = LATITUDE.to_string();
        }
    }
    dataset
}
