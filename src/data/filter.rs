use std::collections::BTreeMap;

use anyhow::anyhow;

use super::clean::{LATITUDE, LONGITUDE, SERIAL};
use super::model::{BoundingBox, Cell, CellValue, FilteredDataset, RawDataset, SensorRecord};
use crate::error::SessionError;

pub const SENSOR_TYPE: &str = "SensorType";
pub const BEGIN_TIME: &str = "BeginTime";
pub const END_TIME: &str = "EndTime";

// ---------------------------------------------------------------------------
// Bounding-box predicate
// ---------------------------------------------------------------------------

/// Keep the rows whose corrected coordinates fall inside `bounds`.
///
/// A row passes when:
/// * `Latitude` and `Longitude` are both present, and
/// * both lie within the box, edges included.
///
/// Empty or NaN coordinates never pass. A text coordinate cannot be compared
/// with the box and aborts the filter. Source order is preserved.
pub fn filter_to_box(
    dataset: &RawDataset,
    bounds: &BoundingBox,
) -> Result<FilteredDataset, SessionError> {
    let lat_idx = dataset
        .column_index(LATITUDE)
        .ok_or_else(|| SessionError::MissingColumn(LATITUDE.to_string()))?;
    let lon_idx = dataset
        .column_index(LONGITUDE)
        .ok_or_else(|| SessionError::MissingColumn(LONGITUDE.to_string()))?;

    let mut missing = 0usize;
    let mut records = FilteredDataset::new();

    for (row_no, row) in dataset.rows.iter().enumerate() {
        let lat = coordinate(&row[lat_idx], LATITUDE, row_no)?;
        let lon = coordinate(&row[lon_idx], LONGITUDE, row_no)?;
        let (Some(lat), Some(lon)) = (lat, lon) else {
            missing += 1;
            continue;
        };
        if bounds.contains(lon, lat) {
            records.push(to_record(dataset, row, lon, lat, lat_idx, lon_idx));
        }
    }

    if missing > 0 {
        log::debug!("{missing} rows dropped for missing coordinates");
    }
    log::info!(
        "{} of {} sensors inside the bounding box",
        records.len(),
        dataset.len()
    );
    Ok(records)
}

/// Numeric value of a coordinate cell; `None` when it is empty or NaN.
fn coordinate(cell: &Cell, column: &str, row_no: usize) -> anyhow::Result<Option<f64>> {
    match &cell.value {
        CellValue::Null => Ok(None),
        CellValue::Float(v) if v.is_nan() => Ok(None),
        value => value.as_f64().map(Some).ok_or_else(|| {
            anyhow!(
                "row {row_no}: '{column}' value {:?} cannot be compared with the bounding box",
                cell.text
            )
        }),
    }
}

fn to_record(
    dataset: &RawDataset,
    row: &[Cell],
    longitude: f64,
    latitude: f64,
    lat_idx: usize,
    lon_idx: usize,
) -> SensorRecord {
    let text = |name: &str| {
        dataset
            .column_index(name)
            .and_then(|i| row[i].display_text())
    };

    let known = [SERIAL, SENSOR_TYPE, BEGIN_TIME, END_TIME];
    let extra: BTreeMap<String, CellValue> = dataset
        .column_names
        .iter()
        .enumerate()
        .filter(|(i, name)| *i != lat_idx && *i != lon_idx && !known.contains(&name.as_str()))
        .map(|(i, name)| (name.clone(), row[i].value.clone()))
        .collect();

    SensorRecord {
        serial: text(SERIAL),
        longitude,
        latitude,
        sensor_type: text(SENSOR_TYPE),
        begin_time: text(BEGIN_TIME),
        end_time: text(END_TIME),
        extra,
    }
}
