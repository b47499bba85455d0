/// Data layer: core types, loading, cleaning and filtering.
///
/// Architecture:
/// ```text
///  GrowLocations.csv           map7.png
///        │                        │
///        ▼                        ▼
///   ┌──────────┐          ┌───────────────┐
///   │  loader   │          │ loader (image) │
///   └──────────┘          └───────────────┘
///        │  RawDataset            │  ColorImage
///        ▼                        ▼
///   ┌──────────┐                 ...to the UI
///   │  clean    │  serial → PI code, swap Latitude/Longitude labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  bounding box → Vec<SensorRecord>
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
