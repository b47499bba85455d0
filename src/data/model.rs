use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the CSV table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, guessed from the CSV text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw CSV field.
    pub fn guess(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::String(s.to_string()),
        }
    }

    /// Numeric view used for coordinates. NaN is treated as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Cell – source text plus its typed value
// ---------------------------------------------------------------------------

/// One CSV field. The text is kept verbatim for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub value: CellValue,
}

impl Cell {
    pub fn parse(text: &str) -> Self {
        Cell {
            text: text.to_string(),
            value: CellValue::guess(text.trim()),
        }
    }

    pub fn null() -> Self {
        Cell {
            text: String::new(),
            value: CellValue::Null,
        }
    }

    /// Source text for tooltips; `None` for null cells.
    pub fn display_text(&self) -> Option<String> {
        (!self.value.is_null()).then(|| self.text.clone())
    }
}

// ---------------------------------------------------------------------------
// RawDataset – the table as read from disk
// ---------------------------------------------------------------------------

/// Column labels plus rows of cells, addressed by column position.
///
/// Labels and data are stored separately so that relabelling a column never
/// moves any values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub column_names: Vec<String>,
    /// Every row has exactly `column_names.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl RawDataset {
    /// Position of a column by label.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SensorRecord – one row after cleaning and filtering
// ---------------------------------------------------------------------------

/// A sensor that survived the bounding-box filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    /// Normalised `PI…` code, if one was found.
    pub serial: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub sensor_type: Option<String>,
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
    /// Any other columns, untouched.
    pub extra: BTreeMap<String, CellValue>,
}

impl SensorRecord {
    /// Plot position as `[x, y]`.
    pub fn position(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Records inside the bounding box, in source file order.
pub type FilteredDataset = Vec<SensorRecord>;

// ---------------------------------------------------------------------------
// BoundingBox
// ---------------------------------------------------------------------------

/// Rectangular geographic extent in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Extent of the UK map image.
    pub const UK: BoundingBox = BoundingBox {
        lon_min: -10.592,
        lon_max: 1.6848,
        lat_min: 50.681,
        lat_max: 57.985,
    };

    /// Inclusive on all four edges.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat)
            && (self.lon_min..=self.lon_max).contains(&lon)
    }

    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.lon_min + self.lon_max) / 2.0,
            (self.lat_min + self.lat_max) / 2.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_cell_types() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("-3.25"), CellValue::Float(-3.25));
        assert_eq!(CellValue::guess("True"), CellValue::Bool(true));
        assert_eq!(
            CellValue::guess("PI040298AD"),
            CellValue::String("PI040298AD".into())
        );
    }

    #[test]
    fn nan_is_not_a_coordinate() {
        assert_eq!(CellValue::guess("NaN").as_f64(), None);
        assert_eq!(CellValue::Integer(2).as_f64(), Some(2.0));
        assert_eq!(CellValue::String("51.5x".into()).as_f64(), None);
    }

    #[test]
    fn cell_keeps_source_text() {
        let flag = Cell::parse("True");
        assert_eq!(flag.value, CellValue::Bool(true));
        assert_eq!(flag.display_text().as_deref(), Some("True"));

        let year = Cell::parse("1.0");
        assert_eq!(year.value, CellValue::Float(1.0));
        assert_eq!(year.display_text().as_deref(), Some("1.0"));

        assert_eq!(Cell::parse("").display_text(), None);
        assert_eq!(Cell::null().display_text(), None);
    }

    #[test]
    fn uk_box_is_inclusive() {
        let b = BoundingBox::UK;
        assert!(b.contains(-10.592, 50.681));
        assert!(b.contains(1.6848, 57.985));
        assert!(!b.contains(1.6849, 55.0));
        assert!(!b.contains(0.0, 50.6809));
    }
}
