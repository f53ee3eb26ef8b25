//! NEO CSV loader
//!
//! Reads the NEO catalogue, a header-bearing CSV file where each field sits at
//! a fixed position, and turns every data row into a [`NearEarthObject`].
//!
//! # Field Conventions
//!
//! | Column | Field        | Rule                                         |
//! |--------|--------------|----------------------------------------------|
//! | 3      | designation  | required, non-empty                          |
//! | 4      | name         | empty or absent → unnamed, otherwise as-is   |
//! | 7      | pha          | exactly `Y` → hazardous, anything else → not |
//! | 15     | diameter     | empty, absent or `nan` → unknown             |
//!
//! # Error Handling
//!
//! [`NeoReader`] yields one `Result` per row, so the caller decides whether a
//! malformed row aborts the load or is skipped. [`load_neos`] takes the strict
//! route and stops at the first error. Rows are never deduplicated.

use crate::io::open_input;
use crate::types::{NearEarthObject, NeoError};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const DESIGNATION_FIELD: usize = 3;
pub const NAME_FIELD: usize = 4;
pub const PHA_FIELD: usize = 7;
pub const DIAMETER_FIELD: usize = 15;

/// Marker in the pha column flagging a Potentially Hazardous Asteroid
pub const HAZARDOUS_MARKER: &str = "Y";

/// Convert one CSV row into a NearEarthObject
///
/// # Arguments
///
/// * `record` - The raw CSV row
/// * `line` - Line number of the row, used in error messages
///
/// # Returns
///
/// * `Ok(NearEarthObject)` - Normalized, unlinked record
/// * `Err(NeoError)` - Missing designation or non-numeric diameter
pub fn parse_neo_record(record: &StringRecord, line: u64) -> Result<NearEarthObject, NeoError> {
    let label = format!("line {}", line);

    let designation = record
        .get(DESIGNATION_FIELD)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| NeoError::missing_field(&label, "designation"))?;

    let name = record
        .get(NAME_FIELD)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    let hazardous = record.get(PHA_FIELD).map(str::trim) == Some(HAZARDOUS_MARKER);

    let diameter = match record.get(DIAMETER_FIELD) {
        Some(raw) => parse_diameter(raw)
            .ok_or_else(|| NeoError::invalid_number(&label, "diameter", raw))?,
        None => None,
    };

    Ok(NearEarthObject::new(designation, name, diameter, hazardous))
}

/// Parse a diameter field
///
/// The outer `Option` is `None` when the text is not a number; the inner one
/// is `None` when the diameter is unknown (empty field or the textual NaN form
/// written by the CSV serializer).
pub fn parse_diameter(raw: &str) -> Option<Option<f64>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    raw.parse::<f64>().ok().map(Some)
}

/// Streaming reader over the rows of a NEO CSV source
///
/// # Examples
///
/// ```no_run
/// use neo_close_approaches::io::NeoReader;
/// use std::path::Path;
///
/// let reader = NeoReader::from_path(Path::new("data/neos.csv")).unwrap();
/// let neos: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Loaded {} NEOs", neos.len());
/// ```
#[derive(Debug)]
pub struct NeoReader<R: Read> {
    reader: csv::Reader<R>,
}

impl NeoReader<File> {
    /// Open a NEO CSV file
    ///
    /// A missing file is reported as `FileNotFound`; any other open failure as `IoError`.
    pub fn from_path(path: &Path) -> Result<Self, NeoError> {
        Ok(Self::new(open_input(path)?))
    }
}

impl<R: Read> NeoReader<R> {
    /// Wrap an already-opened source
    ///
    /// The reader skips exactly one header row and accepts rows of varying
    /// length; short rows are caught by the field rules. Fields are not
    /// trimmed here, since the name column is kept verbatim.
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(source);

        Self { reader }
    }
}

impl<R: Read> Iterator for NeoReader<R> {
    type Item = Result<NearEarthObject, NeoError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();

        match self.reader.read_record(&mut record) {
            Ok(true) => {
                let line = record.position().map(|pos| pos.line()).unwrap_or_default();
                Some(parse_neo_record(&record, line))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Load every NEO from a CSV source, stopping at the first malformed row
pub fn load_neos<R: Read>(source: R) -> Result<Vec<NearEarthObject>, NeoError> {
    let neos = NeoReader::new(source).collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count = neos.len(), "loaded near-Earth objects");
    Ok(neos)
}
