//! CSV serialization of linked close approaches
//!
//! One row per approach with a fixed column order. CSV has no null, so an
//! unnamed NEO gets an empty `name` and an unknown diameter is written as `nan`.

use super::{format_diameter, format_float, ResultWriter};
use crate::types::{LinkedApproach, NeoError};
use csv::Writer;
use std::io::Write;

/// Output header, in column order
pub const CSV_HEADER: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

/// Writer producing the flat CSV format
#[derive(Debug, Clone, Copy)]
pub struct CsvResultWriter;

impl ResultWriter for CsvResultWriter {
    fn write(
        &self,
        results: &[LinkedApproach<'_>],
        output: &mut dyn Write,
    ) -> Result<usize, NeoError> {
        write_to_csv(results, output)
    }
}

/// Write linked close approaches as CSV
///
/// # Arguments
///
/// * `results` - Linked approaches, written in the given order
/// * `output` - Destination for the CSV text
///
/// # Returns
///
/// * `Ok(usize)` - Number of data rows written
/// * `Err(NeoError::OutputWrite)` - A write or flush failed
pub fn write_to_csv(
    results: &[LinkedApproach<'_>],
    output: &mut dyn Write,
) -> Result<usize, NeoError> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| NeoError::output_write(format!("Failed to write CSV header: {}", e)))?;

    for linked in results {
        let approach = linked.approach();
        let neo = linked.neo();
        writer
            .write_record(&[
                approach.time_str(),
                format_float(approach.distance()),
                format_float(approach.velocity()),
                neo.designation().to_string(),
                neo.name().unwrap_or_default().to_string(),
                format_diameter(neo.diameter()),
                hazard_label(neo.hazardous()).to_string(),
            ])
            .map_err(|e| NeoError::output_write(format!("Failed to write CSV row: {}", e)))?;
    }

    writer
        .flush()
        .map_err(|e| NeoError::output_write(format!("Failed to flush output: {}", e)))?;

    tracing::debug!(rows = results.len(), "wrote close approaches as CSV");
    Ok(results.len())
}

/// Capitalised spelling used by the hazard column
fn hazard_label(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}
