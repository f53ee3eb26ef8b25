//! Output module
//!
//! Serializes linked close approaches. Each output format implements
//! [`ResultWriter`], and [`create_writer`] picks the implementation at runtime.
//!
//! # Components
//!
//! - `csv_writer` - Flat rows, one per close approach
//! - `json_writer` - Nested documents with the NEO embedded under `neo`
//!
//! Both writers report any failure on the destination as
//! [`NeoError::OutputWrite`], never as a load error.

pub mod csv_writer;
pub mod json_writer;

pub use csv_writer::{write_to_csv, CsvResultWriter, CSV_HEADER};
pub use json_writer::{write_to_json, JsonResultWriter};

use crate::cli::OutputFormat;
use crate::types::{LinkedApproach, NeoError};
use std::io::Write;

/// Serializer for a sequence of linked close approaches
pub trait ResultWriter {
    /// Write every result, in order, to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of close approaches written
    /// * `Err(NeoError::OutputWrite)` - The destination could not be written
    fn write(
        &self,
        results: &[LinkedApproach<'_>],
        output: &mut dyn Write,
    ) -> Result<usize, NeoError>;
}

/// Create the writer for an output format
pub fn create_writer(format: OutputFormat) -> Box<dyn ResultWriter> {
    match format {
        OutputFormat::Csv => Box::new(CsvResultWriter),
        OutputFormat::Json => Box::new(JsonResultWriter),
    }
}

/// Render a float in its shortest round-trip form, `nan` for NaN
///
/// Whole numbers keep a trailing `.0` (`1.0`, not `1`). Values below `1e-4`
/// or from `1e16` up switch to exponent form with an explicit sign and at
/// least two exponent digits (`5e-05`, `1e+16`), the form the catalogue
/// tooling writes.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }

    let shortest = format!("{:?}", value);
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => shortest,
    }
}

/// Render a diameter, writing an unknown diameter as `nan`
pub fn format_diameter(diameter: Option<f64>) -> String {
    diameter.map_or_else(|| format_float(f64::NAN), format_float)
}
