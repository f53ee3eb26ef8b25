//! JSON serialization of linked close approaches
//!
//! The output is an array of approach objects, each embedding its NEO under
//! `neo`, pretty-printed with four-space indentation. Unlike the CSV form, an
//! unnamed NEO keeps `"name": null`.
//!
//! An unknown diameter is written as the bare token `NaN`, the form the
//! catalogue tooling reads and writes, so the output is not strict JSON
//! whenever a diameter is unknown. Floats use the same rendering as the CSV
//! writer.

use super::{format_float, ResultWriter};
use crate::types::{LinkedApproach, NearEarthObject, NeoError};
use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Serializer;
use std::io::{self, Write};

const INDENT: &[u8] = b"    ";

/// Bare token written for an unknown diameter
const NAN_TOKEN: &[u8] = b"NaN";

#[derive(Debug, Serialize)]
struct ApproachDocument<'a> {
    datetime_utc: String,
    distance_au: f64,
    velocity_km_s: f64,
    neo: NeoDocument<'a>,
}

#[derive(Debug, Serialize)]
struct NeoDocument<'a> {
    designation: &'a str,
    name: Option<&'a str>,
    #[serde(serialize_with = "serialize_diameter")]
    diameter_km: Option<f64>,
    potentially_hazardous: bool,
}

// serde_json turns a NaN float into `null`, so the token travels as a byte
// array that `RecordFormatter` writes verbatim.
fn serialize_diameter<S: serde::Serializer>(
    diameter: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match diameter {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_bytes(NAN_TOKEN),
    }
}

/// Pretty layout with CSV-compatible float rendering and raw byte tokens
struct RecordFormatter {
    pretty: PrettyFormatter<'static>,
}

impl RecordFormatter {
    fn new() -> Self {
        RecordFormatter {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl Formatter for RecordFormatter {
    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(format_float(value).as_bytes())
    }

    fn write_byte_array<W>(&mut self, writer: &mut W, value: &[u8]) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(value)
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.pretty.end_object_value(writer)
    }
}

impl<'a> From<&'a NearEarthObject> for NeoDocument<'a> {
    fn from(neo: &'a NearEarthObject) -> Self {
        NeoDocument {
            designation: neo.designation(),
            name: neo.name(),
            diameter_km: neo.diameter(),
            potentially_hazardous: neo.hazardous(),
        }
    }
}

impl<'a> From<&LinkedApproach<'a>> for ApproachDocument<'a> {
    fn from(linked: &LinkedApproach<'a>) -> Self {
        let approach = linked.approach();
        ApproachDocument {
            datetime_utc: approach.time_str(),
            distance_au: approach.distance(),
            velocity_km_s: approach.velocity(),
            neo: NeoDocument::from(linked.neo()),
        }
    }
}

/// Writer producing the nested JSON format
#[derive(Debug, Clone, Copy)]
pub struct JsonResultWriter;

impl ResultWriter for JsonResultWriter {
    fn write(
        &self,
        results: &[LinkedApproach<'_>],
        output: &mut dyn Write,
    ) -> Result<usize, NeoError> {
        write_to_json(results, output)
    }
}

/// Write linked close approaches as a pretty-printed JSON array
///
/// # Returns
///
/// * `Ok(usize)` - Number of approach objects written
/// * `Err(NeoError::OutputWrite)` - Serialization or a write failed
pub fn write_to_json(
    results: &[LinkedApproach<'_>],
    output: &mut dyn Write,
) -> Result<usize, NeoError> {
    let documents: Vec<ApproachDocument<'_>> = results.iter().map(ApproachDocument::from).collect();

    let mut serializer = Serializer::with_formatter(&mut *output, RecordFormatter::new());
    documents
        .serialize(&mut serializer)
        .map_err(|e| NeoError::output_write(format!("Failed to write JSON: {}", e)))?;

    output
        .write_all(b"\n")
        .and_then(|()| output.flush())
        .map_err(|e| NeoError::output_write(format!("Failed to flush output: {}", e)))?;

    tracing::debug!(documents = documents.len(), "wrote close approaches as JSON");
    Ok(documents.len())
}
