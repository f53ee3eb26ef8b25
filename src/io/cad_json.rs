//! Close-approach JSON loader
//!
//! Reads a close-approach data (CAD) document: a JSON object whose `data` key
//! holds an array of fixed-length tuples, one per close approach. Only four
//! positions are consumed:
//!
//! | Index | Field    | Rule                                                |
//! |-------|----------|-----------------------------------------------------|
//! | 0     | des      | required, non-empty string                          |
//! | 3     | cd       | `YYYY-Mon-DD HH:MM`, seconds accepted and dropped   |
//! | 4     | dist     | number (string or JSON number), finite, non-negative |
//! | 7     | v_rel    | number (string or JSON number), finite              |
//!
//! A tuple that breaks any rule yields an error for that tuple; nothing is
//! skipped here.

use crate::io::open_input;
use crate::types::time::parse_calendar_time;
use crate::types::{CloseApproach, NeoError};
use serde::Deserialize;
use serde_json::Value;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DESIGNATION_INDEX: usize = 0;
pub const TIME_INDEX: usize = 3;
pub const DISTANCE_INDEX: usize = 4;
pub const VELOCITY_INDEX: usize = 7;

/// Names the `fields` header carries at each consumed position
pub const EXPECTED_FIELDS: [(usize, &str); 4] = [
    (DESIGNATION_INDEX, "des"),
    (TIME_INDEX, "cd"),
    (DISTANCE_INDEX, "dist"),
    (VELOCITY_INDEX, "v_rel"),
];

/// Top-level CAD document
///
/// `count` and `fields` are optional metadata, used only to warn about
/// truncated documents and about layouts that disagree with the fixed indices.
#[derive(Debug, Clone, Deserialize)]
pub struct CadDocument {
    #[serde(default)]
    pub count: Option<Value>,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
    pub data: Vec<Vec<Value>>,
}

impl CadDocument {
    /// Parse a document from a reader
    ///
    /// Invalid JSON or a missing `data` array is a `MalformedDocument` error;
    /// a failing reader is an `IoError`.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, NeoError> {
        let document: CadDocument = serde_json::from_reader(source).map_err(|e| {
            if e.is_io() {
                NeoError::IoError {
                    message: e.to_string(),
                }
            } else {
                NeoError::malformed_document(e)
            }
        })?;

        if let Some(declared) = document.declared_count() {
            if declared != document.data.len() {
                tracing::warn!(
                    declared,
                    actual = document.data.len(),
                    "close-approach count does not match the number of tuples"
                );
            }
        }

        for (index, expected) in document.mismatched_fields() {
            tracing::warn!(
                index,
                expected,
                found = ?document.fields.as_ref().and_then(|f| f.get(index)),
                "close-approach field layout differs from the expected positions"
            );
        }

        Ok(document)
    }

    /// Open and parse a document from a file
    pub fn from_path(path: &Path) -> Result<Self, NeoError> {
        Self::from_reader(BufReader::new(open_input(path)?))
    }

    /// The `count` metadata, which the CAD API emits as a string
    pub fn declared_count(&self) -> Option<usize> {
        match self.count.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Consumed positions whose `fields` name is not the expected one
    ///
    /// Empty when the document carries no `fields` header.
    pub fn mismatched_fields(&self) -> Vec<(usize, &'static str)> {
        let Some(fields) = self.fields.as_ref() else {
            return Vec::new();
        };

        EXPECTED_FIELDS
            .iter()
            .filter(|(index, name)| fields.get(*index).map(String::as_str) != Some(*name))
            .copied()
            .collect()
    }

    /// Parse every tuple, yielding one result per tuple in document order
    pub fn approaches(&self) -> impl Iterator<Item = Result<CloseApproach, NeoError>> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(index, tuple)| parse_approach_tuple(tuple, index))
    }
}

/// Convert one CAD tuple into an unlinked CloseApproach
///
/// # Arguments
///
/// * `tuple` - The raw tuple from the `data` array
/// * `index` - Position of the tuple, used in error messages
pub fn parse_approach_tuple(tuple: &[Value], index: usize) -> Result<CloseApproach, NeoError> {
    let label = format!("approach {}", index);

    let designation = string_field(tuple, DESIGNATION_INDEX, &label, "designation")?;

    let raw_time = string_field(tuple, TIME_INDEX, &label, "time")?;
    let time =
        parse_calendar_time(raw_time).ok_or_else(|| NeoError::invalid_time(&label, raw_time))?;

    let distance = number_field(tuple, DISTANCE_INDEX, &label, "distance")?;
    if distance < 0.0 {
        return Err(NeoError::invalid_value(
            &label,
            "distance",
            distance,
            "must be non-negative",
        ));
    }

    let velocity = number_field(tuple, VELOCITY_INDEX, &label, "velocity")?;

    Ok(CloseApproach::new(designation, time, distance, velocity))
}

fn string_field<'a>(
    tuple: &'a [Value],
    index: usize,
    label: &str,
    field: &str,
) -> Result<&'a str, NeoError> {
    match tuple.get(index) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim()),
        _ => Err(NeoError::missing_field(label, field)),
    }
}

fn number_field(tuple: &[Value], index: usize, label: &str, field: &str) -> Result<f64, NeoError> {
    let value = match tuple.get(index) {
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| NeoError::invalid_number(label, field, s))?,
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| NeoError::invalid_number(label, field, &n.to_string()))?,
        None | Some(Value::Null) => return Err(NeoError::missing_field(label, field)),
        Some(other) => return Err(NeoError::invalid_number(label, field, &other.to_string())),
    };

    if !value.is_finite() {
        return Err(NeoError::invalid_value(label, field, value, "must be finite"));
    }
    Ok(value)
}

/// Load every close approach from a CAD source, stopping at the first malformed tuple
pub fn load_approaches<R: Read>(source: R) -> Result<Vec<CloseApproach>, NeoError> {
    let document = CadDocument::from_reader(source)?;
    let approaches = document.approaches().collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count = approaches.len(), "loaded close approaches");
    Ok(approaches)
}
