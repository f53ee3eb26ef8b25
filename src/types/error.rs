//! Error types for the NEO close-approach pipeline
//!
//! This module defines every error that can occur while loading, linking or
//! writing records. Errors are descriptive enough to be printed directly by
//! the CLI.
//!
//! # Error Categories
//!
//! - **Load errors**: missing files, malformed CSV rows, malformed CAD tuples
//! - **Link errors**: data-integrity violations found while building the database
//! - **Write errors**: the output stream could not be opened or written
//!
//! Each variant maps onto exactly one [`Stage`], so callers can report which
//! part of the pipeline failed without matching on every variant.

use std::fmt;
use thiserror::Error;

/// Pipeline stage an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Link,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Load => f.write_str("load"),
            Stage::Link => f.write_str("link"),
            Stage::Write => f.write_str("write"),
        }
    }
}

/// Main error type for the pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeoError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading an input source
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV structure could not be read
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A required field is absent or empty
    ///
    /// `record` names the CSV line or the CAD tuple index.
    #[error("{record}: missing required field '{field}'")]
    MissingField {
        record: String,
        field: String,
    },

    /// A numeric field could not be parsed
    #[error("{record}: invalid number '{value}' for field '{field}'")]
    InvalidNumber {
        record: String,
        field: String,
        value: String,
    },

    /// A numeric field parsed but is outside its allowed range
    #[error("{record}: value {value} for field '{field}' {reason}")]
    InvalidValue {
        record: String,
        field: String,
        value: String,
        reason: String,
    },

    /// A calendar date/time string could not be parsed
    #[error("{record}: invalid close-approach time '{value}'")]
    InvalidTime {
        record: String,
        value: String,
    },

    /// The close-approach document does not have the expected shape
    #[error("Malformed close-approach document: {message}")]
    MalformedDocument {
        message: String,
    },

    /// Two NEOs share a primary designation
    ///
    /// The database refuses to merge them.
    #[error("Duplicate NEO designation '{designation}'")]
    DuplicateDesignation {
        designation: String,
    },

    /// Output destination could not be opened or written
    #[error("Output write failed: {message}")]
    OutputWrite {
        message: String,
    },
}

impl NeoError {
    /// Stage of the pipeline this error was raised in
    pub fn stage(&self) -> Stage {
        match self {
            NeoError::DuplicateDesignation { .. } => Stage::Link,
            NeoError::OutputWrite { .. } => Stage::Write,
            _ => Stage::Load,
        }
    }
}

// Read-side conversions. Output errors are mapped explicitly with
// `NeoError::output_write` so that a failed write is never reported as a load error.

impl From<std::io::Error> for NeoError {
    fn from(error: std::io::Error) -> Self {
        NeoError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for NeoError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        NeoError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl NeoError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        NeoError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(record: &str, field: &str) -> Self {
        NeoError::MissingField {
            record: record.to_string(),
            field: field.to_string(),
        }
    }

    /// Create an InvalidNumber error
    pub fn invalid_number(record: &str, field: &str, value: &str) -> Self {
        NeoError::InvalidNumber {
            record: record.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(record: &str, field: &str, value: f64, reason: &str) -> Self {
        NeoError::InvalidValue {
            record: record.to_string(),
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidTime error
    pub fn invalid_time(record: &str, value: &str) -> Self {
        NeoError::InvalidTime {
            record: record.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a MalformedDocument error
    pub fn malformed_document(message: impl fmt::Display) -> Self {
        NeoError::MalformedDocument {
            message: message.to_string(),
        }
    }

    /// Create a DuplicateDesignation error
    pub fn duplicate_designation(designation: &str) -> Self {
        NeoError::DuplicateDesignation {
            designation: designation.to_string(),
        }
    }

    /// Create an OutputWrite error
    pub fn output_write(message: impl fmt::Display) -> Self {
        NeoError::OutputWrite {
            message: message.to_string(),
        }
    }
}
