//! I/O module
//!
//! Handles the two input sources.
//!
//! # Components
//!
//! - `neo_csv` - NEO catalogue CSV loader with a row iterator
//! - `cad_json` - Close-approach JSON document loader

pub mod cad_json;
pub mod neo_csv;

pub use cad_json::{load_approaches, parse_approach_tuple, CadDocument};
pub use neo_csv::{load_neos, parse_neo_record, NeoReader};

use crate::types::NeoError;
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Open an input file, reporting a missing file as `FileNotFound`
pub(crate) fn open_input(path: &Path) -> Result<File, NeoError> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => NeoError::file_not_found(&path.display().to_string()),
        _ => NeoError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        },
    })
}
