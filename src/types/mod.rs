//! Types module
//!
//! Contains the record types and errors shared across the crate:
//! - `neo`: near-Earth object record and arena handles
//! - `approach`: close-approach record and the linked view used by serializers
//! - `time`: canonical minute-precision time parsing and formatting
//! - `error`: error types for the pipeline

pub mod approach;
pub mod error;
pub mod neo;
pub mod time;

pub use approach::{CloseApproach, LinkedApproach};
pub use error::{NeoError, Stage};
pub use neo::{ApproachId, NearEarthObject, NeoId};
