//! Near-Earth Object Close-Approach Library
//! # Overview
//!
//! This library loads a catalogue of near-Earth objects (CSV) and a set of
//! close-approach records (JSON), links every close approach to the NEO that
//! makes it, and writes the linked records back out as CSV or JSON.
//!
//! # Architecture
//!
//! - [`types`] - Record types (NearEarthObject, CloseApproach), time handling, errors
//! - [`io`] - Loaders for the NEO CSV and close-approach JSON sources
//! - [`core`] - Business logic components:
//!   - [`core::database`] - Arena of records and the linking pass
//!   - [`core::pipeline`] - Load → link → limit → write orchestration
//! - [`output`] - CSV and JSON serializers behind a common trait
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - Subscriber setup for the binary
//!
//! # Missing Values
//!
//! - An empty NEO name means the object is unnamed (`None`), never `Some("")`
//! - An empty diameter means unknown (`None`); CSV output writes it as `nan`
//! - A close approach whose designation matches no NEO stays unlinked and is
//!   left out of the output

pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod output;
pub mod types;

pub use crate::core::{NeoDatabase, Pipeline, PipelineConfig, PipelineSummary};
pub use io::{load_approaches, load_neos};
pub use output::{create_writer, write_to_csv, write_to_json, ResultWriter};
pub use types::{
    ApproachId, CloseApproach, LinkedApproach, NearEarthObject, NeoError, NeoId, Stage,
};
