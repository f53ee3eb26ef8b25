//! Core module
//!
//! - `database` - NEO database that links close approaches to their NEOs
//! - `pipeline` - Load, link, limit and write orchestration

pub mod database;
pub mod pipeline;

pub use database::NeoDatabase;
pub use pipeline::{LoadedData, Pipeline, PipelineConfig, PipelineSummary};
