//! NEO Close-Approach CLI
//!
//! Links close approaches to near-Earth objects and writes them as CSV or JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --neofile data/neos.csv --cadfile data/cad.json > approaches.csv
//! cargo run -- --outfile approaches.json --limit 100
//! cargo run -- --format json --skip-malformed -v
//! ```
//!
//! Inputs are loaded and linked before the destination is opened, so a load
//! or link failure never leaves a truncated output file behind.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error in the load, link or write stage

use neo_close_approaches::cli;
use neo_close_approaches::core::{LoadedData, Pipeline};
use neo_close_approaches::logging;
use neo_close_approaches::{NeoError, PipelineSummary};
use std::fs::File;
use std::io::{self, BufWriter};
use std::process;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(args.log_level()) {
        eprintln!("Warning: {}", e);
    }

    let pipeline = Pipeline::new(args.to_pipeline_config());
    let format = args.output_format();

    let result = pipeline.load().and_then(|loaded| write_output(&pipeline, &loaded, &args, format));

    match result {
        Ok(summary) => {
            tracing::info!(
                neos = summary.neos_loaded,
                approaches = summary.approaches_loaded,
                skipped = summary.rows_skipped,
                unlinked = summary.unlinked,
                written = summary.written,
                "done"
            );
        }
        Err(e) => {
            eprintln!("Error ({} stage): {}", e.stage(), e);
            process::exit(1);
        }
    }
}

fn write_output(
    pipeline: &Pipeline,
    loaded: &LoadedData,
    args: &cli::CliArgs,
    format: cli::OutputFormat,
) -> Result<PipelineSummary, NeoError> {
    match &args.outfile {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                NeoError::output_write(format!("Failed to create '{}': {}", path.display(), e))
            })?;
            let mut output = BufWriter::new(file);
            pipeline.write(loaded, format, &mut output)
        }
        None => {
            let stdout = io::stdout();
            let mut output = stdout.lock();
            pipeline.write(loaded, format, &mut output)
        }
    }
}
