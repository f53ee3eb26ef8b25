use crate::core::PipelineConfig;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// Link NEO close approaches to their objects and write them as CSV or JSON
#[derive(Parser, Debug)]
#[command(name = "neo-close-approaches")]
#[command(about = "Link near-Earth object close approaches and export them", long_about = None)]
pub struct CliArgs {
    /// NEO catalogue CSV file
    #[arg(
        long = "neofile",
        value_name = "PATH",
        default_value = "data/neos.csv",
        help = "Path to the NEO catalogue CSV file"
    )]
    pub neo_file: PathBuf,

    /// Close-approach JSON document
    #[arg(
        long = "cadfile",
        value_name = "PATH",
        default_value = "data/cad.json",
        help = "Path to the close-approach JSON file"
    )]
    pub cad_file: PathBuf,

    /// Output file; stdout when omitted
    #[arg(
        short = 'o',
        long = "outfile",
        value_name = "PATH",
        help = "Write results to this file instead of stdout"
    )]
    pub outfile: Option<PathBuf>,

    /// Output format; inferred from the outfile extension when omitted
    #[arg(
        long = "format",
        value_name = "FORMAT",
        help = "Output format: 'csv' or 'json' (default: from --outfile extension, else csv)"
    )]
    pub format: Option<OutputFormat>,

    /// Maximum number of close approaches to write
    #[arg(long = "limit", value_name = "COUNT", help = "Write at most COUNT close approaches")]
    pub limit: Option<usize>,

    /// Skip malformed rows instead of aborting the load
    #[arg(
        long = "skip-malformed",
        help = "Log and skip malformed NEO rows and close-approach tuples"
    )]
    pub skip_malformed: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl CliArgs {
    /// Create a PipelineConfig from CLI arguments
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            neo_path: self.neo_file.clone(),
            cad_path: self.cad_file.clone(),
            limit: self.limit,
            skip_malformed: self.skip_malformed,
        }
    }

    /// Resolve the output format
    ///
    /// An explicit `--format` wins, then the outfile extension, then CSV.
    pub fn output_format(&self) -> OutputFormat {
        self.format
            .or_else(|| self.outfile.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Csv)
    }

    /// Log level selected by `-v` / `-q`
    pub fn log_level(&self) -> LevelFilter {
        crate::logging::verbosity_level(self.verbose, self.quiet)
    }
}
