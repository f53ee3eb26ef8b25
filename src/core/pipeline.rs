//! Load → link → limit → write pipeline
//!
//! `Pipeline` orchestrates a single batch run, delegating:
//! - NEO parsing to [`NeoReader`]
//! - close-approach parsing to [`CadDocument`]
//! - linking to [`NeoDatabase`]
//! - serialization to the [`ResultWriter`] chosen by `create_writer`
//!
//! Each stage fully consumes its input before the next starts. Loading and
//! writing are separate calls so a caller can open the destination only once
//! the data is known to be good.

use crate::cli::OutputFormat;
use crate::core::NeoDatabase;
use crate::io::{CadDocument, NeoReader};
use crate::output::create_writer;
use crate::types::{LinkedApproach, NeoError};
use std::io::Write;
use std::path::PathBuf;

/// Inputs and selection settings for a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub neo_path: PathBuf,
    pub cad_path: PathBuf,
    /// Maximum number of linked approaches to write
    pub limit: Option<usize>,
    /// Log and skip malformed rows instead of failing the load
    pub skip_malformed: bool,
}

/// Linked database plus bookkeeping from the load stage
#[derive(Debug)]
pub struct LoadedData {
    pub database: NeoDatabase,
    pub neo_rows_skipped: usize,
    pub approach_rows_skipped: usize,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    pub neos_loaded: usize,
    pub approaches_loaded: usize,
    pub rows_skipped: usize,
    pub unlinked: usize,
    pub written: usize,
}

/// Single-threaded batch pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load both sources and link them
    ///
    /// # Errors
    ///
    /// - Any load error, unless `skip_malformed` is set and the error is
    ///   confined to one row or tuple
    /// - `DuplicateDesignation` from linking
    pub fn load(&self) -> Result<LoadedData, NeoError> {
        let skip = self.config.skip_malformed;

        let reader = NeoReader::from_path(&self.config.neo_path)?;
        let (neos, neo_rows_skipped) = collect_records(reader, skip, "NEO row")?;
        tracing::info!(count = neos.len(), path = %self.config.neo_path.display(), "loaded near-Earth objects");

        let document = CadDocument::from_path(&self.config.cad_path)?;
        let (approaches, approach_rows_skipped) =
            collect_records(document.approaches(), skip, "close-approach tuple")?;
        tracing::info!(count = approaches.len(), path = %self.config.cad_path.display(), "loaded close approaches");

        let database = NeoDatabase::new(neos, approaches)?;

        Ok(LoadedData {
            database,
            neo_rows_skipped,
            approach_rows_skipped,
        })
    }

    /// Write the linked approaches of a loaded database, honouring the limit
    pub fn write(
        &self,
        loaded: &LoadedData,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<PipelineSummary, NeoError> {
        let database = &loaded.database;
        let limit = self.config.limit.unwrap_or(usize::MAX);
        let results: Vec<LinkedApproach<'_>> = database.linked_approaches().take(limit).collect();

        let written = create_writer(format).write(&results, output)?;

        Ok(PipelineSummary {
            neos_loaded: database.neos().len(),
            approaches_loaded: database.approaches().len(),
            rows_skipped: loaded.neo_rows_skipped + loaded.approach_rows_skipped,
            unlinked: database.unlinked().len(),
            written,
        })
    }

    /// Load, link and write in one call
    pub fn run(
        &self,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<PipelineSummary, NeoError> {
        let loaded = self.load()?;
        self.write(&loaded, format, output)
    }
}

/// Gather records, either failing on the first error or skipping bad ones
fn collect_records<T>(
    results: impl Iterator<Item = Result<T, NeoError>>,
    skip_malformed: bool,
    what: &str,
) -> Result<(Vec<T>, usize), NeoError> {
    let mut records = Vec::new();
    let mut skipped = 0;

    for result in results {
        match result {
            Ok(record) => records.push(record),
            Err(e) if skip_malformed => {
                tracing::warn!(error = %e, "skipping malformed {}", what);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "skipped malformed {}s", what);
    }
    Ok((records, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const NEO_CSV: &str = "id,spkid,full_name,pdes,name,prefix,neo,pha,H,G,M1,M2,K1,K2,PC,diameter\n\
        a0,2000433,433 Eros,2000433,Eros,,Y,N,10.4,0.46,,,,,,16.84\n\
        a1,2099942,99942 Apophis,2099942,Apophis,,Y,Y,19.7,,,,,,,0.37\n\
        a2,3000000,(2020 AB),2020 AB,,,Y,N,25.1,,,,,,,\n";

    const CAD_JSON: &str = r#"{"count": "4", "data": [
        ["2000433", "J2000", 2450000.5, "1900-Jan-01 00:00", "0.15", "0.1", "0.2", "5.5", "5.4", "0.001", "18"],
        ["2099942", "199", 2462240.4, "2029-Apr-13 21:46", "0.000254", "0.000254", "0.000254", "7.42", "5.84", "< 00:01", "19.1"],
        ["9999999", "1", 2460000.5, "2023-Feb-25 00:00", "0.05", "0.05", "0.05", "11.2", "11.1", "00:01", "22.0"],
        ["2020 AB", "3", 2460100.5, "2023-Jun-05 12:00:30", "0.02", "0.02", "0.02", "9.0", "8.9", "00:02", "25.1"]
    ]}"#;

    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn pipeline(neos: &NamedTempFile, cad: &NamedTempFile, limit: Option<usize>, skip: bool) -> Pipeline {
        Pipeline::new(PipelineConfig {
            neo_path: neos.path().to_path_buf(),
            cad_path: cad.path().to_path_buf(),
            limit,
            skip_malformed: skip,
        })
    }

    #[test]
    fn test_run_writes_linked_approaches_as_csv() {
        let neos = create_temp_file(NEO_CSV);
        let cad = create_temp_file(CAD_JSON);
        let mut output = Vec::new();

        let summary = pipeline(&neos, &cad, None, false)
            .run(OutputFormat::Csv, &mut output)
            .unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous\n\
             1900-Jan-01 00:00,0.15,5.5,2000433,Eros,16.84,False\n\
             2029-Apr-13 21:46,0.000254,7.42,2099942,Apophis,0.37,True\n\
             2023-Jun-05 12:00,0.02,9.0,2020 AB,,nan,False\n"
        );
        assert_eq!(
            summary,
            PipelineSummary {
                neos_loaded: 3,
                approaches_loaded: 4,
                rows_skipped: 0,
                unlinked: 1,
                written: 3,
            }
        );
    }

    #[test]
    fn test_limit_caps_written_records() {
        let neos = create_temp_file(NEO_CSV);
        let cad = create_temp_file(CAD_JSON);
        let mut output = Vec::new();

        let summary = pipeline(&neos, &cad, Some(1), false)
            .run(OutputFormat::Json, &mut output)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(summary.written, 1);
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["neo"]["name"], "Eros");
    }

    #[test]
    fn test_malformed_row_aborts_by_default() {
        let neos = create_temp_file(&format!("{}a3,1,x,,,,,,,,,,,,,\n", NEO_CSV));
        let cad = create_temp_file(CAD_JSON);

        let err = pipeline(&neos, &cad, None, false).load().unwrap_err();
        assert_eq!(err, NeoError::missing_field("line 5", "designation"));
    }

    #[test]
    fn test_malformed_rows_skipped_on_request() {
        let neos = create_temp_file(&format!("{}a3,1,x,,,,,,,,,,,,,\n", NEO_CSV));
        let cad = create_temp_file(
            r#"{"data": [
                ["2000433", "J2000", 2450000.5, "1900-Jan-01 00:00", "0.15", "0.1", "0.2", "5.5", "5.4", "0.001", "18"],
                ["2000433", "J2000", 2450000.5, "not a date", "0.15", "0.1", "0.2", "5.5", "5.4", "0.001", "18"]
            ]}"#,
        );
        let mut output = Vec::new();

        let summary = pipeline(&neos, &cad, None, true)
            .run(OutputFormat::Csv, &mut output)
            .unwrap();

        assert_eq!(summary.rows_skipped, 2);
        assert_eq!(summary.neos_loaded, 3);
        assert_eq!(summary.written, 1);
    }

    #[test]
    fn test_duplicate_designation_fails_in_link_stage() {
        let neos = create_temp_file(&format!("{}a9,9,dup,2000433,,,,,,,,,,,,\n", NEO_CSV));
        let cad = create_temp_file(CAD_JSON);

        let err = pipeline(&neos, &cad, None, true).load().unwrap_err();
        assert_eq!(err, NeoError::duplicate_designation("2000433"));
        assert_eq!(err.stage(), crate::types::Stage::Link);
    }

    #[test]
    fn test_missing_input_file() {
        let cad = create_temp_file(CAD_JSON);
        let config = PipelineConfig {
            neo_path: PathBuf::from("nonexistent.csv"),
            cad_path: cad.path().to_path_buf(),
            limit: None,
            skip_malformed: false,
        };

        let err = Pipeline::new(config).load().unwrap_err();
        assert_eq!(err, NeoError::file_not_found("nonexistent.csv"));
    }
}
