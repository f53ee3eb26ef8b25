//! End-to-end integration tests
//!
//! These tests drive the complete load → link → write pipeline over the
//! fixtures in tests/fixtures/. Each fixture directory holds:
//! - `neos.csv` - NEO catalogue input
//! - `cad.json` - close-approach input
//! - `expected.csv` / `expected.json` - exact expected output
//!
//! Every fixture is run once per output format.

#[cfg(test)]
mod tests {
    use neo_close_approaches::cli::OutputFormat;
    use neo_close_approaches::core::{Pipeline, PipelineConfig};
    use neo_close_approaches::{load_approaches, load_neos, write_to_csv, NeoDatabase, NeoError};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::{Path, PathBuf};
    use tempfile::NamedTempFile;

    fn fixture_config(fixture_name: &str) -> PipelineConfig {
        let fixture_dir = PathBuf::from(format!("tests/fixtures/{}", fixture_name));
        PipelineConfig {
            neo_path: fixture_dir.join("neos.csv"),
            cad_path: fixture_dir.join("cad.json"),
            limit: None,
            skip_malformed: false,
        }
    }

    /// Run a fixture and compare the output with the expected file byte for byte
    fn run_test_fixture(fixture_name: &str, format: OutputFormat) {
        let config = fixture_config(fixture_name);
        let expected_path = match format {
            OutputFormat::Csv => format!("tests/fixtures/{}/expected.csv", fixture_name),
            OutputFormat::Json => format!("tests/fixtures/{}/expected.json", fixture_name),
        };

        assert!(config.neo_path.exists(), "Input file not found: {:?}", config.neo_path);
        assert!(config.cad_path.exists(), "Input file not found: {:?}", config.cad_path);
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        Pipeline::new(config)
            .run(format, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to run pipeline: {}", e));

        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {} (format: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, format, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("happy_path")]
    #[case("missing_values")]
    #[case("unlinked_approaches")]
    #[case("seconds_precision")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(OutputFormat::Csv, OutputFormat::Json)] format: OutputFormat,
    ) {
        run_test_fixture(fixture, format);
    }

    #[test]
    fn test_unlinked_approaches_are_counted_not_fatal() {
        let mut output = Vec::new();
        let summary = Pipeline::new(fixture_config("unlinked_approaches"))
            .run(OutputFormat::Csv, &mut output)
            .unwrap();

        assert_eq!(summary.approaches_loaded, 3);
        assert_eq!(summary.unlinked, 2);
        assert_eq!(summary.written, 1);
    }

    #[test]
    fn test_eros_scenario_through_public_api() {
        let neo_csv = "id,spkid,full_name,pdes,name,prefix,neo,pha,H,G,M1,M2,K1,K2,PC,diameter\n\
                       a0000433,2000433,433 Eros,2000433,Eros,,Y,N,10.4,,,,,,,16.84\n";
        let cad_json = r#"{"data": [["2000433", "J2000", 2450000.5, "1900-Jan-01 00:00", "0.15", "0.1", "0.2", "5.5", "5.4", "0.001", "18"]]}"#;

        let neos = load_neos(neo_csv.as_bytes()).unwrap();
        let approaches = load_approaches(cad_json.as_bytes()).unwrap();
        let db = NeoDatabase::new(neos, approaches).unwrap();

        let linked: Vec<_> = db.linked_approaches().collect();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].neo().name(), Some("Eros"));
        assert_eq!(db.neo_of(&db.approaches()[0]).unwrap().name(), Some("Eros"));

        let mut output = Vec::new();
        write_to_csv(&linked, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("1900-Jan-01 00:00,0.15,5.5,2000433,Eros,16.84,False")
        );
    }

    #[test]
    fn test_linking_symmetry_over_fixture() {
        let config = fixture_config("happy_path");
        let neos = load_neos(fs::File::open(&config.neo_path).unwrap()).unwrap();
        let approaches = load_approaches(fs::File::open(&config.cad_path).unwrap()).unwrap();
        let db = NeoDatabase::new(neos, approaches).unwrap();

        for neo in db.neos() {
            let neo_id = db.neo_id(neo.designation()).unwrap();
            for &approach_id in neo.approaches() {
                let approach = db.approach(approach_id).unwrap();
                assert_eq!(approach.neo(), Some(neo_id));
                assert_eq!(approach.designation(), neo.designation());
            }
        }
        for (index, approach) in db.approaches().iter().enumerate() {
            let neo = db.neo_of(approach).unwrap();
            assert!(neo.approaches().iter().any(|id| id.index() == index));
        }

        let eros = db.get_neo_by_name("Eros").unwrap();
        assert_eq!(db.approaches_of(eros).count(), 2);
    }

    #[test]
    fn test_duplicate_designations_detected_by_linker() {
        let neo_csv = "id,spkid,full_name,pdes,name\n\
                       a1,1,x,433,Eros\n\
                       a2,2,y,433,\n";

        let neos = load_neos(neo_csv.as_bytes()).unwrap();
        assert_eq!(neos.len(), 2);

        let err = NeoDatabase::new(neos, Vec::new()).unwrap_err();
        assert_eq!(err, NeoError::duplicate_designation("433"));
    }
}
