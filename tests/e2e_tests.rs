//! End-to-end integration tests
//!
//! These tests validate the complete conversion pipeline using predefined
//! fixtures. Each fixture test:
//! 1. Reads the input (a CheBanca export, `.csv` or `.xlsx`) from a fixture directory
//! 2. Converts all movements through the pipeline
//! 3. Compares the HomeBank output with expected.csv
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Every category of the built-in table and every payee marker
//! - Descriptions without separator and unknown categories
//! - The bank's spreadsheet export, with date-typed and numeric cells
//! - Malformed exports that must abort without output
//!
//! The binary itself is exercised for its exit codes and output placement.

#[cfg(test)]
mod tests {
    use chebanca_homebank::io::ReaderConfig;
    use chebanca_homebank::{CategoryMapper, ConvertError, Converter};
    use rstest::rstest;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::process::Command;
    use tempfile::{tempdir, NamedTempFile};

    /// Run a test fixture by converting its input and comparing with expected.csv
    fn run_test_fixture(fixture_name: &str, input_file: &str) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/{}", fixture_dir, input_file);
        let expected_path = format!("{}/expected.csv", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let converter = Converter::default();

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        converter
            .process(Path::new(&input_path), &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to convert export: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("happy_path", "input.csv")]
    #[case("no_separator_and_unmapped", "input.csv")]
    #[case("xlsx_export", "input.xlsx")]
    fn test_fixtures(#[case] fixture: &str, #[case] input_file: &str) {
        run_test_fixture(fixture, input_file);
    }

    #[test]
    fn test_unmapped_categories_are_reported() {
        let report = Converter::default()
            .process(
                Path::new("tests/fixtures/no_separator_and_unmapped/input.csv"),
                &mut Vec::<u8>::new(),
            )
            .unwrap();

        assert_eq!(report.rows, 5);
        assert_eq!(
            report.unmapped_tokens.iter().collect::<Vec<_>>(),
            ["Giroconto", "Prelievo contanti", "Rimborso"]
        );
    }

    #[rstest]
    #[case::malformed_date("malformed_date", None)]
    #[case::header_not_detected("missing_column", None)]
    #[case::explicit_header_missing_column("missing_column", Some(1))]
    fn test_malformed_exports_abort(#[case] fixture: &str, #[case] skip_rows: Option<usize>) {
        let input_path = format!("tests/fixtures/{}/input.csv", fixture);
        let config = ReaderConfig {
            skip_rows,
            ..ReaderConfig::default()
        };
        let converter = Converter::new(config, CategoryMapper::default());
        let mut output: Vec<u8> = Vec::new();

        let result = converter.process(Path::new(&input_path), &mut output);

        match (fixture, skip_rows, result) {
            ("malformed_date", _, Err(ConvertError::InvalidDate { value, .. })) => {
                assert_eq!(value, "32/04/2023")
            }
            ("missing_column", None, Err(ConvertError::HeaderNotFound { .. })) => {}
            ("missing_column", Some(_), Err(ConvertError::MissingColumn { column })) => {
                assert_eq!(column, "Uscite")
            }
            (_, _, other) => panic!("Unexpected result for {}: {:?}", fixture, other),
        }
        assert!(output.is_empty());
    }

    #[test]
    fn test_binary_writes_csv_next_to_input() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input_path = dir.path().join("movimenti.txt");
        fs::copy("tests/fixtures/happy_path/input.csv", &input_path).unwrap();

        let output = Command::new(env!("CARGO_BIN_EXE_chebanca2homebank"))
            .arg(&input_path)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run binary");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("HomeBank table written to"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Payment types found"));

        let written = fs::read_to_string(dir.path().join("movimenti.csv")).unwrap();
        let expected = fs::read_to_string("tests/fixtures/happy_path/expected.csv").unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_binary_reads_workbook_export() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input_path = dir.path().join("movimenti.xlsx");
        fs::copy("tests/fixtures/xlsx_export/input.xlsx", &input_path).unwrap();

        let output = Command::new(env!("CARGO_BIN_EXE_chebanca2homebank"))
            .arg(&input_path)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run binary");

        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let written = fs::read_to_string(dir.path().join("movimenti.csv")).unwrap();
        let expected = fs::read_to_string("tests/fixtures/xlsx_export/expected.csv").unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_binary_without_input_prints_usage() {
        let output = Command::new(env!("CARGO_BIN_EXE_chebanca2homebank"))
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(255));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Usage"));
        assert!(stdout.contains("INPUT"));
    }

    #[test]
    fn test_binary_fails_on_malformed_export() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input_path = dir.path().join("broken.csv");
        fs::copy("tests/fixtures/malformed_date/input.csv", &input_path).unwrap();

        let output = Command::new(env!("CARGO_BIN_EXE_chebanca2homebank"))
            .arg(&input_path)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid date '32/04/2023'"));
        assert!(!dir.path().join("broken.homebank.csv").exists());
    }
}
