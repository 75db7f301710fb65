use crate::core::CategoryMapper;
use crate::io::csv_format::{validate_date_format, DEFAULT_DATE_FORMAT};
use crate::io::statement_reader::{ReaderConfig, DEFAULT_FOOTER_ROWS};
use crate::types::ConvertError;
use clap::Parser;
use std::path::{Path, PathBuf};

pub const ABOUT: &str = "Convert a CheBanca movements export to a HomeBank CSV import file";

/// Convert a CheBanca movements export to a HomeBank CSV import file
#[derive(Parser, Debug)]
#[command(name = "chebanca2homebank", version)]
#[command(about = ABOUT, long_about = None)]
pub struct CliArgs {
    /// Bank export: the `.xlsx` workbook or the sheet saved as delimited text
    #[arg(
        value_name = "INPUT",
        help = "Path to the CheBanca export (.xlsx workbook or delimited text)"
    )]
    pub input_file: PathBuf,

    /// Where to write the HomeBank file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT",
        help = "Output path (default: input path with a .csv extension)"
    )]
    pub output_file: Option<PathBuf>,

    /// Field delimiter of the export
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        value_parser = parse_delimiter,
        help = "Field delimiter of a delimited export (single ASCII character or 'tab')"
    )]
    pub delimiter: u8,

    /// Rows before the header row
    #[arg(
        long = "skip-rows",
        value_name = "N",
        help = "Rows before the header (default: detect the header by its columns)"
    )]
    pub skip_rows: Option<usize>,

    /// Summary rows at the end of the export
    #[arg(
        long = "footer-rows",
        value_name = "N",
        default_value_t = DEFAULT_FOOTER_ROWS,
        help = "Summary rows to drop at the end of the table"
    )]
    pub footer_rows: usize,

    /// Extra category mappings
    #[arg(
        long = "mapping",
        value_name = "FILE",
        help = "File of 'token;payment' lines extending the category table"
    )]
    pub mapping_file: Option<PathBuf>,

    /// Date format of the output
    #[arg(
        long = "date-format",
        value_name = "FORMAT",
        default_value = DEFAULT_DATE_FORMAT,
        value_parser = parse_date_format,
        help = "strftime format for output dates"
    )]
    pub date_format: String,

    /// Log every converted row
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!(
                "delimiter must be a single ASCII character, got '{}'",
                value
            )),
        },
    }
}

fn parse_date_format(value: &str) -> Result<String, String> {
    validate_date_format(value).map(|()| value.to_string())
}

/// HomeBank file path derived from the export path
///
/// The extension is replaced with `csv`; an export that already is a `.csv`
/// file gets a `.homebank.csv` sibling instead of being overwritten.
pub fn default_output_path(input: &Path) -> PathBuf {
    let output = input.with_extension("csv");
    if output == input {
        input.with_extension("homebank.csv")
    } else {
        output
    }
}

impl CliArgs {
    /// Path of the HomeBank file to write
    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input_file))
    }

    /// Export layout from CLI arguments
    pub fn to_reader_config(&self) -> ReaderConfig {
        ReaderConfig {
            delimiter: self.delimiter,
            skip_rows: self.skip_rows,
            footer_rows: self.footer_rows,
        }
    }

    /// Built-in category table, extended by `--mapping` if given
    pub fn category_mapper(&self) -> Result<CategoryMapper, ConvertError> {
        let mapper = CategoryMapper::new();
        match &self.mapping_file {
            Some(path) => mapper.with_overrides_from_path(path),
            None => Ok(mapper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let parsed = CliArgs::try_parse_from(["program", "movimenti.xlsx"]).unwrap();

        assert_eq!(parsed.input_file, PathBuf::from("movimenti.xlsx"));
        assert_eq!(parsed.output_path(), PathBuf::from("movimenti.csv"));
        assert_eq!(parsed.to_reader_config(), ReaderConfig::default());
        assert_eq!(parsed.date_format, DEFAULT_DATE_FORMAT);
        assert!(parsed.mapping_file.is_none());
        assert!(!parsed.verbose);
    }

    #[rstest]
    #[case::spreadsheet("export/movimenti.xlsx", "export/movimenti.csv")]
    #[case::no_extension("movimenti", "movimenti.csv")]
    #[case::already_csv("movimenti.csv", "movimenti.homebank.csv")]
    fn test_default_output_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(default_output_path(Path::new(input)), PathBuf::from(expected));
    }

    #[test]
    fn test_explicit_output() {
        let parsed =
            CliArgs::try_parse_from(["program", "-o", "out/homebank.csv", "in.csv"]).unwrap();
        assert_eq!(parsed.output_path(), PathBuf::from("out/homebank.csv"));
    }

    #[rstest]
    #[case::comma(&["program", "in.csv"], b',')]
    #[case::semicolon(&["program", "--delimiter", ";", "in.csv"], b';')]
    #[case::tab(&["program", "--delimiter", "tab", "in.csv"], b'\t')]
    fn test_delimiter(#[case] args: &[&str], #[case] expected: u8) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_reader_config().delimiter, expected);
    }

    #[test]
    fn test_layout_options() {
        let parsed = CliArgs::try_parse_from([
            "program",
            "--skip-rows",
            "14",
            "--footer-rows",
            "3",
            "in.csv",
        ])
        .unwrap();

        let config = parsed.to_reader_config();
        assert_eq!(config.skip_rows, Some(14));
        assert_eq!(config.footer_rows, 3);
    }

    #[test]
    fn test_missing_mapping_file() {
        let parsed =
            CliArgs::try_parse_from(["program", "--mapping", "missing.map", "in.csv"]).unwrap();
        assert!(matches!(
            parsed.category_mapper(),
            Err(ConvertError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_input_kind() {
        let err = CliArgs::try_parse_from(["program"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    // Error handling tests
    #[rstest]
    #[case::long_delimiter(&["program", "--delimiter", ";;", "in.csv"])]
    #[case::bad_date_format(&["program", "--date-format", "%Q", "in.csv"])]
    #[case::negative_footer(&["program", "--footer-rows", "-1", "in.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
