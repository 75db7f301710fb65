//! Conversion pipeline
//!
//! Orchestrates the conversion of one export, delegating:
//! - Reading and row conversion to `StatementReader`
//! - Description parsing to `RowAssembler`
//! - Output to `csv_format::write_ledger_csv`
//!
//! The whole table is converted in memory before anything is written, so a
//! malformed export never produces output.

use crate::core::{CategoryMapper, RowAssembler};
use crate::io::csv_format::{write_ledger_csv, DEFAULT_DATE_FORMAT};
use crate::io::statement_reader::{ReaderConfig, StatementReader};
use crate::types::{ConvertError, LedgerRow, TransactionRow};
use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionReport {
    /// Ledger rows written
    pub rows: usize,

    /// Every distinct category token seen, sorted
    pub category_tokens: BTreeSet<String>,

    /// Category tokens with no entry in the mapping table
    pub unmapped_tokens: BTreeSet<String>,
}

/// Converts CheBanca exports to HomeBank import files
#[derive(Debug, Clone)]
pub struct Converter {
    reader_config: ReaderConfig,
    mapper: CategoryMapper,
    date_format: String,
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new(ReaderConfig::default(), CategoryMapper::default())
    }
}

impl Converter {
    pub fn new(reader_config: ReaderConfig, mapper: CategoryMapper) -> Self {
        Converter {
            reader_config,
            mapper,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Output date format, checked beforehand with `validate_date_format`
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Convert already-read movements
    pub fn convert_rows(&self, rows: &[TransactionRow]) -> (Vec<LedgerRow>, ConversionReport) {
        let mut assembler = RowAssembler::new(&self.mapper);
        let ledger = assembler.assemble_all(rows);
        let unmapped_tokens = assembler.unmapped_tokens();

        let report = ConversionReport {
            rows: ledger.len(),
            category_tokens: assembler.into_category_tokens(),
            unmapped_tokens,
        };
        (ledger, report)
    }

    /// Convert the export at `input_path` and write the ledger to `output`
    pub fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ConversionReport, ConvertError> {
        let rows = StatementReader::open(input_path, self.reader_config.clone())?.read_rows()?;
        let (ledger, report) = self.convert_rows(&rows);

        write_ledger_csv(&ledger, output, &self.date_format)?;
        log_report(&report);

        Ok(report)
    }

    /// Convert the export at `input_path` into the file at `output_path`
    ///
    /// The ledger goes to a temporary file next to `output_path` that is
    /// renamed into place only once everything was written.
    pub fn convert_file(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<ConversionReport, ConvertError> {
        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        let report = {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let report = self.process(input_path, &mut writer)?;
            writer.flush()?;
            report
        };
        temp.persist(output_path).map_err(std::io::Error::from)?;

        Ok(report)
    }
}

fn log_report(report: &ConversionReport) {
    info!(rows = report.rows, "converted movements");
    info!("Payment types found: {:?}", report.category_tokens);
    if !report.unmapped_tokens.is_empty() {
        warn!(
            "Payment types without a HomeBank mapping: {:?}",
            report.unmapped_tokens
        );
    }
}
