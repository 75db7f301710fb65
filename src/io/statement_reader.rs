//! Reader for the CheBanca movements export
//!
//! The export is the bank's `.xlsx` workbook, or the same sheet saved as
//! delimited text. Its layout is:
//!
//! ```text
//! <preamble: account holder, IBAN, period, ... (14 rows)>
//! ,Data contabile,Data valuta,Tipologia,Entrate,Uscite,Divisa
//! ,01/03/2023,01/03/2023,Stipendio - STIPENDIO MESE CORRENTE,"1.500,00",,EUR
//! ...
//! <summary rows: totals and balance (2 rows)>
//! ```
//!
//! The reader locates the header row, resolves the required columns by name,
//! drops the summary rows and converts every remaining row. Any malformed row
//! aborts the read; rows are never skipped individually.

use crate::io::csv_format::{convert_statement_record, StatementRecord, REQUIRED_COLUMNS};
use crate::io::workbook::{is_workbook, read_workbook_records};
use crate::types::{ConvertError, TransactionRow};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Summary rows at the bottom of a CheBanca export
pub const DEFAULT_FOOTER_ROWS: usize = 2;

/// Layout options of the export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Field delimiter of delimited exports; workbooks ignore it
    pub delimiter: u8,

    /// Rows before the header; `None` detects the header by its column names
    pub skip_rows: Option<usize>,

    /// Summary rows to drop at the end of the table
    pub footer_rows: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            delimiter: b',',
            skip_rows: None,
            footer_rows: DEFAULT_FOOTER_ROWS,
        }
    }
}

/// Reads the movements table of an export
///
/// # Examples
///
/// ```no_run
/// use chebanca_homebank::io::statement_reader::{ReaderConfig, StatementReader};
/// use std::path::Path;
///
/// let path = Path::new("movimenti.xlsx");
/// let reader = StatementReader::open(path, ReaderConfig::default()).unwrap();
/// let rows = reader.read_rows().unwrap();
/// println!("Read {} movements", rows.len());
/// ```
#[derive(Debug)]
pub struct StatementReader {
    records: Vec<StringRecord>,
    config: ReaderConfig,
}

impl StatementReader {
    /// Open an export file
    ///
    /// Workbook extensions (`.xlsx`, `.xls`, `.ods`, ...) are read as
    /// spreadsheets, any other file as delimited text.
    pub fn open(path: &Path, config: ReaderConfig) -> Result<Self, ConvertError> {
        let mut file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ConvertError::file_not_found(&path.display().to_string())
            }
            _ => e.into(),
        })?;

        if is_workbook(path) {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            debug!(path = %path.display(), "reading workbook export");
            Ok(Self::from_records(read_workbook_records(bytes)?, config))
        } else {
            Self::from_reader(file, config)
        }
    }

    /// Read a delimited export from any byte source
    ///
    /// Records may have differing field counts (preamble and summary rows are
    /// narrower than the table) and every field is trimmed.
    pub fn from_reader<R: Read>(source: R, config: ReaderConfig) -> Result<Self, ConvertError> {
        let records = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .buffer_capacity(8 * 1024)
            .from_reader(source)
            .into_records()
            .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

        Ok(Self::from_records(records, config))
    }

    /// Wrap records that were already split into fields
    ///
    /// Each record should carry its line in the export as position, which is
    /// used for error context.
    pub fn from_records(records: Vec<StringRecord>, config: ReaderConfig) -> Self {
        Self { records, config }
    }

    /// Convert the table between the header and the summary rows
    pub fn read_rows(self) -> Result<Vec<TransactionRow>, ConvertError> {
        let records = &self.records;

        let header_index = self.find_header(records)?;
        let header = &records[header_index];
        for column in REQUIRED_COLUMNS {
            if !header.iter().any(|field| field == column) {
                return Err(ConvertError::missing_column(column));
            }
        }
        debug!(line = header_index + 1, "found header row");

        let table: Vec<&StringRecord> = records[header_index + 1..]
            .iter()
            .filter(|record| record.iter().any(|field| !field.is_empty()))
            .collect();
        let footer_rows = self.config.footer_rows;
        if table.len() < footer_rows {
            return Err(ConvertError::NotEnoughRows {
                rows: table.len(),
                footer_rows,
            });
        }

        table[..table.len() - footer_rows]
            .iter()
            .map(|record| -> Result<TransactionRow, ConvertError> {
                let line = record.position().map_or(0, |pos| pos.line());
                let statement: StatementRecord = record.deserialize(Some(header))?;
                convert_statement_record(statement, line)
            })
            .collect()
    }

    fn find_header(&self, records: &[StringRecord]) -> Result<usize, ConvertError> {
        match self.config.skip_rows {
            Some(skip) if skip < records.len() => Ok(skip),
            Some(_) => Err(ConvertError::header_not_found(&REQUIRED_COLUMNS)),
            None => records
                .iter()
                .position(|record| {
                    REQUIRED_COLUMNS
                        .iter()
                        .all(|column| record.iter().any(|field| field == *column))
                })
                .ok_or_else(|| ConvertError::header_not_found(&REQUIRED_COLUMNS)),
        }
    }
}
