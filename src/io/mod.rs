//! I/O module
//!
//! Handles the bank export input and the HomeBank output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (record conversion, ledger serialization)
//! - `statement_reader` - Reader for the bank's movements export
//! - `workbook` - Spreadsheet (`.xlsx`) input

pub mod csv_format;
pub mod statement_reader;
pub mod workbook;

pub use csv_format::{convert_statement_record, write_ledger_csv, StatementRecord};
pub use statement_reader::{ReaderConfig, StatementReader};
