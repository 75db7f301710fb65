//! Error types for the CheBanca to HomeBank converter
//!
//! Every error here is fatal: a conversion either completes for the whole
//! table or is aborted without writing an output file. Descriptions that do
//! not match any pattern and unknown category tokens are not errors.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, missing header or columns
//! - **Workbook Errors**: Unreadable spreadsheet exports
//! - **Row Errors**: Unparseable dates or amounts, empty transaction type
//! - **Configuration Errors**: Invalid category mapping entries

use thiserror::Error;

/// Main error type for the converter
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error(
        "CSV parse error{}: {message}",
        line.map(|l| format!(" at line {}", l)).unwrap_or_default()
    )]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The spreadsheet export could not be opened or read
    #[error("Workbook error: {message}")]
    Workbook {
        /// Description of the workbook error
        message: String,
    },

    /// No record of the export carries all the required column names
    #[error("Header row not found: expected columns {}", columns.join(", "))]
    HeaderNotFound {
        /// Columns that were searched for
        columns: Vec<String>,
    },

    /// The header row lacks a required column
    #[error("Missing column '{column}' in header row")]
    MissingColumn {
        /// Name of the missing column
        column: String,
    },

    /// The export holds fewer rows than the summary footer to be dropped
    #[error("Expected at least {footer_rows} summary rows after the header, found {rows}")]
    NotEnoughRows {
        /// Rows found after the header
        rows: usize,
        /// Trailing summary rows to drop
        footer_rows: usize,
    },

    /// Transaction type text is empty
    #[error("Empty transaction type at line {line}")]
    MissingTypeText {
        /// Line number of the offending row
        line: u64,
    },

    /// Date could not be parsed with any of the accepted formats
    #[error("Invalid date '{value}' at line {line}")]
    InvalidDate {
        /// Line number of the offending row
        line: u64,
        /// The raw date text
        value: String,
    },

    /// Amount could not be parsed as a decimal number
    #[error("Invalid amount '{value}' at line {line}")]
    InvalidAmount {
        /// Line number of the offending row
        line: u64,
        /// The raw amount text
        value: String,
    },

    /// Payment method is neither a known name nor an emittable code
    #[error("Invalid payment method '{value}'")]
    InvalidPaymentMethod {
        /// The raw payment method text
        value: String,
    },

    /// A category mapping entry is unusable
    #[error("Invalid mapping for category '{token}': {message}")]
    InvalidMapping {
        /// Category token of the entry
        token: String,
        /// What is wrong with the entry
        message: String,
    },
}

// Conversion from io::Error to ConvertError
impl From<std::io::Error> for ConvertError {
    fn from(error: std::io::Error) -> Self {
        ConvertError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ConvertError
//
// The line goes into its own field; the message is only the cause, without
// the "CSV error: record N (line L ...)" preamble csv puts in its Display.
impl From<csv::Error> for ConvertError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        let message = match error.kind() {
            csv::ErrorKind::Io(err) => {
                return ConvertError::IoError {
                    message: err.to_string(),
                }
            }
            csv::ErrorKind::Utf8 { err, .. } => err.to_string(),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => format!("found {} fields, expected {}", len, expected_len),
            csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
            _ => error.to_string(),
        };

        ConvertError::ParseError { line, message }
    }
}

// Conversion from calamine::Error to ConvertError
impl From<calamine::Error> for ConvertError {
    fn from(error: calamine::Error) -> Self {
        ConvertError::Workbook {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl ConvertError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ConvertError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create a Workbook error
    pub fn workbook(message: impl Into<String>) -> Self {
        ConvertError::Workbook {
            message: message.into(),
        }
    }

    /// Create a HeaderNotFound error
    pub fn header_not_found(columns: &[&str]) -> Self {
        ConvertError::HeaderNotFound {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Create a MissingColumn error
    pub fn missing_column(column: &str) -> Self {
        ConvertError::MissingColumn {
            column: column.to_string(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(line: u64, value: &str) -> Self {
        ConvertError::InvalidDate {
            line,
            value: value.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(line: u64, value: &str) -> Self {
        ConvertError::InvalidAmount {
            line,
            value: value.to_string(),
        }
    }

    /// Create an InvalidPaymentMethod error
    pub fn invalid_payment_method(value: &str) -> Self {
        ConvertError::InvalidPaymentMethod {
            value: value.to_string(),
        }
    }

    /// Create an InvalidMapping error
    pub fn invalid_mapping(token: &str, message: impl Into<String>) -> Self {
        ConvertError::InvalidMapping {
            token: token.to_string(),
            message: message.into(),
        }
    }
}
