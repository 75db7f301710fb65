//! CSV format handling for the bank export and the HomeBank import file
//!
//! This module centralizes all CSV format concerns, providing:
//! - StatementRecord structure for deserialization of export rows
//! - Conversion from export records to domain types (dates, amounts)
//! - HomeBank ledger serialization
//!
//! All functions are pure (no file I/O) for easy testing.

use crate::types::{ConvertError, LedgerRow, TransactionRow};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

pub const DATE_COLUMN: &str = "Data valuta";
pub const TYPE_COLUMN: &str = "Tipologia";
pub const CREDIT_COLUMN: &str = "Entrate";
pub const DEBIT_COLUMN: &str = "Uscite";

/// Columns the export must provide, in any order
pub const REQUIRED_COLUMNS: [&str; 4] = [DATE_COLUMN, TYPE_COLUMN, CREDIT_COLUMN, DEBIT_COLUMN];

/// Columns of the HomeBank import file, in order
pub const LEDGER_HEADER: [&str; 8] = [
    "date", "payment", "info", "payee", "memo", "amount", "category", "tags",
];

/// HomeBank separates fields with a semicolon
pub const LEDGER_DELIMITER: u8 = b';';

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date layouts found in exports, keyed by text length so that two-digit
/// years are never read as years of the first century
const INPUT_DATE_FORMATS: [(&str, usize); 5] = [
    ("%d/%m/%Y", 10),
    ("%d-%m-%Y", 10),
    ("%d.%m.%Y", 10),
    ("%Y-%m-%d", 10),
    ("%d/%m/%y", 8),
];

/// Export row deserialization target
///
/// Fields are looked up by header name, so any other column of the export
/// (including the unlabeled first one) is ignored.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StatementRecord {
    #[serde(rename = "Data valuta")]
    pub date: String,
    #[serde(rename = "Tipologia")]
    pub type_text: String,
    #[serde(rename = "Entrate")]
    pub credit: Option<String>,
    #[serde(rename = "Uscite")]
    pub debit: Option<String>,
}

/// Convert an export record to a TransactionRow
///
/// `line` is the 1-based line of the record in the export and is only used
/// for error context.
pub fn convert_statement_record(
    record: StatementRecord,
    line: u64,
) -> Result<TransactionRow, ConvertError> {
    let type_text = record.type_text.trim();
    if type_text.is_empty() {
        return Err(ConvertError::MissingTypeText { line });
    }

    Ok(TransactionRow {
        date: parse_date(&record.date)
            .ok_or_else(|| ConvertError::invalid_date(line, &record.date))?,
        type_text: type_text.to_string(),
        credit: parse_amount(record.credit.as_deref(), line)?,
        debit: parse_amount(record.debit.as_deref(), line)?,
    })
}

/// Parse an export date
///
/// A trailing time of day (`01/03/2023 00:00:00`) is ignored.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.split_whitespace().next()?;
    INPUT_DATE_FORMATS
        .iter()
        .filter(|(_, len)| value.len() == *len)
        .find_map(|(format, _)| NaiveDate::parse_from_str(value, format).ok())
}

/// Parse an optional export amount
///
/// Empty cells are absent amounts. Italian notation (`1.234,56`, `1.234`) and
/// plain notation (`-42.50`) are both accepted, with an optional `€` sign or
/// leading `+`. Without a decimal comma, dots between groups of exactly three
/// digits are thousands separators.
pub fn parse_amount(raw: Option<&str>, line: u64) -> Result<Option<Decimal>, ConvertError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '€' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    let unsigned = cleaned.strip_prefix('+').unwrap_or(&cleaned);
    let normalized = if unsigned.contains(',') || is_thousands_grouped(unsigned) {
        unsigned.replace('.', "").replace(',', ".")
    } else {
        unsigned.to_string()
    };

    Decimal::from_str(&normalized)
        .map(Some)
        .map_err(|_| ConvertError::invalid_amount(line, raw.trim()))
}

/// `1.234`, `-12.345.678`: digits grouped by three behind a leading group
fn is_thousands_grouped(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let mut groups = digits.split('.');
    let all_digits = |group: &str| group.bytes().all(|b| b.is_ascii_digit());

    let leading_ok = groups
        .next()
        .is_some_and(|group| (1..=3).contains(&group.len()) && all_digits(group));
    let rest: Vec<&str> = groups.collect();

    let trailing_ok = !rest.is_empty() && rest.iter().all(|g| g.len() == 3 && all_digits(g));

    leading_ok && trailing_ok
}

/// Check that a strftime pattern can format a date
pub fn validate_date_format(format: &str) -> Result<(), String> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        Err(format!("invalid date format '{}'", format))
    } else {
        Ok(())
    }
}

/// Write ledger rows in HomeBank CSV format
///
/// Writes a header line followed by one line per row, fields separated by
/// `;`, absent fields left empty. `date_format` must have been checked with
/// [`validate_date_format`].
pub fn write_ledger_csv(
    rows: &[LedgerRow],
    output: &mut dyn Write,
    date_format: &str,
) -> Result<(), ConvertError> {
    use csv::WriterBuilder;

    let mut writer = WriterBuilder::new()
        .delimiter(LEDGER_DELIMITER)
        .from_writer(output);

    writer.write_record(LEDGER_HEADER)?;

    for row in rows {
        writer.write_record([
            row.date.format(date_format).to_string(),
            row.payment.code().to_string(),
            row.info.clone().unwrap_or_default(),
            row.payee.clone().unwrap_or_default(),
            row.memo.clone(),
            row.amount.map(|a| a.to_string()).unwrap_or_default(),
            row.category.clone().unwrap_or_default(),
            row.tags.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
