//! Spreadsheet input
//!
//! CheBanca ships the movements as an `.xlsx` workbook. Its first worksheet is
//! turned into text records so that it goes through the same header detection
//! and footer trimming as a delimited export.

use crate::types::ConvertError;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use csv::{Position, StringRecord};
use rust_decimal::Decimal;
use std::io::Cursor;
use std::path::Path;

/// File extensions read as workbooks; anything else is delimited text
pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Date layout handed to the row conversion for date-typed cells
const CELL_DATE_FORMAT: &str = "%d/%m/%Y";

/// Whether `path` names a workbook rather than a delimited export
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Read the first worksheet of a workbook held in memory
///
/// Every record carries its 1-based worksheet row as line number.
pub fn read_workbook_records(bytes: Vec<u8>) -> Result<Vec<StringRecord>, ConvertError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConvertError::workbook("workbook has no worksheets"))??;

    Ok(range_records(&range))
}

/// Turn a worksheet range into text records
pub fn range_records(range: &Range<Data>) -> Vec<StringRecord> {
    let first_row = range.start().map_or(0, |(row, _)| u64::from(row));

    range
        .rows()
        .enumerate()
        .map(|(index, cells)| {
            let mut record: StringRecord = cells.iter().map(cell_text).collect();
            let mut position = Position::new();
            position.set_line(first_row + index as u64 + 1);
            record.set_position(Some(position));
            record
        })
        .collect()
}

/// Text of a single cell
///
/// Numbers are rounded to cents and written in plain notation; date cells are
/// written day first, as the bank prints them.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) => match Decimal::try_from(*value) {
            Ok(mut amount) => {
                amount.rescale(2);
                amount.to_string()
            }
            Err(_) => value.to_string(),
        },
        Data::DateTime(value) => value
            .as_datetime()
            .map(|datetime| datetime.format(CELL_DATE_FORMAT).to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}
