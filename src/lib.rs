//! CheBanca to HomeBank Converter Library
//! # Overview
//!
//! This library converts the movements export of the Italian bank CheBanca
//! into the CSV import format of the HomeBank personal finance application.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TransactionRow, LedgerRow, PaymentMethod, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Description parsing and row conversion:
//!   - [`core::decomposer`] - Splits `Tipologia` into category token and remainder
//!   - [`core::payee`] - Extracts the counterparty from `Tipologia`
//!   - [`core::category`] - Maps category tokens to HomeBank payment methods
//!   - [`core::assembler`] - Builds HomeBank rows from bank rows
//! - [`io`] - Export reading and HomeBank CSV writing
//! - [`pipeline`] - End-to-end conversion of one file
//!
//! # Output Columns
//!
//! HomeBank expects `date;payment;info;payee;memo;amount;category;tags`:
//!
//! - **date**: value date of the movement
//! - **payment**: payment method code (see [`PaymentMethod`])
//! - **info**: description text after the category label
//! - **payee**: counterparty name, when one of the known markers is present
//! - **memo**: the bank's category label
//! - **amount**: credit if present, otherwise debit
//! - **category**, **tags**: left empty

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use self::core::{CategoryMapper, RowAssembler};
pub use io::write_ledger_csv;
pub use pipeline::{ConversionReport, Converter};
pub use types::{
    ConvertError, DecomposedType, LedgerRow, PayeeKind, PayeeMatch, PaymentMethod,
    TransactionRow,
};
