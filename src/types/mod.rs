//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Input rows, parsed descriptions and ledger rows
//! - `payment`: HomeBank payment-method enumeration
//! - `error`: Error types for the converter

pub mod error;
pub mod payment;
pub mod transaction;

pub use error::ConvertError;
pub use payment::PaymentMethod;
pub use transaction::{DecomposedType, LedgerRow, PayeeKind, PayeeMatch, TransactionRow};
