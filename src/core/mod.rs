//! Core conversion logic module
//!
//! This module contains the description parsing and row conversion components:
//! - `traits` - Matcher abstraction and ordered evaluation of alternatives
//! - `decomposer` - Splits a transaction type into category token and remainder
//! - `payee` - Extracts the counterparty name from a transaction type
//! - `category` - Maps category tokens to HomeBank payment methods
//! - `assembler` - Combines the above into HomeBank ledger rows

pub mod assembler;
pub mod category;
pub mod decomposer;
pub mod payee;
pub mod traits;

pub use assembler::RowAssembler;
pub use category::{CategoryMapper, DEFAULT_CATEGORY_TABLE};
pub use decomposer::decompose;
pub use payee::{capitalize, extract_payee, payee_name};
pub use traits::{first_capture, Matcher};
