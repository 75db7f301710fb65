//! Category mapper
//!
//! Maps a CheBanca category token to a HomeBank payment method through an
//! immutable lookup table. Tokens missing from the table map to
//! [`PaymentMethod::None`].
//!
//! The built-in table can be extended at startup with a `;`-delimited file of
//! `token;payment` lines, where `payment` is a HomeBank code or name:
//!
//! ```text
//! # token;payment
//! Giroconto;Bank Transfer
//! Ricarica carta;6
//! ```

use crate::types::{ConvertError, PaymentMethod};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Category tokens known to appear in CheBanca exports
pub const DEFAULT_CATEGORY_TABLE: [(&str, PaymentMethod); 9] = [
    ("Stipendio", PaymentMethod::BankTransfer),
    ("Bonif. v/fav.", PaymentMethod::BankTransfer),
    ("Disposizione", PaymentMethod::BankTransfer),
    ("Addebito canone", PaymentMethod::FiFee),
    ("Pagam. POS", PaymentMethod::DebitCard),
    ("Addebito SDD", PaymentMethod::DirectDebit),
    ("POS-PAYPAL", PaymentMethod::ElectronicPayment),
    ("cont. ATM", PaymentMethod::None),
    ("Bancomat", PaymentMethod::None),
];

/// Lookup table from category token to payment method
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMapper {
    table: HashMap<String, PaymentMethod>,
}

impl Default for CategoryMapper {
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_CATEGORY_TABLE
                .iter()
                .map(|(token, method)| (token.to_string(), *method)),
        )
    }
}

impl CategoryMapper {
    /// Create a mapper holding the built-in table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper holding exactly the given entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, PaymentMethod)>,
    {
        CategoryMapper {
            table: entries
                .into_iter()
                .map(|(token, method)| (token.trim().to_string(), method))
                .collect(),
        }
    }

    /// Payment method for a category token, `PaymentMethod::None` when unknown
    pub fn map(&self, category_token: &str) -> PaymentMethod {
        self.table
            .get(category_token.trim())
            .copied()
            .unwrap_or_default()
    }

    /// Whether the token has an entry in the table
    pub fn is_mapped(&self, category_token: &str) -> bool {
        self.table.contains_key(category_token.trim())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Add entries from a mapping file, overriding existing tokens
    pub fn with_overrides_from_path(self, path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                ConvertError::file_not_found(&path.display().to_string())
            }
            _ => e.into(),
        })?;
        self.with_overrides(file)
    }

    /// Add entries read from `token;payment` records
    ///
    /// Lines starting with `#` are comments. A payment that is not an
    /// emittable HomeBank code or name rejects the whole file.
    pub fn with_overrides<R: Read>(mut self, reader: R) -> Result<Self, ConvertError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .from_reader(reader);

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|pos| pos.line());
            let (token, payment) = match (record.get(0), record.get(1), record.len()) {
                (Some(token), Some(payment), 2) if !token.is_empty() => (token, payment),
                _ => {
                    return Err(ConvertError::ParseError {
                        line,
                        message: "expected 'token;payment'".to_string(),
                    })
                }
            };

            let method = payment
                .parse::<PaymentMethod>()
                .map_err(|e| ConvertError::invalid_mapping(token, e.to_string()))?;
            self.table.insert(token.to_string(), method);
        }

        Ok(self)
    }
}
