//! Transaction-related types for the CheBanca to HomeBank converter
//!
//! This module defines the input row read from the bank export, the
//! intermediate results of description parsing, and the HomeBank ledger row.

use crate::types::payment::PaymentMethod;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One movement of the bank export, after the table collaborator has
/// dropped the preamble, the unlabeled first column and the summary rows
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    /// Value date (`Data valuta`)
    pub date: NaiveDate,

    /// Free-text transaction type (`Tipologia`), never empty
    pub type_text: String,

    /// Incoming amount (`Entrate`)
    pub credit: Option<Decimal>,

    /// Outgoing amount (`Uscite`), already signed by the bank
    pub debit: Option<Decimal>,
}

impl TransactionRow {
    /// Signed amount of the movement
    ///
    /// The credit wins whenever it is present; otherwise the debit is used
    /// as-is, without negation. `None` when both columns are empty.
    pub fn amount(&self) -> Option<Decimal> {
        self.credit.or(self.debit)
    }
}

/// A `Tipologia` field split into its category token and free-text remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecomposedType {
    /// Source-vocabulary label, one or two words (e.g. `Pagam. POS`)
    pub category_token: String,

    /// Text after the separator; `None` when no separator was found
    pub remainder: Option<String>,
}

/// Which marker a payee name was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayeeKind {
    /// `*NAME123` electronic payment reference (PayPal and similar)
    ElectronicPayment,
    /// ` A (ITA) NAME` card payment at a point of sale
    PointOfSale,
    /// `RIF:123ORD. NAME` / `RIF:123BEN. NAME` wire transfer reference
    WireTransfer,
    /// `SDD - NAME` SEPA direct debit
    DirectDebit,
}

/// A payee name captured by exactly one of the payee matchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeeMatch {
    pub kind: PayeeKind,
    pub name: String,
}

/// One line of the HomeBank CSV import file
///
/// Fields appear in the file in declaration order:
/// `date;payment;info;payee;memo;amount;category;tags`.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub date: NaiveDate,
    pub payment: PaymentMethod,
    pub info: Option<String>,
    pub payee: Option<String>,
    /// Category token repeated as free text so the user can see the bank's label
    pub memo: String,
    pub amount: Option<Decimal>,
    /// Left empty for the user to fill in HomeBank
    pub category: Option<String>,
    pub tags: Option<String>,
}
