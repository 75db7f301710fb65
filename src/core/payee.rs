//! Payee extractor
//!
//! Looks for a counterparty name inside the full `Tipologia` text. Four
//! markers are recognised, tried in this order:
//!
//! 1. Electronic payment: `*PAYPAL123` (alphabetic name followed by digits)
//! 2. Point of sale: ` A (ITA) NAME`, optionally ` A I(ITA)` or ` A E (ITA)`
//! 3. Wire transfer: `RIF:123456ORD. NAME` or `RIF:123456BEN. NAME`
//! 4. Direct debit: `SDD - NAME ...`, or `SDD - SDD - NAME ...` where only the
//!    first word after the repeated marker is taken
//!
//! The first marker that matches anywhere in the text wins.

use crate::core::traits::{first_capture, Matcher};
use crate::types::{PayeeKind, PayeeMatch};
use regex::Regex;
use std::sync::LazyLock;

/// A payee pattern whose capture groups are alternative spellings of the name
#[derive(Debug, Clone)]
pub struct PayeeMatcher {
    kind: PayeeKind,
    pattern: Regex,
}

impl PayeeMatcher {
    /// Build a matcher
    ///
    /// The first capture group that takes part in a match is the name, so a
    /// pattern may offer one group per alternative layout.
    pub fn new(kind: PayeeKind, pattern: &str) -> Result<Self, regex::Error> {
        Ok(PayeeMatcher {
            kind,
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn kind(&self) -> PayeeKind {
        self.kind
    }
}

impl Matcher for PayeeMatcher {
    type Capture = PayeeMatch;

    fn captures(&self, text: &str) -> Option<PayeeMatch> {
        let captures = self.pattern.captures(text)?;
        let name = captures.iter().skip(1).flatten().next()?.as_str();
        (!name.is_empty()).then(|| PayeeMatch {
            kind: self.kind,
            name: name.to_string(),
        })
    }
}

// The `\s?\s?\.?` continuations in the point-of-sale and wire-transfer names
// reproduce the bank's observed layouts (double spaces, dotted abbreviations).
const ELECTRONIC_PAYMENT: &str = r"\*(?P<name>[A-Za-z]+(?:\s[A-Za-z]+)*)\d+";
const POINT_OF_SALE: &str = r"\sA\s(?:I|E\s)?\(\w{3}\)\s(?P<name>\w+(?:\s?\s?\.?\w+)*)";
const WIRE_TRANSFER: &str = r"RIF:\d+(?:ORD|BEN)\.\s(?P<name>[A-Za-z]+(?:\s?\s?\.?[A-Za-z]*){1})";
// A repeated marker ("Addebito SDD - SDD - NAME") is followed by a single word
const DIRECT_DEBIT: &str =
    r"SDD\s-\s(?:(?:SDD\s-\s)+(?P<chained>[A-Za-z]+)|(?P<name>[A-Za-z]+(?:\s[A-Za-z]+)*))";

static PAYEE_MATCHERS: LazyLock<Vec<PayeeMatcher>> = LazyLock::new(|| {
    [
        (PayeeKind::ElectronicPayment, ELECTRONIC_PAYMENT),
        (PayeeKind::PointOfSale, POINT_OF_SALE),
        (PayeeKind::WireTransfer, WIRE_TRANSFER),
        (PayeeKind::DirectDebit, DIRECT_DEBIT),
    ]
    .into_iter()
    .map(|(kind, pattern)| PayeeMatcher::new(kind, pattern).expect("valid payee pattern"))
    .collect()
});

/// Payee matchers in priority order
pub fn payee_matchers() -> &'static [PayeeMatcher] {
    &PAYEE_MATCHERS
}

/// Extract the raw payee capture from a transaction type
pub fn extract_payee(type_text: &str) -> Option<PayeeMatch> {
    first_capture(payee_matchers(), type_text)
}

/// Extract the payee name ready for the ledger, capitalized
///
/// Returns `None` when no marker matched; capitalization is only applied to
/// an actual capture.
pub fn payee_name(type_text: &str) -> Option<String> {
    extract_payee(type_text).map(|payee| capitalize(&payee.name))
}

/// Upper-case the first character and lower-case the rest
///
/// `"MERCHANT"` becomes `"Merchant"`, `"mario ROSSI"` becomes `"Mario rossi"`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
