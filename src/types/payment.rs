//! Payment-method enumeration of the HomeBank import format
//!
//! HomeBank identifies the payment method of an operation with a small integer.
//! Code 5 ("Internal Transfer") is reserved by HomeBank for transfers between
//! its own accounts and is never emitted by the converter, so it has no variant.

use crate::types::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// Payment method codes understood by HomeBank
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PaymentMethod {
    #[default]
    None = 0,
    CreditCard = 1,
    Check = 2,
    Cash = 3,
    BankTransfer = 4,
    DebitCard = 6,
    StandingOrder = 7,
    ElectronicPayment = 8,
    Deposit = 9,
    FiFee = 10,
    DirectDebit = 11,
}

impl PaymentMethod {
    /// Every emittable payment method, in code order
    pub const ALL: [PaymentMethod; 11] = [
        PaymentMethod::None,
        PaymentMethod::CreditCard,
        PaymentMethod::Check,
        PaymentMethod::Cash,
        PaymentMethod::BankTransfer,
        PaymentMethod::DebitCard,
        PaymentMethod::StandingOrder,
        PaymentMethod::ElectronicPayment,
        PaymentMethod::Deposit,
        PaymentMethod::FiFee,
        PaymentMethod::DirectDebit,
    ];

    /// Numeric code written to the `payment` column
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a payment method by its numeric code
    ///
    /// Returns `None` for the reserved code 5 and anything above 11.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.code() == code)
    }

    /// Human-readable name as shown by HomeBank
    pub fn name(self) -> &'static str {
        match self {
            PaymentMethod::None => "None",
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::Check => "Check",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::StandingOrder => "Standing order",
            PaymentMethod::ElectronicPayment => "Electronic payment",
            PaymentMethod::Deposit => "Deposit",
            PaymentMethod::FiFee => "FI Fee",
            PaymentMethod::DirectDebit => "Direct Debit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses either a numeric code (`"4"`) or a name (`"Bank Transfer"`, case-insensitive)
impl FromStr for PaymentMethod {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let parsed = match value.parse::<u8>() {
            Ok(code) => Self::from_code(code),
            Err(_) => Self::ALL
                .into_iter()
                .find(|method| method.name().eq_ignore_ascii_case(value)),
        };
        parsed.ok_or_else(|| ConvertError::invalid_payment_method(value))
    }
}
