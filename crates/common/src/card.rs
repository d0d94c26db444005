//! Test card catalog
//!
//! The issuer emulator behind the application answers according to a fixed
//! set of card numbers. Scenarios select a card by its status sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Card status sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardStatus {
    /// Issuer approves the operation
    Approved,
    /// Issuer declines the operation
    Declined,
    /// Well-formed number the issuer does not know
    Invalid,
    /// All-zero number
    Zero,
    /// Number one digit short
    Fifteen,
}

impl CardStatus {
    pub const ALL: [CardStatus; 5] = [
        CardStatus::Approved,
        CardStatus::Declined,
        CardStatus::Invalid,
        CardStatus::Zero,
        CardStatus::Fifteen,
    ];

    /// Sentinel string as stored in the `status` columns
    pub fn as_str(&self) -> &'static str {
        match self {
            CardStatus::Approved => "APPROVED",
            CardStatus::Declined => "DECLINED",
            CardStatus::Invalid => "INVALID",
            CardStatus::Zero => "ZERO",
            CardStatus::Fifteen => "FIFTEEN",
        }
    }

    /// Card number typed into the form for this status
    pub fn number(&self) -> &'static str {
        match self {
            CardStatus::Approved => "4444 4444 4444 4441",
            CardStatus::Declined => "4444 4444 4444 4442",
            CardStatus::Invalid => "4444 4444 4444 4443",
            CardStatus::Zero => "0000 0000 0000 0000",
            CardStatus::Fifteen => "4444 4444 4444 444",
        }
    }
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CardStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCardStatus(s.to_string()))
    }
}

/// How the tour is paid for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseKind {
    /// "Купить": immediate debit card payment
    Debit,
    /// "Купить в кредит": credit request
    Credit,
}

impl PurchaseKind {
    pub const ALL: [PurchaseKind; 2] = [PurchaseKind::Debit, PurchaseKind::Credit];

    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseKind::Debit => "debit",
            PurchaseKind::Credit => "credit",
        }
    }

    /// Capitalized label used in scenario names
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseKind::Debit => "Debit",
            PurchaseKind::Credit => "Credit",
        }
    }

    /// Table holding the outcome record of this purchase kind
    pub fn record_table(&self) -> crate::db::Table {
        match self {
            PurchaseKind::Debit => crate::db::Table::Payment,
            PurchaseKind::Credit => crate::db::Table::CreditRequest,
        }
    }
}

impl fmt::Display for PurchaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(PurchaseKind::Debit),
            "credit" => Ok(PurchaseKind::Credit),
            other => Err(Error::UnknownPurchaseKind(other.to_string())),
        }
    }
}
