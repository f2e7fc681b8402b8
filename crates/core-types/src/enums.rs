use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// The discriminating tag of a ledger record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    Cook,
    Grocery,
    Payment,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Cook => "COOK",
            RecordType::Grocery => "GROCERY",
            RecordType::Payment => "PAYMENT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COOK" => Ok(RecordType::Cook),
            "GROCERY" => Ok(RecordType::Grocery),
            "PAYMENT" => Ok(RecordType::Payment),
            other => Err(CoreError::InvalidInput(
                "recordType".to_string(),
                format!("unknown record type '{other}'"),
            )),
        }
    }
}

/// Who paid for a grocery run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoughtBy {
    /// Bought by the cook; owed back.
    Staff,
    /// Bought by the household directly.
    Me,
}

impl BoughtBy {
    /// Only staff-bought groceries are reimbursable.
    pub fn is_reimbursable(&self) -> bool {
        matches!(self, BoughtBy::Staff)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoughtBy::Staff => "STAFF",
            BoughtBy::Me => "ME",
        }
    }
}

impl fmt::Display for BoughtBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoughtBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STAFF" => Ok(BoughtBy::Staff),
            "ME" => Ok(BoughtBy::Me),
            _ => Err(CoreError::InvalidInput(
                "boughtBy".to_string(),
                "boughtBy must be STAFF or ME".to_string(),
            )),
        }
    }
}
