use crate::enums::{BoughtBy, RecordType};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Largest amount, paid amount or fee accepted on write.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// A single ledger entry as returned by the store.
///
/// The common fields live here; the variant-specific fields live in `kind`,
/// which is flattened so the JSON shape is one object tagged by `recordType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: RecordKind,
}

/// The closed set of record shapes. Exactly one per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "recordType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Cook(CookLog),
    Grocery(GroceryLog),
    Payment(PaymentLog),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookLog {
    pub menu: String,
    /// Fee snapshot taken when the session was logged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<Decimal>,
    /// Days since the previous cook session, derived on write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_food_lasted: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryLog {
    #[serde(default)]
    pub category: String,
    pub amount: Decimal,
    pub bought_by: BoughtBy,
    /// Derived on write: `bought_by == STAFF`.
    #[serde(default)]
    pub reimbursable: bool,
    /// Advisory link to a cook session; never dereferenced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_cook_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLog {
    pub amount_paid: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_tip: Option<bool>,
}

impl RecordKind {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordKind::Cook(_) => RecordType::Cook,
            RecordKind::Grocery(_) => RecordType::Grocery,
            RecordKind::Payment(_) => RecordType::Payment,
        }
    }
}

impl Record {
    pub fn record_type(&self) -> RecordType {
        self.kind.record_type()
    }

    pub fn as_cook(&self) -> Option<&CookLog> {
        match &self.kind {
            RecordKind::Cook(cook) => Some(cook),
            _ => None,
        }
    }

    pub fn as_grocery(&self) -> Option<&GroceryLog> {
        match &self.kind {
            RecordKind::Grocery(grocery) => Some(grocery),
            _ => None,
        }
    }

    pub fn as_payment(&self) -> Option<&PaymentLog> {
        match &self.kind {
            RecordKind::Payment(payment) => Some(payment),
            _ => None,
        }
    }
}

/// A validated record that has not been assigned an id or timestamps yet.
/// This is what the write path hands to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub kind: RecordKind,
}

impl RecordDraft {
    /// Materializes the draft into a stored record.
    pub fn into_record(
        self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Record {
        Record {
            id,
            date: self.date,
            notes: self.notes,
            created_at,
            updated_at,
            kind: self.kind,
        }
    }
}
