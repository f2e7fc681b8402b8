use crate::enums::{BoughtBy, RecordType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The loosely-typed body accepted when a log is created or edited.
///
/// Every variant field is optional here; the write path checks that the
/// fields required by `record_type` are present before building a draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRequest {
    pub record_type: Option<RecordType>,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,

    // COOK
    #[serde(default)]
    pub menu: Option<String>,
    #[serde(default)]
    pub base_fee: Option<Decimal>,

    // GROCERY
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub bought_by: Option<BoughtBy>,
    #[serde(default)]
    pub linked_cook_id: Option<Uuid>,

    // PAYMENT
    #[serde(default)]
    pub amount_paid: Option<Decimal>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub is_tip: Option<bool>,
}

impl LogRequest {
    pub fn cook(date: NaiveDate, menu: impl Into<String>, base_fee: Option<Decimal>) -> Self {
        Self {
            record_type: Some(RecordType::Cook),
            date: Some(date),
            menu: Some(menu.into()),
            base_fee,
            ..Self::default()
        }
    }

    pub fn grocery(
        date: NaiveDate,
        category: impl Into<String>,
        amount: Decimal,
        bought_by: BoughtBy,
    ) -> Self {
        Self {
            record_type: Some(RecordType::Grocery),
            date: Some(date),
            category: Some(category.into()),
            amount: Some(amount),
            bought_by: Some(bought_by),
            ..Self::default()
        }
    }

    pub fn payment(date: NaiveDate, amount_paid: Decimal) -> Self {
        Self {
            record_type: Some(RecordType::Payment),
            date: Some(date),
            amount_paid: Some(amount_paid),
            ..Self::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// Query parameters for listing logs. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    #[serde(rename = "type", default)]
    pub record_type: Option<RecordType>,
    #[serde(default)]
    pub from: Option<NaiveDate>,
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl RecordFilter {
    pub fn matches(&self, record_type: RecordType, date: NaiveDate) -> bool {
        if self.record_type.is_some_and(|t| t != record_type) {
            return false;
        }
        if self.from.is_some_and(|from| date < from) {
            return false;
        }
        if self.to.is_some_and(|to| date > to) {
            return false;
        }
        true
    }
}
