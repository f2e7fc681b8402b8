//! Validation and derivation applied to every record written to the store.

use analytics::derive::{days_food_lasted, previous_cook_log};
use chrono::NaiveDate;
use core_types::{
    CookLog, CoreError, GroceryLog, LogRequest, MAX_AMOUNT, PaymentLog, Record, RecordDraft,
    RecordKind, RecordType, Settings,
};
use rust_decimal::Decimal;

/// Turns a request body into a draft ready for the store.
///
/// `existing` is the current ledger, used to derive `daysFoodLasted`.
/// `editing` is the stored record when this is an update: its type, date and
/// fee snapshot fill in for fields the request leaves out, and its
/// `daysFoodLasted` is kept unless the date moves.
pub fn prepare_draft(
    request: LogRequest,
    settings: &Settings,
    existing: &[Record],
    editing: Option<&Record>,
    today: NaiveDate,
) -> Result<RecordDraft, CoreError> {
    let record_type = request
        .record_type
        .or(editing.map(Record::record_type))
        .ok_or_else(|| CoreError::invalid("recordType", "Invalid record type"))?;

    let date = request
        .date
        .or(editing.map(|r| r.date))
        .ok_or_else(|| CoreError::invalid("date", "Date is required"))?;
    if date > today {
        return Err(CoreError::invalid("date", "Date cannot be in the future"));
    }

    let kind = match record_type {
        RecordType::Cook => RecordKind::Cook(cook_log(&request, settings, existing, editing, date)?),
        RecordType::Grocery => RecordKind::Grocery(grocery_log(&request)?),
        RecordType::Payment => RecordKind::Payment(payment_log(&request)?),
    };

    Ok(RecordDraft {
        date,
        notes: non_empty(request.notes),
        kind,
    })
}

fn cook_log(
    request: &LogRequest,
    settings: &Settings,
    existing: &[Record],
    editing: Option<&Record>,
    date: NaiveDate,
) -> Result<CookLog, CoreError> {
    let menu = request
        .menu
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| CoreError::invalid("menu", "Menu is required for cook log"))?;

    // The stored snapshot wins over the current default on edits.
    let base_fee = request
        .base_fee
        .or_else(|| editing.and_then(Record::as_cook).and_then(|c| c.base_fee))
        .unwrap_or(settings.base_fee);
    if base_fee < Decimal::ZERO {
        return Err(CoreError::invalid("baseFee", "Base fee must be positive"));
    }
    at_most_max("baseFee", base_fee)?;

    // An edit that keeps the date keeps the stored value.
    let unchanged = editing
        .filter(|r| r.date == date)
        .and_then(Record::as_cook)
        .map(|cook| cook.days_food_lasted);

    let days_food_lasted = match unchanged {
        Some(stored) => stored,
        None => {
            let previous = previous_cook_log(existing, date, editing.map(|r| r.id));
            days_food_lasted(date, previous.map(|r| r.date))
        }
    };

    Ok(CookLog {
        menu: menu.to_string(),
        base_fee: Some(base_fee),
        days_food_lasted,
    })
}

fn grocery_log(request: &LogRequest) -> Result<GroceryLog, CoreError> {
    let amount = request
        .amount
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| CoreError::invalid("amount", "Amount must be a positive number"))?;
    at_most_max("amount", amount)?;
    let bought_by = request
        .bought_by
        .ok_or_else(|| CoreError::invalid("boughtBy", "boughtBy must be STAFF or ME"))?;

    Ok(GroceryLog {
        category: request.category.clone().unwrap_or_default(),
        amount,
        bought_by,
        reimbursable: bought_by.is_reimbursable(),
        linked_cook_id: request.linked_cook_id,
    })
}

fn payment_log(request: &LogRequest) -> Result<PaymentLog, CoreError> {
    let amount_paid = request
        .amount_paid
        .filter(|a| *a > Decimal::ZERO)
        .ok_or_else(|| CoreError::invalid("amountPaid", "amountPaid must be a positive number"))?;
    at_most_max("amountPaid", amount_paid)?;

    Ok(PaymentLog {
        amount_paid,
        method: non_empty(request.method.clone()),
        remarks: non_empty(request.remarks.clone()),
        is_tip: request.is_tip,
    })
}

fn at_most_max(field: &str, value: Decimal) -> Result<(), CoreError> {
    if value > MAX_AMOUNT {
        return Err(CoreError::invalid(field, format!("{field} must not exceed {MAX_AMOUNT}")));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
