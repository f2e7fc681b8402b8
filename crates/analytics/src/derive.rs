//! Values the write path derives and stores alongside a record.

use chrono::NaiveDate;
use core_types::{Record, RecordType};
use uuid::Uuid;

/// Days since the previous cook session, or `None` for the first session or a
/// non-positive gap.
pub fn days_food_lasted(cook_date: NaiveDate, previous_cook_date: Option<NaiveDate>) -> Option<i64> {
    let previous = previous_cook_date?;
    let days = (cook_date - previous).num_days();
    (days > 0).then_some(days)
}

/// The latest cook session strictly before `date`, ignoring `exclude`.
pub fn previous_cook_log<'a>(
    records: &'a [Record],
    date: NaiveDate,
    exclude: Option<Uuid>,
) -> Option<&'a Record> {
    records
        .iter()
        .filter(|r| r.record_type() == RecordType::Cook)
        .filter(|r| Some(r.id) != exclude)
        .filter(|r| r.date < date)
        .max_by_key(|r| r.date)
}
