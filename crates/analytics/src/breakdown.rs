use crate::report::MonthlySpend;
use crate::spend::total_food_spend;
use chrono::Datelike;
use core_types::{Record, RecordKind, Settings};
use std::collections::BTreeMap;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Food spend per calendar month, oldest first.
///
/// Every record is grouped, but only cook fees and groceries count towards the
/// spend; months holding nothing but payments still appear with zero spend.
pub fn monthly_breakdown(records: &[Record], settings: &Settings) -> Vec<MonthlySpend> {
    let mut months: BTreeMap<(i32, u32), Vec<&Record>> = BTreeMap::new();
    for record in records {
        months
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .push(record);
    }

    months
        .into_iter()
        .map(|((year, month), month_records)| {
            let month_name = MONTH_NAMES[(month - 1) as usize].to_string();
            let cook_count = month_records
                .iter()
                .filter(|r| matches!(r.kind, RecordKind::Cook(_)))
                .count();
            let grocery_count = month_records
                .iter()
                .filter(|r| matches!(r.kind, RecordKind::Grocery(_)))
                .count();
            MonthlySpend {
                month: format!("{month_name} {year}"),
                year,
                month_name,
                total_spend: total_food_spend(month_records.iter().copied(), settings),
                cook_count,
                grocery_count,
            }
        })
        .collect()
}
