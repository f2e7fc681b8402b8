use crate::report::TrackingWindow;
use chrono::NaiveDate;
use core_types::{Record, RecordType, Settings};

/// Resolves the date span the ledger covers.
///
/// With `filter` set, only records of that type are considered. The start is
/// the settings override when present, otherwise the earliest date; the end is
/// the latest date, or `today` when nothing matches. `days` never drops below 1.
pub fn tracking_window(
    records: &[Record],
    settings: &Settings,
    filter: Option<RecordType>,
    today: NaiveDate,
) -> TrackingWindow {
    let mut dates = records
        .iter()
        .filter(|r| filter.is_none_or(|t| r.record_type() == t))
        .map(|r| r.date);

    let (start_date, end_date) = match dates.next() {
        None => (settings.tracking_start_date.unwrap_or(today), today),
        Some(first) => {
            let (earliest, latest) =
                dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
            (settings.tracking_start_date.unwrap_or(earliest), latest)
        }
    };

    let days = (end_date - start_date).num_days().max(1);

    TrackingWindow { start_date, end_date, days }
}
