use crate::spend::cook_fee;
use crate::window::tracking_window;
use chrono::NaiveDate;
use core_types::{Record, RecordKind, RecordType, Settings};
use rust_decimal::Decimal;
use tracing::debug;

/// Gaps of this many days or more are treated as `CAPPED_GAP_DAYS`.
pub const GAP_CAP_THRESHOLD_DAYS: i64 = 5;
pub const CAPPED_GAP_DAYS: i64 = 4;

/// Days between two cook sessions after capping.
pub fn capped_gap(from: NaiveDate, to: NaiveDate) -> i64 {
    let gap = (to - from).num_days();
    if gap >= GAP_CAP_THRESHOLD_DAYS {
        CAPPED_GAP_DAYS
    } else {
        gap
    }
}

/// Mean of the per-session cook rates `fee / gap-to-next-session`.
///
/// The latest session has no next gap yet and contributes no rate, so a single
/// cook session yields zero. Pairs with a non-positive gap or fee are skipped.
pub fn avg_cook_cost_per_day(records: &[Record], settings: &Settings) -> Decimal {
    let mut cooks: Vec<(&Record, Decimal)> = records
        .iter()
        .filter_map(|r| match &r.kind {
            RecordKind::Cook(cook) => Some((r, cook_fee(cook, settings))),
            _ => None,
        })
        .collect();

    // Ties on date are broken by creation time and id so the result does not
    // depend on input order.
    cooks.sort_by(|(a, _), (b, _)| {
        a.date
            .cmp(&b.date)
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });

    let rates: Vec<Decimal> = cooks
        .windows(2)
        .filter_map(|pair| {
            let (current, fee) = pair[0];
            let (next, _) = pair[1];
            let gap = capped_gap(current.date, next.date);
            if gap <= 0 || fee <= Decimal::ZERO {
                return None;
            }
            Some(fee / Decimal::from(gap))
        })
        .collect();

    if rates.is_empty() {
        return Decimal::ZERO;
    }

    let sum = rates.iter().copied().fold(Decimal::ZERO, Decimal::saturating_add);
    let avg = sum / Decimal::from(rates.len());
    debug!(sessions = cooks.len(), rates = rates.len(), %avg, "Derived cook cost per day.");
    avg
}

/// All groceries (staff and own) spread over the grocery-only tracking window.
pub fn avg_groceries_cost_per_day(
    records: &[Record],
    settings: &Settings,
    today: NaiveDate,
) -> Decimal {
    let amounts: Vec<Decimal> = records
        .iter()
        .filter_map(|r| r.as_grocery().map(|g| g.amount))
        .collect();

    if amounts.is_empty() {
        return Decimal::ZERO;
    }

    let total = amounts.iter().copied().fold(Decimal::ZERO, Decimal::saturating_add);
    let window = tracking_window(records, settings, Some(RecordType::Grocery), today);
    let avg = total / Decimal::from(window.days);
    debug!(groceries = amounts.len(), days = window.days, %avg, "Derived grocery cost per day.");
    avg
}

/// Cook rate plus grocery rate.
pub fn effective_daily_cost(records: &[Record], settings: &Settings, today: NaiveDate) -> Decimal {
    avg_cook_cost_per_day(records, settings)
        .saturating_add(avg_groceries_cost_per_day(records, settings, today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use core_types::BoughtBy;
    use rust_decimal_macros::dec;

    #[test]
    fn gaps_of_five_or_more_are_capped_at_four() {
        let start = date(2025, 11, 1);
        assert_eq!(capped_gap(start, date(2025, 11, 5)), 4);
        assert_eq!(capped_gap(start, date(2025, 11, 6)), 4);
        assert_eq!(capped_gap(start, date(2025, 11, 21)), 4);
        assert_eq!(capped_gap(start, date(2025, 11, 3)), 2);
    }

    #[test]
    fn five_and_twenty_day_gaps_give_the_same_rate() {
        let settings = settings_with_fee(dec!(600));
        let five = vec![cook(date(2025, 11, 1), None), cook(date(2025, 11, 6), None)];
        let twenty = vec![cook(date(2025, 11, 1), None), cook(date(2025, 11, 21), None)];
        assert_eq!(
            avg_cook_cost_per_day(&five, &settings),
            avg_cook_cost_per_day(&twenty, &settings)
        );
        assert_eq!(avg_cook_cost_per_day(&five, &settings), dec!(150));
    }

    #[test]
    fn single_cook_session_has_no_rate() {
        let settings = settings_with_fee(dec!(625));
        let records = vec![cook(date(2025, 11, 1), None)];
        assert_eq!(avg_cook_cost_per_day(&records, &settings), Decimal::ZERO);
        assert_eq!(avg_cook_cost_per_day(&[], &settings), Decimal::ZERO);
    }

    #[test]
    fn rate_uses_the_earlier_session_fee_and_averages_pairs() {
        let settings = settings_with_fee(dec!(0));
        let records = vec![
            cook(date(2025, 11, 5), Some(dec!(300))),
            cook(date(2025, 11, 1), Some(dec!(800))),
            cook(date(2025, 11, 8), Some(dec!(999))),
        ];
        // 800 / 4 = 200 and 300 / 3 = 100
        assert_eq!(avg_cook_cost_per_day(&records, &settings), dec!(150));
    }

    #[test]
    fn same_day_sessions_and_free_sessions_are_skipped() {
        let settings = settings_with_fee(dec!(0));
        let records = vec![
            cook(date(2025, 11, 1), Some(dec!(400))),
            cook(date(2025, 11, 1), Some(dec!(400))),
            cook(date(2025, 11, 3), None),
            cook(date(2025, 11, 5), Some(dec!(400))),
        ];
        // pair 1: gap 0, skipped; pair 2: 400 / 2; pair 3: fee 0, skipped
        assert_eq!(avg_cook_cost_per_day(&records, &settings), dec!(200));
    }

    #[test]
    fn groceries_are_spread_over_their_own_window() {
        let settings = Settings::default();
        let records = vec![
            cook(date(2025, 10, 1), Some(dec!(500))),
            grocery(date(2025, 11, 1), dec!(600), BoughtBy::Staff),
            grocery(date(2025, 11, 11), dec!(400), BoughtBy::Me),
        ];
        assert_eq!(
            avg_groceries_cost_per_day(&records, &settings, date(2025, 11, 20)),
            dec!(100)
        );
    }

    #[test]
    fn no_groceries_means_zero_rate() {
        let records = vec![cook(date(2025, 11, 1), Some(dec!(500)))];
        assert_eq!(
            avg_groceries_cost_per_day(&records, &Settings::default(), date(2025, 11, 20)),
            Decimal::ZERO
        );
    }

    #[test]
    fn effective_cost_is_the_sum_of_both_rates() {
        let settings = settings_with_fee(dec!(400));
        let records = vec![
            cook(date(2025, 11, 1), None),
            cook(date(2025, 11, 3), None),
            grocery(date(2025, 11, 1), dec!(100), BoughtBy::Me),
            grocery(date(2025, 11, 3), dec!(100), BoughtBy::Staff),
        ];
        // 400 / 2 + 200 / 2
        assert_eq!(effective_daily_cost(&records, &settings, date(2025, 11, 3)), dec!(300));
    }
}
