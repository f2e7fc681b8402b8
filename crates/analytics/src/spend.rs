use chrono::{Datelike, NaiveDate};
use core_types::{CookLog, PaymentLog, Record, RecordKind, Settings};
use rust_decimal::Decimal;

/// The fee a cook session contributes.
///
/// The record's own snapshot wins; a missing or zero snapshot falls back to the
/// current default fee.
pub fn cook_fee(cook: &CookLog, settings: &Settings) -> Decimal {
    match cook.base_fee {
        Some(fee) if !fee.is_zero() => fee,
        _ => settings.base_fee,
    }
}

/// A payment is a tip when flagged, or when its remarks or notes mention "tip".
pub fn is_tip(payment: &PaymentLog, notes: Option<&str>) -> bool {
    let mentions_tip = |text: Option<&str>| {
        text.map(|t| t.to_lowercase().contains("tip"))
            .unwrap_or(false)
    };
    payment.is_tip == Some(true)
        || mentions_tip(payment.remarks.as_deref())
        || mentions_tip(notes)
}

/// Net balance owed to the cook:
/// cook fees + staff-bought groceries - non-tip payments.
///
/// Sums saturate at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
pub fn amount_due<'a, I>(records: I, settings: &Settings) -> Decimal
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut due = Decimal::ZERO;
    for record in records {
        match &record.kind {
            RecordKind::Cook(cook) => due = due.saturating_add(cook_fee(cook, settings)),
            RecordKind::Grocery(grocery) => {
                if grocery.bought_by.is_reimbursable() {
                    due = due.saturating_add(grocery.amount);
                }
            }
            RecordKind::Payment(payment) => {
                if !is_tip(payment, record.notes.as_deref()) {
                    due = due.saturating_sub(payment.amount_paid);
                }
            }
        }
    }
    due
}

/// Amount due counting only records dated on or before `cutoff`.
///
/// Recomputed from raw fields every time; stored derived values are ignored.
pub fn amount_due_as_of(records: &[Record], settings: &Settings, cutoff: NaiveDate) -> Decimal {
    amount_due(records.iter().filter(|r| r.date <= cutoff), settings)
}

/// Cook fees plus every grocery, whoever bought it. Payments do not count.
pub fn total_food_spend<'a, I>(records: I, settings: &Settings) -> Decimal
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(|record| match &record.kind {
            RecordKind::Cook(cook) => cook_fee(cook, settings),
            RecordKind::Grocery(grocery) => grocery.amount,
            RecordKind::Payment(_) => Decimal::ZERO,
        })
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Total food spend restricted to the calendar month containing `today`.
pub fn total_food_spend_this_month(
    records: &[Record],
    settings: &Settings,
    today: NaiveDate,
) -> Decimal {
    total_food_spend(
        records
            .iter()
            .filter(|r| r.date.year() == today.year() && r.date.month() == today.month()),
        settings,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_fee_snapshot_falls_back_to_settings() {
        let settings = settings_with_fee(dec!(625));
        let snapshot = CookLog { menu: "x".into(), base_fee: Some(dec!(500)), days_food_lasted: None };
        let zero = CookLog { base_fee: Some(Decimal::ZERO), ..snapshot.clone() };
        let missing = CookLog { base_fee: None, ..snapshot.clone() };
        assert_eq!(cook_fee(&snapshot, &settings), dec!(500));
        assert_eq!(cook_fee(&zero, &settings), dec!(625));
        assert_eq!(cook_fee(&missing, &settings), dec!(625));
    }

    #[test]
    fn tip_detection_covers_flag_remarks_and_notes() {
        let plain = PaymentLog { amount_paid: dec!(100), method: None, remarks: None, is_tip: None };
        assert!(!is_tip(&plain, None));
        assert!(is_tip(&PaymentLog { is_tip: Some(true), ..plain.clone() }, None));
        assert!(!is_tip(&PaymentLog { is_tip: Some(false), ..plain.clone() }, None));
        assert!(is_tip(&PaymentLog { remarks: Some("Diwali TIP".into()), ..plain.clone() }, None));
        assert!(is_tip(&plain, Some("small tip for the weekend")));
        // plain substring match
        assert!(is_tip(&plain, Some("multiple items")));
    }

    #[test]
    fn amount_due_ignores_me_groceries_and_tips() {
        let settings = settings_with_fee(dec!(625));
        let records = vec![
            cook(date(2025, 11, 1), None),
            grocery(date(2025, 11, 2), dec!(750), core_types::BoughtBy::Staff),
            grocery(date(2025, 11, 2), dec!(300), core_types::BoughtBy::Me),
            payment(date(2025, 11, 3), dec!(1000), None),
            payment(date(2025, 11, 4), dec!(200), Some("tip")),
        ];
        assert_eq!(amount_due(&records, &settings), dec!(375));
        assert_eq!(total_food_spend(&records, &settings), dec!(1675));
    }

    #[test]
    fn amount_due_as_of_is_inclusive() {
        let settings = settings_with_fee(dec!(500));
        let records = vec![
            cook(date(2025, 11, 1), None),
            payment(date(2025, 11, 2), dec!(500), None),
            cook(date(2025, 11, 3), None),
        ];
        assert_eq!(amount_due_as_of(&records, &settings, date(2025, 11, 1)), dec!(500));
        assert_eq!(amount_due_as_of(&records, &settings, date(2025, 11, 2)), dec!(0));
        assert_eq!(amount_due_as_of(&records, &settings, date(2025, 11, 3)), dec!(500));
        assert_eq!(amount_due_as_of(&records, &settings, date(2025, 10, 31)), dec!(0));
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let settings = settings_with_fee(dec!(500));
        let records = vec![
            grocery(date(2025, 11, 1), Decimal::MAX, core_types::BoughtBy::Staff),
            grocery(date(2025, 11, 2), Decimal::MAX, core_types::BoughtBy::Staff),
            payment(date(2025, 11, 3), Decimal::MAX, None),
            payment(date(2025, 11, 4), Decimal::MAX, None),
        ];
        assert_eq!(total_food_spend(&records, &settings), Decimal::MAX);
        assert_eq!(amount_due(&records[..2], &settings), Decimal::MAX);
        assert_eq!(amount_due(&records[2..], &settings), Decimal::MIN);
    }

    #[test]
    fn this_month_uses_calendar_month_of_today() {
        let settings = settings_with_fee(dec!(100));
        let records = vec![
            cook(date(2025, 10, 31), None),
            cook(date(2025, 11, 1), None),
            grocery(date(2025, 11, 30), dec!(50), core_types::BoughtBy::Me),
            cook(date(2024, 11, 15), None),
        ];
        assert_eq!(
            total_food_spend_this_month(&records, &settings, date(2025, 11, 18)),
            dec!(150)
        );
    }
}
