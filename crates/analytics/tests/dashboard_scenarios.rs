use analytics::{DashboardMetrics, MetricsEngine};
use chrono::{NaiveDate, TimeZone, Utc};
use core_types::{BoughtBy, CookLog, GroceryLog, PaymentLog, Record, RecordKind, Settings};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

fn record(day: &str, notes: Option<&str>, kind: RecordKind) -> Record {
    let date = date(day);
    let ts = Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
    Record {
        id: Uuid::new_v4(),
        date,
        notes: notes.map(String::from),
        created_at: ts,
        updated_at: ts,
        kind,
    }
}

fn cook(day: &str, base_fee: Option<Decimal>) -> Record {
    record(
        day,
        None,
        RecordKind::Cook(CookLog { menu: "Chicken curry".into(), base_fee, days_food_lasted: None }),
    )
}

fn grocery(day: &str, amount: Decimal, bought_by: BoughtBy) -> Record {
    record(
        day,
        None,
        RecordKind::Grocery(GroceryLog {
            category: "Meat".into(),
            amount,
            bought_by,
            reimbursable: bought_by.is_reimbursable(),
            linked_cook_id: None,
        }),
    )
}

fn payment(day: &str, amount_paid: Decimal, remarks: Option<&str>, notes: Option<&str>) -> Record {
    record(
        day,
        notes,
        RecordKind::Payment(PaymentLog {
            amount_paid,
            method: Some("UPI".into()),
            remarks: remarks.map(String::from),
            is_tip: None,
        }),
    )
}

fn settings(base_fee: Decimal) -> Settings {
    Settings {
        base_fee,
        baseline_daily_avg: dec!(380),
        ..Settings::default()
    }
}

fn calculate(records: &[Record], settings: &Settings, today: &str) -> DashboardMetrics {
    MetricsEngine::new().calculate(records, settings, date(today))
}

#[test]
fn capped_gap_scenario_matches_expected_savings() {
    let settings = settings(dec!(625));
    let records = vec![cook("2025-11-01", Some(dec!(625))), cook("2025-11-09", Some(dec!(625)))];

    let metrics = calculate(&records, &settings, "2025-11-20");

    assert_eq!(metrics.avg_cook_cost_per_day, dec!(156.25));
    assert_eq!(metrics.avg_groceries_cost_per_day, Decimal::ZERO);
    assert_eq!(metrics.effective_daily_cost, dec!(156.25));
    assert_eq!(metrics.savings.daily, dec!(223.75));
    assert_eq!(metrics.savings.monthly, dec!(6712.5));
    assert_eq!(metrics.savings.vs_low, dec!(203.75));
    assert_eq!(metrics.savings.vs_high, dec!(243.75));
}

#[test]
fn tip_payment_is_left_out_of_amount_due() {
    let settings = settings(dec!(625));
    let records = vec![
        cook("2025-11-01", None),
        grocery("2025-11-02", dec!(750), BoughtBy::Staff),
        payment("2025-11-03", dec!(380), Some("Tip"), None),
    ];

    let metrics = calculate(&records, &settings, "2025-11-20");

    assert_eq!(metrics.amount_due, dec!(1375));
    assert_eq!(metrics.total_food_spend.all_time, dec!(1375));
    assert_eq!(metrics.total_food_spend.this_month, dec!(1375));
    assert_eq!(metrics.stats.total_payments, 1);
}

#[test]
fn tip_mentioned_only_in_notes_is_still_a_tip() {
    let settings = settings(dec!(500));
    let records = vec![
        cook("2025-11-01", None),
        payment("2025-11-02", dec!(100), None, Some("TIP for Diwali")),
        payment("2025-11-03", dec!(200), Some("weekly"), None),
    ];

    let metrics = calculate(&records, &settings, "2025-11-20");

    assert_eq!(metrics.amount_due, dec!(300));
}

#[test]
fn own_groceries_separate_spend_from_amount_due() {
    let settings = settings(dec!(500));
    let records = vec![
        cook("2025-11-01", None),
        grocery("2025-11-01", dec!(400), BoughtBy::Staff),
        grocery("2025-11-04", dec!(250), BoughtBy::Me),
    ];

    let metrics = calculate(&records, &settings, "2025-11-20");

    assert_eq!(metrics.amount_due, dec!(900));
    assert_eq!(metrics.total_food_spend.all_time, dec!(1150));
    assert_ne!(metrics.amount_due, metrics.total_food_spend.all_time);
    // 650 spread over the three days between the first and last grocery
    assert_eq!(
        metrics.avg_groceries_cost_per_day.round_dp(2),
        dec!(216.67)
    );
}

#[test]
fn previous_months_drop_out_of_this_month() {
    let settings = settings(dec!(500));
    let records = vec![
        cook("2025-10-28", None),
        cook("2025-10-30", None),
        cook("2025-11-02", None),
    ];

    let metrics = calculate(&records, &settings, "2025-11-20");

    assert_eq!(metrics.total_food_spend.all_time, dec!(1500));
    assert_eq!(metrics.total_food_spend.this_month, dec!(500));
    assert_eq!(metrics.monthly_breakdown.len(), 2);
    assert_eq!(metrics.monthly_breakdown[0].month, "Oct 2025");
    assert_eq!(metrics.monthly_breakdown[0].cook_count, 2);
    assert_eq!(metrics.monthly_breakdown[1].month, "Nov 2025");
    assert_eq!(metrics.tracking_window.days, 5);
}

#[test]
fn tracking_override_applies_to_display_and_grocery_windows() {
    let settings = Settings {
        tracking_start_date: Some(date("2025-11-01")),
        ..settings(dec!(500))
    };
    let records = vec![
        grocery("2025-11-05", dec!(300), BoughtBy::Me),
        grocery("2025-11-11", dec!(300), BoughtBy::Me),
    ];

    let metrics = calculate(&records, &settings, "2025-11-20");

    assert_eq!(metrics.tracking_window.start_date, date("2025-11-01"));
    assert_eq!(metrics.tracking_window.end_date, date("2025-11-11"));
    assert_eq!(metrics.tracking_window.days, 10);
    assert_eq!(metrics.avg_groceries_cost_per_day, dec!(60));
}

#[test]
fn aggregation_is_idempotent_and_order_independent() {
    let settings = settings(dec!(625));
    let mut records = vec![
        cook("2025-11-01", None),
        cook("2025-11-04", Some(dec!(700))),
        cook("2025-11-06", None),
        grocery("2025-11-02", dec!(320), BoughtBy::Staff),
        grocery("2025-11-05", dec!(180), BoughtBy::Me),
        payment("2025-11-05", dec!(1000), None, None),
    ];

    let first = calculate(&records, &settings, "2025-11-20");
    let second = calculate(&records, &settings, "2025-11-20");
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    records.reverse();
    let reversed = calculate(&records, &settings, "2025-11-20");
    assert_eq!(first, reversed);
}

#[test]
fn metrics_serialize_with_dashboard_field_names() {
    let metrics = calculate(&[cook("2025-11-01", None)], &settings(dec!(625)), "2025-11-20");
    let json = serde_json::to_value(&metrics).unwrap();

    for key in [
        "amountDue",
        "totalFoodSpend",
        "monthlyBreakdown",
        "effectiveDailyCost",
        "avgCookCostPerDay",
        "avgGroceriesCostPerDay",
        "baselineCost",
        "savings",
        "trackingWindow",
        "stats",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["totalFoodSpend"].get("thisMonth").is_some());
    assert!(json["savings"].get("vsLow").is_some());
    assert_eq!(json["trackingWindow"]["startDate"], "2025-11-01");
    assert_eq!(json["stats"]["totalCookSessions"], 1);
    assert_eq!(json["monthlyBreakdown"][0]["monthName"], "Nov");
}

#[test]
fn metric_amounts_serialize_as_numbers() {
    let metrics = calculate(&[cook("2025-11-01", None)], &settings(dec!(625)), "2025-11-20");
    let json = serde_json::to_value(&metrics).unwrap();

    assert_eq!(json["amountDue"].as_f64(), Some(625.0));
    assert_eq!(json["totalFoodSpend"]["allTime"].as_f64(), Some(625.0));
    assert_eq!(json["monthlyBreakdown"][0]["totalSpend"].as_f64(), Some(625.0));
    assert!(json["effectiveDailyCost"].is_number());
    assert!(json["baselineCost"]["avg"].is_number());
    assert!(json["savings"]["daily"].is_number());
}
