use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows, derived from one snapshot of the ledger.
///
/// Amounts go over the wire as JSON numbers.
///
/// This struct is the final output of the `MetricsEngine`. It is never
/// persisted; every request recomputes it from the current records and settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    // I. Balances
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_due: Decimal,
    pub total_food_spend: TotalFoodSpend,
    pub monthly_breakdown: Vec<MonthlySpend>,

    // II. Daily Rates
    #[serde(with = "rust_decimal::serde::float")]
    pub effective_daily_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_cook_cost_per_day: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_groceries_cost_per_day: Decimal,

    // III. Baseline Comparison
    pub baseline_cost: BaselineCost,
    pub savings: Savings,

    // IV. Coverage
    pub tracking_window: TrackingWindow,
    pub stats: LedgerStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalFoodSpend {
    #[serde(with = "rust_decimal::serde::float")]
    pub this_month: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub all_time: Decimal,
}

/// Spend for a single calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpend {
    /// Display label, e.g. `"Nov 2025"`.
    pub month: String,
    pub year: i32,
    pub month_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_spend: Decimal,
    pub cook_count: usize,
    pub grocery_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineCost {
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg: Decimal,
}

/// Baseline minus effective daily cost. Negative values mean overspend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    #[serde(with = "rust_decimal::serde::float")]
    pub daily: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub vs_low: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub vs_high: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Always at least 1.
    pub days: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    pub total_cook_sessions: usize,
    pub total_groceries: usize,
    pub total_payments: usize,
}
