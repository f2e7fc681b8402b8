use crate::breakdown::monthly_breakdown;
use crate::daily_cost::{avg_cook_cost_per_day, avg_groceries_cost_per_day};
use crate::report::{DashboardMetrics, LedgerStats, TotalFoodSpend};
use crate::savings::{baseline_cost, calculate_savings};
use crate::spend::{amount_due, amount_due_as_of, total_food_spend, total_food_spend_this_month};
use crate::window::tracking_window;
use chrono::NaiveDate;
use core_types::{Record, RecordKind, Settings};
use rust_decimal::Decimal;
use tracing::debug;

/// A stateless calculator for deriving dashboard metrics from the ledger.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating dashboard metrics.
    ///
    /// # Arguments
    ///
    /// * `records` - Every record in the ledger, in any order.
    /// * `settings` - The fully-resolved settings document.
    /// * `today` - The evaluation date; drives "this month" and empty windows.
    ///
    /// Each derivation reads the same snapshot independently. The only
    /// dependency between them is the effective daily cost feeding savings.
    pub fn calculate(
        &self,
        records: &[Record],
        settings: &Settings,
        today: NaiveDate,
    ) -> DashboardMetrics {
        let avg_cook_cost_per_day = avg_cook_cost_per_day(records, settings);
        let avg_groceries_cost_per_day = avg_groceries_cost_per_day(records, settings, today);
        let effective_daily_cost = avg_cook_cost_per_day.saturating_add(avg_groceries_cost_per_day);

        let metrics = DashboardMetrics {
            amount_due: amount_due(records, settings),
            total_food_spend: TotalFoodSpend {
                this_month: total_food_spend_this_month(records, settings, today),
                all_time: total_food_spend(records, settings),
            },
            monthly_breakdown: monthly_breakdown(records, settings),
            effective_daily_cost,
            avg_cook_cost_per_day,
            avg_groceries_cost_per_day,
            baseline_cost: baseline_cost(settings),
            savings: calculate_savings(effective_daily_cost, settings),
            tracking_window: tracking_window(records, settings, None, today),
            stats: Self::count_records(records),
        };

        debug!(
            records = records.len(),
            amount_due = %metrics.amount_due,
            effective_daily_cost = %metrics.effective_daily_cost,
            "Calculated dashboard metrics."
        );

        metrics
    }

    /// What was owed right after the given date, counting that date's records.
    pub fn amount_due_as_of(
        &self,
        records: &[Record],
        settings: &Settings,
        cutoff: NaiveDate,
    ) -> Decimal {
        amount_due_as_of(records, settings, cutoff)
    }

    fn count_records(records: &[Record]) -> LedgerStats {
        records
            .iter()
            .fold(LedgerStats::default(), |mut stats, record| {
                match record.kind {
                    RecordKind::Cook(_) => stats.total_cook_sessions += 1,
                    RecordKind::Grocery(_) => stats.total_groceries += 1,
                    RecordKind::Payment(_) => stats.total_payments += 1,
                }
                stats
            })
    }
}
