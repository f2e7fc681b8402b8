use crate::report::{BaselineCost, Savings};
use core_types::Settings;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Days in the nominal month used to project daily savings.
pub const DAYS_PER_MONTH: Decimal = dec!(30);

/// Compares the effective daily cost against the configured baselines.
pub fn calculate_savings(effective_daily_cost: Decimal, settings: &Settings) -> Savings {
    let daily = settings.baseline_daily_avg.saturating_sub(effective_daily_cost);
    Savings {
        daily,
        monthly: daily.saturating_mul(DAYS_PER_MONTH),
        vs_low: settings.baseline_daily_low.saturating_sub(effective_daily_cost),
        vs_high: settings.baseline_daily_high.saturating_sub(effective_daily_cost),
    }
}

pub fn baseline_cost(settings: &Settings) -> BaselineCost {
    BaselineCost {
        low: settings.baseline_daily_low,
        high: settings.baseline_daily_high,
        avg: settings.baseline_daily_avg,
    }
}
