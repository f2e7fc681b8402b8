use crate::error::CoreError;
use crate::structs::MAX_AMOUNT;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The single settings document the metrics are computed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Fee applied to cook sessions that carry no fee of their own.
    pub base_fee: Decimal,
    pub baseline_daily_low: Decimal,
    pub baseline_daily_high: Decimal,
    pub baseline_daily_avg: Decimal,
    /// Overrides the start of the tracking window when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_start_date: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_fee: Decimal::ZERO,
            baseline_daily_low: dec!(360),
            baseline_daily_high: dec!(400),
            baseline_daily_avg: dec!(380),
            tracking_start_date: None,
        }
    }
}

impl Settings {
    /// Checks the constraints enforced when the document is written.
    ///
    /// The average baseline is only required to be non-negative; it is not
    /// checked against the low/high pair.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.base_fee < Decimal::ZERO {
            return Err(CoreError::invalid("baseFee", "Base fee must be non-negative"));
        }
        if self.base_fee > MAX_AMOUNT {
            return Err(CoreError::invalid("baseFee", "Base fee is too large"));
        }
        if self.baseline_daily_low < Decimal::ZERO
            || self.baseline_daily_high < Decimal::ZERO
            || self.baseline_daily_avg < Decimal::ZERO
        {
            return Err(CoreError::invalid(
                "baseline",
                "Baseline values must be non-negative",
            ));
        }
        if self.baseline_daily_low > MAX_AMOUNT
            || self.baseline_daily_high > MAX_AMOUNT
            || self.baseline_daily_avg > MAX_AMOUNT
        {
            return Err(CoreError::invalid("baseline", "Baseline values are too large"));
        }
        if self.baseline_daily_low > self.baseline_daily_high {
            return Err(CoreError::invalid(
                "baseline",
                "Baseline low must be less than or equal to baseline high",
            ));
        }
        Ok(())
    }
}
