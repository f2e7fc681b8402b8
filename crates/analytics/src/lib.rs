//! # Food Spend Analytics Engine
//!
//! This crate turns the household food ledger into the numbers the dashboard
//! shows: what is owed to the cook, what food costs per day, and how that
//! compares to eating out at the baseline rate.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the
//!   store or the web layer. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` takes a snapshot of records
//!   and a settings value and returns `DashboardMetrics`. It never fails and
//!   never mutates its inputs.
//!
//! ## Public API
//!
//! - `MetricsEngine`: the aggregator over all derivations.
//! - `DashboardMetrics`: the output structure.
//! - The individual derivations (`amount_due`, `tracking_window`,
//!   `avg_cook_cost_per_day`, ...) for callers that need one number.
//! - `derive`: helpers the write path uses for stored derived fields.

// Declare the modules that constitute this crate.
pub mod breakdown;
pub mod daily_cost;
pub mod derive;
pub mod engine;
pub mod report;
pub mod savings;
pub mod spend;
pub mod window;

#[cfg(test)]
mod test_support;

// Re-export the key components to create a clean, public-facing API.
pub use breakdown::monthly_breakdown;
pub use daily_cost::{avg_cook_cost_per_day, avg_groceries_cost_per_day, effective_daily_cost};
pub use engine::MetricsEngine;
pub use report::{
    BaselineCost, DashboardMetrics, LedgerStats, MonthlySpend, Savings, TotalFoodSpend,
    TrackingWindow,
};
pub use savings::calculate_savings;
pub use spend::{amount_due, amount_due_as_of, cook_fee, is_tip, total_food_spend};
pub use window::tracking_window;
