use chrono::NaiveDate;
use core_types::Settings;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the application process.
///
/// This is deployment configuration (where to listen, which database, how to
/// log). The household settings document lives in the store, see
/// [`crate::resolve_settings`].
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Parameters for the HTTP API.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Parameters for the PostgreSQL ledger store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Falls back to the `DATABASE_URL` environment variable when unset.
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, used when `RUST_LOG` is not set.
    pub filter: String,
    /// When set, logs go to a daily-rolling file in this directory instead of stderr.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

/// Per-field settings overrides read from the environment.
///
/// Each present field replaces the hardcoded default; absent fields keep it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsOverrides {
    pub base_fee: Option<Decimal>,
    pub baseline_daily_low: Option<Decimal>,
    pub baseline_daily_high: Option<Decimal>,
    pub baseline_daily_avg: Option<Decimal>,
    pub tracking_start_date: Option<NaiveDate>,
}

impl SettingsOverrides {
    pub fn apply_to(self, defaults: Settings) -> Settings {
        Settings {
            base_fee: self.base_fee.unwrap_or(defaults.base_fee),
            baseline_daily_low: self.baseline_daily_low.unwrap_or(defaults.baseline_daily_low),
            baseline_daily_high: self.baseline_daily_high.unwrap_or(defaults.baseline_daily_high),
            baseline_daily_avg: self.baseline_daily_avg.unwrap_or(defaults.baseline_daily_avg),
            tracking_start_date: self.tracking_start_date.or(defaults.tracking_start_date),
        }
    }
}
