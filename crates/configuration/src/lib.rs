use crate::error::ConfigError;
use crate::settings::{AppConfig, SettingsOverrides};
use core_types::Settings;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseConfig, LoggingConfig, ServerConfig};
pub use telemetry::init_tracing;

/// Prefix for environment variables overriding `AppConfig`, e.g.
/// `FOODSPEND_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "FOODSPEND";

/// Loads the application configuration.
///
/// Sources, lowest priority first: built-in defaults, the TOML file (an
/// explicit `path` must exist; otherwise an optional `foodspend.toml` in the
/// working directory), then `FOODSPEND_*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("foodspend").required(false),
    };

    let builder = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.filter", "info")?
        .set_default("logging.file_prefix", "foodspend.log")?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<AppConfig>()?;

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "database.max_connections must be at least 1".to_string(),
        ));
    }

    Ok(config)
}

/// Resolves the settings document used for a calculation.
///
/// The stored document wins outright. Without one, `BASE_FEE`,
/// `BASELINE_DAILY_LOW`, `BASELINE_DAILY_HIGH`, `BASELINE_DAILY_AVG` and
/// `TRACKING_START_DATE` override the hardcoded defaults one field at a time.
pub fn resolve_settings(stored: Option<Settings>) -> Result<Settings, ConfigError> {
    resolve_settings_from(stored, config::Environment::default())
}

/// [`resolve_settings`] with an explicit environment source.
pub fn resolve_settings_from(
    stored: Option<Settings>,
    environment: config::Environment,
) -> Result<Settings, ConfigError> {
    if let Some(settings) = stored {
        return Ok(settings);
    }

    let overrides = config::Config::builder()
        .add_source(environment.ignore_empty(true))
        .build()?
        .try_deserialize::<SettingsOverrides>()?;

    let settings = overrides.apply_to(Settings::default());
    settings
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    tracing::debug!(?settings, "Resolved settings from environment and defaults.");
    Ok(settings)
}
