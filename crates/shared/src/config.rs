//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Ledger presentation settings.
    pub ledger: LedgerConfig,
    /// Report generation settings.
    pub reporting: ReportingConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Display currency (ISO 4217) attached to reports.
    pub currency: String,
    /// Decimal places amounts are rounded to on presentation.
    pub amount_scale: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            amount_scale: 2,
        }
    }
}

/// Report generation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Description of the synthetic net-profit line in the equity section.
    pub net_profit_label: String,
    /// Minimum number of postable accounts before the trial balance runs in parallel.
    pub parallel_threshold: usize,
    /// Maximum number of cached reports.
    pub cache_capacity: u64,
    /// Time-to-live of a cached report in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            net_profit_label: "Net profit for the period".to_string(),
            parallel_threshold: 256,
            cache_capacity: 100,
            cache_ttl_secs: 300, // 5 minutes
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "tally=info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `TALLY__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
