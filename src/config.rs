//! Configuration module
//!
//! `AppConfig` is read from a TOML file. Every section and field has a
//! default, so an empty file (or no file at all) yields a runnable service.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pricing]
//! currency = "USD"
//! support_add_on_monthly = 49
//! support_add_on_yearly = 490
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::PricingService;
use crate::domain::pricing::{RateTable, TierCatalog, TierConfig};
use crate::shared::errors::ConfigError;

/// Default location: `~/.config/bookshelf/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bookshelf")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub books: BooksConfig,
}

impl AppConfig {
    /// Read and parse the config file, then validate the pricing section.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        config.pricing.validate()?;
        Ok(config)
    }

    /// Build the pricing service described by the `[pricing]` section.
    pub fn pricing_service(&self) -> Result<PricingService, ConfigError> {
        let catalog = self.pricing.catalog()?;
        let support = self.pricing.support_add_on()?;
        Ok(PricingService::new(catalog, support, self.pricing.currency.clone()))
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_shutdown_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `bookshelf=debug,tower_http=info`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_support_monthly")]
    pub support_add_on_monthly: Decimal,
    #[serde(default = "default_support_yearly")]
    pub support_add_on_yearly: Decimal,
    /// Replaces the built-in catalog when non-empty.
    #[serde(default)]
    pub tiers: Vec<TierConfig>,
}

impl PricingConfig {
    pub fn catalog(&self) -> Result<TierCatalog, ConfigError> {
        if self.tiers.is_empty() {
            return Ok(TierCatalog::builtin());
        }
        Ok(TierCatalog::from_config(&self.tiers)?)
    }

    pub fn support_add_on(&self) -> Result<RateTable, ConfigError> {
        Ok(RateTable::new(
            "support_add_on",
            self.support_add_on_monthly,
            self.support_add_on_yearly,
        )?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.catalog()?;
        self.support_add_on()?;
        Ok(())
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            support_add_on_monthly: default_support_monthly(),
            support_add_on_yearly: default_support_yearly(),
            tiers: Vec::new(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_support_monthly() -> Decimal {
    Decimal::from(49)
}

fn default_support_yearly() -> Decimal {
    Decimal::from(490)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksConfig {
    /// Start with a few example books in the store
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for BooksConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
