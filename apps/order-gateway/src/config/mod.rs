//! Configuration module for the order gateway.
//!
//! Loads YAML configuration with environment variable interpolation and
//! validates it before anything is wired.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_gateway::config::load_config;
//!
//! // Path from ORDER_GATEWAY_CONFIG, else config.yaml, else built-in defaults
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/config.yaml"))?;
//!
//! println!("routing timeout: {}ms", config.gateway.routing_timeout_ms);
//! ```

mod gateway;
mod observability;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gateway::{GatewayConfig, MarketConfig, ReservesConfig};
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ORDER_GATEWAY_CONFIG";

/// Config file used when `ORDER_GATEWAY_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Routing timeout and reference prices.
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Defaults for newly opened reserves.
    #[serde(default)]
    pub reserves: ReservesConfig,
    /// Paper market behaviour.
    #[serde(default)]
    pub market: MarketConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// An explicit `path` must exist. Without one, the path comes from
/// `ORDER_GATEWAY_CONFIG` or falls back to `config.yaml`, and a missing file
/// yields the built-in defaults.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_string(), true),
        None => (
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
            false,
        ),
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
            let config = Config::default();
            validate_config(&config)?;
            return Ok(config);
        }
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let invalid = |message: &str| Err(ConfigError::ValidationError(message.to_string()));

    if config.gateway.routing_timeout_ms == 0 {
        return invalid("gateway.routing_timeout_ms must be positive");
    }

    if config.gateway.default_price <= rust_decimal::Decimal::ZERO {
        return invalid("gateway.default_price must be positive");
    }

    if let Some((symbol, _)) = config
        .gateway
        .prices
        .iter()
        .find(|(_, price)| **price <= rust_decimal::Decimal::ZERO)
    {
        return Err(ConfigError::ValidationError(format!(
            "gateway.prices.{symbol} must be positive"
        )));
    }

    let reserves = &config.reserves;
    if reserves.initial_balance.is_sign_negative()
        || reserves.low_balance_threshold.is_sign_negative()
        || reserves.max_per_order.is_sign_negative()
    {
        return invalid("reserves values must not be negative");
    }

    if config.observability.logging.level.trim().is_empty() {
        return invalid("observability.logging.level must not be empty");
    }

    Ok(())
}
