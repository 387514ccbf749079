//! Configuration Loader
//!
//! Precedence, highest first:
//! 1. Environment variables (`STORES_` prefix, `__` separator) and `DATABASE_URL`
//! 2. Configuration file (config.toml / config.local.toml)
//! 3. Defaults

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// Load configuration from the default search path.
///
/// # Environment examples
/// - `STORES_SERVER__PORT=8080`
/// - `STORES_AUTH__JWT_SECRET=...`
/// - `DATABASE_URL=sqlite:/var/lib/stores/data.db?mode=rwc`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// Load configuration, reading `config_path` instead of the default files when given.
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.request_timeout_secs", 30)?
        .set_default("database.url", "sqlite:data.db?mode=rwc")?
        .set_default("database.max_connections", 5)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("auth.jwt_secret", "")?
        .set_default("auth.access_token_expiry_secs", 900)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("STORES")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // Plain DATABASE_URL wins over everything else
    builder = builder.set_override_option("database.url", std::env::var("DATABASE_URL").ok())?;

    let app_config: AppConfig = builder.build()?.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.database.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database URL cannot be empty".to_string(),
        ));
    }

    if config.database.max_connections == 0 {
        return Err(ConfigError::ValidationError(
            "Database max_connections cannot be 0".to_string(),
        ));
    }

    if config.auth.access_token_expiry_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Access token lifetime cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// Log the effective configuration at startup. The JWT secret is never printed.
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!("Request Timeout: {}s", config.server.request_timeout_secs);
    tracing::info!("Database: {}", config.database.url);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!(
        "JWT Secret: {}",
        if config.auth.jwt_secret.is_empty() { "<generated>" } else { "<configured>" }
    );
    tracing::info!("Access Token Lifetime: {}s", config.auth.access_token_expiry_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
