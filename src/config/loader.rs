//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{AppConfig, EngineConfig};
use crate::common::errors::{Result, TradeError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP__, e.g. `APP__ENGINE__PAGE_SIZE`)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| TradeError::Configuration(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| TradeError::Configuration(e.to_string()))?;

    validate(&app_config)?;
    Ok(app_config)
}

/// Reject configurations the engine cannot run with
pub fn validate(config: &AppConfig) -> Result<()> {
    validate_engine(&config.engine)
}

/// Engine-section checks, also applied by `TradeEngine::new`
pub fn validate_engine(engine: &EngineConfig) -> Result<()> {
    if engine.lookback_rounds == 0 {
        return Err(TradeError::Configuration(
            "engine.lookback_rounds must be at least 1".into(),
        ));
    }
    if engine.price_per_point <= rust_decimal::Decimal::ZERO {
        return Err(TradeError::Configuration(
            "engine.price_per_point must be positive".into(),
        ));
    }
    if engine.page_size == 0 {
        return Err(TradeError::Configuration(
            "engine.page_size must be at least 1".into(),
        ));
    }
    for key in engine.position_thresholds.keys() {
        key.parse::<crate::common::types::Position>()
            .map_err(|_| TradeError::Configuration(format!("unknown position threshold key '{key}'")))?;
    }
    Ok(())
}
