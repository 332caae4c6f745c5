//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the player catalog comes from
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Trade engine tuning
    #[serde(default)]
    pub engine: EngineConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Player catalog source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the per-round CSV export
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
    /// Optional team list file (one player name per line)
    #[serde(default)]
    pub team_list_path: Option<String>,
    /// Load from PostgreSQL instead of CSV when present
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Periodic reload interval in seconds (0 = never)
    #[serde(default)]
    pub reload_interval_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            team_list_path: None,
            database: None,
            reload_interval_seconds: 0,
        }
    }
}

fn default_csv_path() -> String {
    "NRL_stats.csv".to_string()
}

/// Database configuration for the catalog loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,
    /// Table holding one row per player per round
    #[serde(default = "default_table")]
    pub table: String,
    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_seconds: u64,
}

fn default_table() -> String {
    "player_stats".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_connection_timeout() -> u64 {
    30
}

/// Trade engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of most recent weekly scores in the scoring window
    #[serde(default = "default_lookback_rounds")]
    pub lookback_rounds: usize,
    /// Price that buys one expected base point (BPRE baseline)
    #[serde(default = "default_price_per_point")]
    pub price_per_point: Decimal,
    /// Weekly premium at or above which a week counts as good
    #[serde(default = "default_good_week_threshold")]
    pub good_week_threshold: Decimal,
    /// Per-position overrides of `good_week_threshold`, keyed by position code
    #[serde(default)]
    pub position_thresholds: HashMap<String, Decimal>,
    /// Hybrid strategy weight on base premium
    #[serde(default = "default_half")]
    pub value_weight: Decimal,
    /// Hybrid strategy weight on average base
    #[serde(default = "default_half")]
    pub base_weight: Decimal,
    /// Maximum number of options returned
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Largest candidate pool allowed for two-player enumeration
    #[serde(default = "default_max_pair_pool")]
    pub max_pair_pool: usize,
    /// Salary added to the freed budget when the request gives none
    #[serde(default)]
    pub salary_slack: i64,
    /// Show each incoming player in at most one option
    #[serde(default)]
    pub exclusive_options: bool,
    /// Deadline for a single search in milliseconds
    #[serde(default = "default_search_timeout")]
    pub search_timeout_ms: u64,
    /// Offset applied to timestamps without a timezone, in minutes east of UTC
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_rounds: default_lookback_rounds(),
            price_per_point: default_price_per_point(),
            good_week_threshold: default_good_week_threshold(),
            position_thresholds: HashMap::new(),
            value_weight: default_half(),
            base_weight: default_half(),
            page_size: default_page_size(),
            max_pair_pool: default_max_pair_pool(),
            salary_slack: 0,
            exclusive_options: false,
            search_timeout_ms: default_search_timeout(),
            utc_offset_minutes: 0,
        }
    }
}

fn default_lookback_rounds() -> usize {
    3
}

fn default_price_per_point() -> Decimal {
    dec!(12500)
}

fn default_good_week_threshold() -> Decimal {
    dec!(5)
}

fn default_half() -> Decimal {
    dec!(0.5)
}

fn default_page_size() -> usize {
    10
}

fn default_max_pair_pool() -> usize {
    1500
}

fn default_search_timeout() -> u64 {
    2000
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the API binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
