//! Application configuration

pub mod loader;
pub mod types;

pub use loader::{load_config, validate_engine};
pub use types::{AppConfig, AppSettings, CatalogConfig, DatabaseConfig, EngineConfig, ServerConfig};
