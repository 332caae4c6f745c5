//! NRL Trade Calculator Library
//!
//! Recommends fantasy NRL trades: given one or two outgoing players it ranks
//! replacement players (or pairs) that fit the freed salary, honour position
//! rules and lockout times, and score best under a chosen strategy.

pub mod api;
pub mod catalog;
pub mod common;
pub mod config;
pub mod engine;
pub mod strategy;

// Re-export commonly used types
pub use api::ApiServer;
pub use catalog::{CatalogStore, Player, PlayerCatalog, PlayerProfile, StatsModel, TeamList, WeeklyScore};
pub use common::errors::{Result, TradeError};
pub use common::types::{Position, StrategyKind, TradeType};
pub use config::types::AppConfig;
pub use engine::{SearchDeadline, TradeEngine, TradeOption, TradeRequest};

// Strategy types
pub use strategy::{BoxedScoringStrategy, ScoringStrategy, Selection};
