//! Response shapes for the trade calculator endpoints
//!
//! Options keep the engine's order. Decimal statistics are rounded to two
//! places and written as JSON numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{PlayerCatalog, PlayerProfile};
use crate::common::types::{Position, StrategyKind};
use crate::engine::TradeOption;

const DISPLAY_DP: u32 = 2;

fn display(value: Decimal) -> Decimal {
    value.round_dp(DISPLAY_DP)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerView {
    pub name: String,
    pub position: Position,
    pub price: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_base: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_premium: Decimal,
    pub consecutive_good_weeks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_level: Option<u8>,
}

impl PlayerView {
    fn new(profile: &PlayerProfile, strategy: StrategyKind) -> Self {
        Self {
            name: profile.name().to_string(),
            position: profile.position(),
            price: profile.price(),
            total_base: display(profile.total_base),
            avg_base: display(profile.avg_base),
            base_premium: display(profile.base_premium),
            consecutive_good_weeks: profile.consecutive_good_weeks,
            priority_level: strategy
                .is_value_oriented()
                .then_some(profile.priority_level),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OptionView {
    pub players: Vec<PlayerView>,
    pub total_price: i64,
    pub salary_remaining: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_base: Decimal,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_avg_base: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub combo_avg_bpre: Option<Decimal>,
}

/// Map ranked options to their response form
pub fn assemble(options: &[TradeOption], strategy: StrategyKind) -> Vec<OptionView> {
    options
        .iter()
        .map(|option| OptionView {
            players: option
                .players
                .iter()
                .map(|p| PlayerView::new(p, strategy))
                .collect(),
            total_price: option.total_price,
            salary_remaining: option.salary_remaining,
            total_base: display(option.total_base),
            total_avg_base: option.total_avg_base.map(display),
            combo_avg_bpre: option.combo_avg_bpre.map(display),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LockoutView {
    pub is_locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub status: &'static str,
    pub players: usize,
    pub latest_round: Option<u32>,
    pub loaded_at: DateTime<Utc>,
}

impl CatalogStatus {
    pub fn new(status: &'static str, catalog: &PlayerCatalog) -> Self {
        Self {
            status,
            players: catalog.len(),
            latest_round: catalog.latest_round(),
            loaded_at: catalog.loaded_at(),
        }
    }
}
