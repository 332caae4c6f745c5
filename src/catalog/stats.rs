//! Derived player statistics
//!
//! Nothing here is stored in the catalog: profiles are computed from the
//! weekly scores on demand so that the scoring window and BPRE baseline can be
//! tuned through configuration without reloading data.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

use super::{Player, WeeklyScore};
use crate::common::types::Position;
use crate::config::EngineConfig;

/// Parameters for deriving player statistics
#[derive(Debug, Clone)]
pub struct StatsModel {
    /// Number of most recent weeks in the scoring window
    pub lookback_rounds: usize,
    /// Price that buys one expected base point
    pub price_per_point: Decimal,
    /// Premium at or above which a week counts as good
    pub good_week_threshold: Decimal,
    /// Per-position overrides of `good_week_threshold`
    pub position_thresholds: HashMap<Position, Decimal>,
}

impl Default for StatsModel {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl StatsModel {
    pub fn from_config(config: &EngineConfig) -> Self {
        let position_thresholds = config
            .position_thresholds
            .iter()
            .filter_map(|(key, value)| key.parse::<Position>().ok().map(|pos| (pos, *value)))
            .collect();

        Self {
            lookback_rounds: config.lookback_rounds.max(1),
            price_per_point: config.price_per_point,
            good_week_threshold: config.good_week_threshold,
            position_thresholds,
        }
    }

    /// Good-week threshold for a position
    pub fn threshold_for(&self, position: Position) -> Decimal {
        self.position_thresholds
            .get(&position)
            .copied()
            .unwrap_or(self.good_week_threshold)
    }

    /// Premium of a single week: the recorded value, else base minus the
    /// price-implied expectation
    pub fn weekly_premium(&self, week: &WeeklyScore, price: i64) -> Decimal {
        week.premium
            .unwrap_or_else(|| week.base - Decimal::from(price) / self.price_per_point)
    }

    /// Compute the derived statistics for a player
    pub fn profile(&self, player: &Arc<Player>) -> PlayerProfile {
        let weeks = &player.weekly;
        let window = &weeks[weeks.len().saturating_sub(self.lookback_rounds)..];

        let total_base: Decimal = window.iter().map(|w| w.base).sum();
        let base_premium = mean(window.iter().map(|w| self.weekly_premium(w, player.price)));
        let avg_base = mean(window.iter().map(|w| w.base));
        let current_premium = weeks
            .last()
            .map(|w| self.weekly_premium(w, player.price))
            .unwrap_or_default();

        let threshold = self.threshold_for(player.position);
        let consecutive_good_weeks = weeks
            .iter()
            .rev()
            .take_while(|w| self.weekly_premium(w, player.price) >= threshold)
            .count() as u32;

        let priority_level = priority_level(
            player.position,
            player.age,
            current_premium,
            consecutive_good_weeks,
        );

        PlayerProfile {
            player: Arc::clone(player),
            total_base,
            avg_base,
            base_premium,
            current_premium,
            consecutive_good_weeks,
            priority_level,
        }
    }
}

fn mean(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values.fold((Decimal::ZERO, 0u32), |(sum, n), v| (sum + v, n + 1));
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

/// A player together with the statistics the strategies score on
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub player: Arc<Player>,
    /// Sum of base scores in the scoring window
    pub total_base: Decimal,
    /// Mean base score in the scoring window
    pub avg_base: Decimal,
    /// Mean weekly premium in the scoring window (BPRE)
    pub base_premium: Decimal,
    /// Premium of the most recent week
    pub current_premium: Decimal,
    /// Trailing weeks at or above the good-week threshold
    pub consecutive_good_weeks: u32,
    /// Rule ladder level, 1 (best) to 15
    pub priority_level: u8,
}

impl PlayerProfile {
    pub fn name(&self) -> &str {
        &self.player.name
    }

    pub fn price(&self) -> i64 {
        self.player.price
    }

    pub fn position(&self) -> Position {
        self.player.position
    }
}

struct PriorityRule {
    level: u8,
    min_premium: Decimal,
    weeks: u32,
    /// Empty means any position
    positions: &'static [Position],
    max_age: Option<u32>,
}

const MAX_AGE: Option<u32> = Some(29);
const LOWEST_PRIORITY: u8 = 15;

const fn rule(
    level: u8,
    min_premium: i64,
    weeks: u32,
    positions: &'static [Position],
    max_age: Option<u32>,
) -> PriorityRule {
    PriorityRule {
        level,
        min_premium: Decimal::from_parts(min_premium as u32, 0, 0, false, 0),
        weeks,
        positions,
        max_age,
    }
}

const HLF_CTR_WFB: &[Position] = &[Position::Hlf, Position::Ctr, Position::Wfb];
const CTR_WFB: &[Position] = &[Position::Ctr, Position::Wfb];

const PRIORITY_RULES: [PriorityRule; 14] = [
    rule(1, 8, 3, &[], None),
    rule(2, 13, 2, &[], None),
    rule(3, 6, 3, &[], MAX_AGE),
    rule(4, 5, 3, HLF_CTR_WFB, None),
    rule(5, 7, 3, &[Position::Mid], MAX_AGE),
    rule(6, 10, 2, &[Position::Hlf], None),
    rule(7, 8, 2, CTR_WFB, None),
    rule(8, 10, 2, &[Position::Mid], MAX_AGE),
    rule(9, 7, 2, &[Position::Hlf], None),
    rule(10, 10, 2, &[Position::Hok], None),
    rule(11, 5, 2, CTR_WFB, None),
    rule(12, 5, 2, &[Position::Hlf], None),
    rule(13, 7, 2, &[Position::Mid], None),
    rule(14, 5, 2, &[], None),
];

/// Assign the buy-priority level of a player, first matching rule wins
pub fn priority_level(
    position: Position,
    age: Option<u32>,
    current_premium: Decimal,
    consecutive_good_weeks: u32,
) -> u8 {
    PRIORITY_RULES
        .iter()
        .find(|r| {
            current_premium >= r.min_premium
                && (r.weeks <= 1 || consecutive_good_weeks >= r.weeks)
                && (r.positions.is_empty() || r.positions.contains(&position))
                && !matches!((r.max_age, age), (Some(max), Some(a)) if a > max)
        })
        .map(|r| r.level)
        .unwrap_or(LOWEST_PRIORITY)
}
