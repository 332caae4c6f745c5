use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;

use crate::catalog::PlayerProfile;
use crate::common::types::StrategyKind;
use crate::strategy::traits::ScoringStrategy;
use crate::strategy::types::Selection;

/// Weighted blend of base premium and average base
#[derive(Debug, Clone, Copy)]
pub struct HybridStrategy {
    pub value_weight: Decimal,
    pub base_weight: Decimal,
}

impl Default for HybridStrategy {
    fn default() -> Self {
        Self {
            value_weight: dec!(0.5),
            base_weight: dec!(0.5),
        }
    }
}

impl HybridStrategy {
    pub fn new(value_weight: Decimal, base_weight: Decimal) -> Self {
        Self {
            value_weight,
            base_weight,
        }
    }
}

impl ScoringStrategy for HybridStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Hybrid
    }

    fn score(&self, profile: &PlayerProfile) -> Decimal {
        self.value_weight * profile.base_premium + self.base_weight * profile.avg_base
    }

    /// Value tie-breaks, then the unweighted base score
    fn tie_break(&self, a: &Selection, b: &Selection) -> Ordering {
        b.total_base
            .cmp(&a.total_base)
            .then(a.total_price.cmp(&b.total_price))
            .then(b.total_avg_base.cmp(&a.total_avg_base))
    }
}
