use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::catalog::PlayerProfile;
use crate::common::types::StrategyKind;
use crate::strategy::traits::ScoringStrategy;
use crate::strategy::types::Selection;

/// Maximize base: rank by average base over the scoring window
///
/// Averages keep players with fewer recorded rounds comparable. Ties prefer
/// the cheaper selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseStrategy;

impl ScoringStrategy for BaseStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MaximizeBase
    }

    fn score(&self, profile: &PlayerProfile) -> Decimal {
        profile.avg_base
    }

    fn tie_break(&self, a: &Selection, b: &Selection) -> Ordering {
        a.total_price.cmp(&b.total_price)
    }
}
