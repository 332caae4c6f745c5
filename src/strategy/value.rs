use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::catalog::PlayerProfile;
use crate::common::types::StrategyKind;
use crate::strategy::traits::ScoringStrategy;
use crate::strategy::types::Selection;

/// Maximize value: rank by base premium (BPRE)
///
/// Ties prefer more total base, then the cheaper selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueStrategy;

impl ScoringStrategy for ValueStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::MaximizeValue
    }

    fn score(&self, profile: &PlayerProfile) -> Decimal {
        profile.base_premium
    }

    fn tie_break(&self, a: &Selection, b: &Selection) -> Ordering {
        b.total_base
            .cmp(&a.total_base)
            .then(a.total_price.cmp(&b.total_price))
    }
}
