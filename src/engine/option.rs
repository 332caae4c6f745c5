use rust_decimal::Decimal;

use crate::catalog::PlayerProfile;
use crate::common::types::StrategyKind;
use crate::strategy::Selection;

/// One ranked trade recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOption {
    /// Incoming players in slot order
    pub players: Vec<PlayerProfile>,
    pub score: Decimal,
    pub total_price: i64,
    /// Budget left after the trade, never negative
    pub salary_remaining: i64,
    pub total_base: Decimal,
    /// Sum of average base, pairs only
    pub total_avg_base: Option<Decimal>,
    /// Mean base premium across the pair, pairs under value-oriented strategies only
    pub combo_avg_bpre: Option<Decimal>,
}

impl TradeOption {
    pub fn from_selection(selection: Selection, budget: i64, strategy: StrategyKind) -> Self {
        let is_pair = selection.is_pair();
        let count = Decimal::from(selection.players.len() as u64);
        Self {
            salary_remaining: budget - selection.total_price,
            total_avg_base: is_pair.then_some(selection.total_avg_base),
            combo_avg_bpre: (is_pair && strategy.is_value_oriented())
                .then(|| selection.total_bpre / count),
            score: selection.score,
            total_price: selection.total_price,
            total_base: selection.total_base,
            players: selection.players,
        }
    }

    pub fn is_pair(&self) -> bool {
        self.players.len() == 2
    }
}
