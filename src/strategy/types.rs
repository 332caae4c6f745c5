use rust_decimal::Decimal;

use crate::catalog::PlayerProfile;

/// A scored set of one or two incoming players
///
/// Aggregates are precomputed so that ranking comparisons are cheap during
/// pair enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Incoming players in slot order
    pub players: Vec<PlayerProfile>,
    /// Strategy score (combined for pairs)
    pub score: Decimal,
    pub total_price: i64,
    pub total_base: Decimal,
    /// Sum of the players' average base
    pub total_avg_base: Decimal,
    /// Sum of the players' base premium
    pub total_bpre: Decimal,
}

impl Selection {
    pub fn single(player: PlayerProfile, score: Decimal) -> Self {
        Self {
            total_price: player.price(),
            total_base: player.total_base,
            total_avg_base: player.avg_base,
            total_bpre: player.base_premium,
            players: vec![player],
            score,
        }
    }

    pub fn pair(first: PlayerProfile, second: PlayerProfile, score: Decimal) -> Self {
        Self {
            total_price: first.price() + second.price(),
            total_base: first.total_base + second.total_base,
            total_avg_base: first.avg_base + second.avg_base,
            total_bpre: first.base_premium + second.base_premium,
            players: vec![first, second],
            score,
        }
    }

    pub fn is_pair(&self) -> bool {
        self.players.len() == 2
    }

    /// Player names sorted, the last resort of the ranking chain
    pub fn name_key(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.players.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name() == name)
    }
}
