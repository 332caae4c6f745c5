use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::catalog::PlayerProfile;
use crate::common::types::StrategyKind;
use crate::strategy::types::Selection;

/// Core scoring strategy trait
///
/// Strategies score individual players and break ties between selections
/// with equal scores. They never see the budget or the candidate pool, which
/// keeps the search routine strategy-agnostic.
///
/// # Implementation Notes
///
/// - `score` must be a pure function of the profile
/// - `tie_break` only orders strategy-specific criteria; the search appends
///   total price and player names so ordering is always total
///
/// # Example
///
/// ```ignore
/// struct YoungestFirst;
///
/// impl ScoringStrategy for YoungestFirst {
///     fn kind(&self) -> StrategyKind { StrategyKind::MaximizeBase }
///
///     fn score(&self, profile: &PlayerProfile) -> Decimal {
///         Decimal::from(100 - profile.player.age.unwrap_or(100))
///     }
///
///     fn tie_break(&self, a: &Selection, b: &Selection) -> Ordering {
///         a.total_price.cmp(&b.total_price)
///     }
/// }
/// ```
pub trait ScoringStrategy: Send + Sync {
    /// Which request strategy this implements
    fn kind(&self) -> StrategyKind;

    /// Score a single player, higher is better
    fn score(&self, profile: &PlayerProfile) -> Decimal;

    /// Combine two individual scores into a pair score
    ///
    /// Default is a plain sum: no pairwise synergy term.
    fn combine(&self, a: Decimal, b: Decimal) -> Decimal {
        a + b
    }

    /// Order two selections whose scores are equal
    ///
    /// Return `Less` when `a` should rank before `b`.
    fn tie_break(&self, a: &Selection, b: &Selection) -> Ordering;
}

/// Boxed strategy for dynamic dispatch
pub type BoxedScoringStrategy = Box<dyn ScoringStrategy>;
