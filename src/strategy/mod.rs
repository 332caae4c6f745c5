//! Scoring strategies for ranking replacement players
//!
//! A small closed set of interchangeable policies behind one trait. The
//! search routine only ever talks to [`ScoringStrategy`] and the shared
//! [`compare`] chain, so adding a strategy never touches the search.
//!
//! # Ranking chain
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  1. score (combined for pairs)              descending    │
//! │  2. ScoringStrategy::tie_break              per strategy  │
//! │  3. total price                             ascending     │
//! │  4. player names                            lexicographic │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! | Strategy | Score | Tie-break |
//! |---|---|---|
//! | [`ValueStrategy`] | base premium | total base ↓, price ↑ |
//! | [`BaseStrategy`] | average base | price ↑ |
//! | [`HybridStrategy`] | weighted premium + average base | total base ↓, price ↑, average base ↓ |

mod base;
mod hybrid;
mod traits;
mod types;
mod value;

pub use base::BaseStrategy;
pub use hybrid::HybridStrategy;
pub use traits::{BoxedScoringStrategy, ScoringStrategy};
pub use types::Selection;
pub use value::ValueStrategy;

use std::cmp::Ordering;

use crate::common::types::StrategyKind;
use crate::config::EngineConfig;

/// Build the strategy for a request
pub fn for_kind(kind: StrategyKind, config: &EngineConfig) -> BoxedScoringStrategy {
    match kind {
        StrategyKind::MaximizeValue => Box::new(ValueStrategy),
        StrategyKind::MaximizeBase => Box::new(BaseStrategy),
        StrategyKind::Hybrid => Box::new(HybridStrategy::new(
            config.value_weight,
            config.base_weight,
        )),
    }
}

/// Full ranking order between two selections, best first
pub fn compare(strategy: &dyn ScoringStrategy, a: &Selection, b: &Selection) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| strategy.tie_break(a, b))
        .then(a.total_price.cmp(&b.total_price))
        .then_with(|| a.name_key().cmp(&b.name_key()))
}
