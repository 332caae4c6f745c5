//! Budget-bounded search over single players and pairs
//!
//! Singles are a linear scan. Pairs are enumerated over the pool sorted by
//! price, so the inner loop stops as soon as a partner would break the
//! budget. Only the best `page_size` selections are kept while enumerating;
//! a full ranking of every feasible pair is never materialised.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::catalog::PlayerProfile;
use crate::common::errors::{Result, TradeError};
use crate::common::types::Position;
use crate::strategy::{compare, ScoringStrategy, Selection};

/// Pairs evaluated between deadline checks
const DEADLINE_POLL_INTERVAL: u64 = 1024;

/// Time limit and cancellation for one search
#[derive(Debug, Clone, Default)]
pub struct SearchDeadline {
    at: Option<Instant>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl SearchDeadline {
    /// A deadline that never expires
    pub fn none() -> Self {
        Self::default()
    }

    pub fn after(timeout: Duration) -> Self {
        Self {
            at: Instant::now().checked_add(timeout),
            cancelled: None,
        }
    }

    /// Also expire once `flag` is set
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    pub fn is_expired(&self) -> bool {
        if let Some(flag) = &self.cancelled {
            if flag.load(AtomicOrdering::Relaxed) {
                return true;
            }
        }
        self.at.map_or(false, |at| Instant::now() >= at)
    }
}

/// Search bounds taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Number of options returned
    pub page_size: usize,
    /// Largest pool accepted for pair search
    pub max_pair_pool: usize,
    /// Never repeat an incoming player across returned options
    pub exclusive_options: bool,
}

/// What the search is replacing
#[derive(Debug, Clone)]
pub enum SearchShape {
    /// One outgoing player
    Single,
    /// Two outgoing players, any positions
    Pair,
    /// Two outgoing players, incoming positions must match these slots
    PairMatching([Position; 2]),
}

/// Rank the best selections that fit in `budget`, best first
pub fn rank(
    pool: &[PlayerProfile],
    shape: &SearchShape,
    budget: i64,
    strategy: &dyn ScoringStrategy,
    limits: SearchLimits,
    deadline: &SearchDeadline,
) -> Result<Vec<Selection>> {
    if limits.page_size == 0 {
        return Ok(Vec::new());
    }
    if deadline.is_expired() {
        return Err(TradeError::SearchTimedOut { evaluated: 0 });
    }

    match shape {
        SearchShape::Single => Ok(rank_singles(pool, budget, strategy, limits.page_size)),
        SearchShape::Pair | SearchShape::PairMatching(_) => {
            if pool.len() > limits.max_pair_pool {
                return Err(TradeError::CandidatePoolTooLarge {
                    size: pool.len(),
                    limit: limits.max_pair_pool,
                });
            }
            let slots = match shape {
                SearchShape::PairMatching(slots) => Some(*slots),
                _ => None,
            };
            let search = PairSearch::new(pool, slots, budget, strategy, deadline);
            if limits.exclusive_options {
                search.rank_exclusive(limits.page_size)
            } else {
                search.top(limits.page_size, &HashSet::new())
            }
        }
    }
}

fn rank_singles(
    pool: &[PlayerProfile],
    budget: i64,
    strategy: &dyn ScoringStrategy,
    page_size: usize,
) -> Vec<Selection> {
    let mut selections: Vec<Selection> = pool
        .iter()
        .filter(|p| p.price() <= budget)
        .map(|p| Selection::single(p.clone(), strategy.score(p)))
        .collect();
    selections.sort_by(|a, b| compare(strategy, a, b));
    selections.truncate(page_size);
    selections
}

struct Scored<'a> {
    profile: &'a PlayerProfile,
    score: Decimal,
}

struct PairSearch<'a> {
    /// Pool sorted by price ascending
    scored: Vec<Scored<'a>>,
    slots: Option<[Position; 2]>,
    budget: i64,
    strategy: &'a dyn ScoringStrategy,
    deadline: &'a SearchDeadline,
}

impl<'a> PairSearch<'a> {
    fn new(
        pool: &'a [PlayerProfile],
        slots: Option<[Position; 2]>,
        budget: i64,
        strategy: &'a dyn ScoringStrategy,
        deadline: &'a SearchDeadline,
    ) -> Self {
        let mut scored: Vec<Scored<'a>> = pool
            .iter()
            .map(|profile| Scored {
                profile,
                score: strategy.score(profile),
            })
            .collect();
        scored.sort_by(|a, b| {
            a.profile
                .price()
                .cmp(&b.profile.price())
                .then_with(|| a.profile.name().cmp(b.profile.name()))
        });
        Self {
            scored,
            slots,
            budget,
            strategy,
            deadline,
        }
    }

    fn fits_slots(&self, a: Position, b: Position) -> bool {
        match self.slots {
            Some([first, second]) => (a == first && b == second) || (a == second && b == first),
            None => true,
        }
    }

    /// Order a pair: matching slot positions first, otherwise the stronger
    /// individual first
    fn slot_order<'s>(&self, a: &'s Scored<'a>, b: &'s Scored<'a>) -> (&'s Scored<'a>, &'s Scored<'a>) {
        if let Some([first, second]) = self.slots {
            if first != second {
                return if a.profile.position() == first { (a, b) } else { (b, a) };
            }
        }
        let a_first = b
            .score
            .cmp(&a.score)
            .then_with(|| a.profile.name().cmp(b.profile.name()))
            != Ordering::Greater;
        if a_first {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Best `k` pairs avoiding `excluded` players
    fn top(&self, k: usize, excluded: &HashSet<&str>) -> Result<Vec<Selection>> {
        let mut kept: Vec<Selection> = Vec::with_capacity(k + 1);
        let mut evaluated: u64 = 0;
        let n = self.scored.len();

        for i in 0..n {
            let a = &self.scored[i];
            if excluded.contains(a.profile.name()) {
                continue;
            }
            for j in (i + 1)..n {
                let b = &self.scored[j];
                if a.profile.price() + b.profile.price() > self.budget {
                    break;
                }
                evaluated += 1;
                if evaluated % DEADLINE_POLL_INTERVAL == 0 && self.deadline.is_expired() {
                    return Err(TradeError::SearchTimedOut { evaluated });
                }
                if excluded.contains(b.profile.name())
                    || !self.fits_slots(a.profile.position(), b.profile.position())
                {
                    continue;
                }

                let score = self.strategy.combine(a.score, b.score);
                if kept.len() == k && kept.last().map_or(false, |worst| score < worst.score) {
                    continue;
                }
                let (first, second) = self.slot_order(a, b);
                let candidate = Selection::pair(first.profile.clone(), second.profile.clone(), score);
                let at = kept
                    .partition_point(|s| compare(self.strategy, s, &candidate) == Ordering::Less);
                if at < k {
                    kept.insert(at, candidate);
                    kept.truncate(k);
                }
            }
            // Cheapest remaining partner already breaks the budget
            if i + 1 < n && a.profile.price() + self.scored[i + 1].profile.price() > self.budget {
                break;
            }
        }

        debug!(evaluated, kept = kept.len(), "pair search pass complete");
        Ok(kept)
    }

    /// Greedy best-first selection where no player appears twice
    fn rank_exclusive(&self, page_size: usize) -> Result<Vec<Selection>> {
        let mut used: HashSet<&'a str> = HashSet::new();
        let mut ranked = Vec::with_capacity(page_size);
        while ranked.len() < page_size {
            let Some(best) = self.top(1, &used)?.into_iter().next() else {
                break;
            };
            for player in &self.scored {
                if best.contains(player.profile.name()) {
                    used.insert(player.profile.name());
                }
            }
            ranked.push(best);
        }
        Ok(ranked)
    }
}
