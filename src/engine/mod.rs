//! Trade recommendation engine
//!
//! Ties the pieces together for one request:
//!
//! 1. resolve the outgoing players and check their lockout
//! 2. build the candidate pool ([`eligibility`])
//! 3. rank singles or pairs within the freed budget ([`search`])
//! 4. attach derived totals ([`option`])
//!
//! The engine is synchronous and CPU bound; callers on an async runtime
//! should run it on a blocking thread with a [`SearchDeadline`].

pub mod eligibility;
pub mod lockout;
pub mod option;
pub mod request;
pub mod search;

pub use lockout::{is_locked, parse_timestamp, LockoutEvaluator};
pub use option::TradeOption;
pub use request::{CalculateParams, TradeRequest};
pub use search::{SearchDeadline, SearchLimits, SearchShape};

use chrono::{DateTime, FixedOffset, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::catalog::{PlayerCatalog, StatsModel};
use crate::common::errors::{Result, TradeError};
use crate::common::traits::Clock;
use crate::common::types::TradeType;
use crate::config::{validate_engine, EngineConfig};
use crate::strategy;

/// Stateless trade calculator over catalog snapshots
#[derive(Clone)]
pub struct TradeEngine {
    config: EngineConfig,
    stats: StatsModel,
    lockout: LockoutEvaluator,
    offset: FixedOffset,
}

impl TradeEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        validate_engine(&config)?;
        let offset = FixedOffset::east_opt(config.utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            TradeError::Configuration(format!(
                "utc_offset_minutes {} is out of range",
                config.utc_offset_minutes
            ))
        })?;
        Ok(Self {
            stats: StatsModel::from_config(&config),
            lockout: LockoutEvaluator::default(),
            offset,
            config,
        })
    }

    /// Replace the wall clock used when no simulated time is given
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.lockout = LockoutEvaluator::new(clock);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> &StatsModel {
        &self.stats
    }

    /// Offset applied to simulated times given without a zone
    pub fn utc_offset(&self) -> FixedOffset {
        self.offset
    }

    /// A fresh deadline from the configured search timeout
    pub fn deadline(&self) -> SearchDeadline {
        match self.config.search_timeout_ms {
            0 => SearchDeadline::none(),
            ms => SearchDeadline::after(Duration::from_millis(ms)),
        }
    }

    fn limits(&self) -> SearchLimits {
        SearchLimits {
            page_size: self.config.page_size,
            max_pair_pool: self.config.max_pair_pool,
            exclusive_options: self.config.exclusive_options,
        }
    }

    /// Rank replacement options for a request, best first
    pub fn search(
        &self,
        catalog: &PlayerCatalog,
        request: &TradeRequest,
        deadline: &SearchDeadline,
    ) -> Result<Vec<TradeOption>> {
        let started = Instant::now();
        eligibility::validate_positions(request)?;

        let outgoing = request
            .outgoing_names()
            .into_iter()
            .map(|name| catalog.require(name).cloned())
            .collect::<Result<Vec<_>>>()?;

        let reference_time = request
            .apply_lockout
            .then(|| self.lockout.reference_time(request.simulate_date_time));
        if let Some(at) = reference_time {
            if let Some(locked) = outgoing.iter().find(|p| is_locked(p, at)) {
                return Err(TradeError::OutgoingPlayerLocked(locked.name.clone()));
            }
        }

        let slack = request.salary_slack.unwrap_or(self.config.salary_slack);
        let budget = outgoing
            .iter()
            .try_fold(slack, |total, p| total.checked_add(p.price))
            .ok_or_else(|| TradeError::InvalidRequest("salarySlack out of range".into()))?;

        let pool = eligibility::candidates(catalog, &outgoing, request, &self.stats, reference_time)?;
        let shape = match (outgoing.as_slice(), request.trade_type) {
            ([_], _) => SearchShape::Single,
            ([first, second], TradeType::LikeForLike) => {
                SearchShape::PairMatching([first.position, second.position])
            }
            _ => SearchShape::Pair,
        };

        let scorer = strategy::for_kind(request.strategy, &self.config);
        let selections = search::rank(&pool, &shape, budget, scorer.as_ref(), self.limits(), deadline)?;

        debug!(
            outgoing = ?request.outgoing_names(),
            strategy = %request.strategy,
            trade_type = %request.trade_type,
            budget,
            pool = pool.len(),
            options = selections.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "trade search complete"
        );

        Ok(selections
            .into_iter()
            .map(|s| TradeOption::from_selection(s, budget, request.strategy))
            .collect())
    }

    /// Whether a player is locked at the simulated time, or now
    pub fn check_lockout(
        &self,
        catalog: &PlayerCatalog,
        name: &str,
        simulated: Option<DateTime<Utc>>,
    ) -> Result<bool> {
        let player = catalog.require(name)?;
        let locked = self.lockout.is_locked(player, simulated);
        info!(player = name, locked, "lockout checked");
        Ok(locked)
    }
}
