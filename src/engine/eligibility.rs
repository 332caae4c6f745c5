//! Candidate pool construction

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::lockout::is_locked;
use super::request::TradeRequest;
use crate::catalog::{Player, PlayerCatalog, PlayerProfile, StatsModel};
use crate::common::errors::{Result, TradeError};
use crate::common::types::{Position, TradeType};

/// Reject a positional swap that names no positions
pub fn validate_positions(request: &TradeRequest) -> Result<()> {
    match (&request.trade_type, &request.positions) {
        (TradeType::PositionalSwap, Some(positions)) if positions.is_empty() => {
            Err(TradeError::InvalidPositionSet)
        }
        _ => Ok(()),
    }
}

/// Positions incoming players may play, `None` meaning any
fn allowed_positions(request: &TradeRequest, outgoing: &[Arc<Player>]) -> Option<BTreeSet<Position>> {
    match request.trade_type {
        TradeType::LikeForLike => Some(outgoing.iter().map(|p| p.position).collect()),
        TradeType::PositionalSwap => request.positions.clone(),
    }
}

/// Build the pool of incoming candidates
///
/// `reference_time` is set only when lockout applies. The pool excludes the
/// outgoing players, non-members of the team list (when restricted), players
/// outside the allowed positions, players without a score in the recent
/// window and locked players. Per-slot position pairing for two-player
/// like-for-like trades is left to the search.
pub fn candidates(
    catalog: &PlayerCatalog,
    outgoing: &[Arc<Player>],
    request: &TradeRequest,
    stats: &StatsModel,
    reference_time: Option<DateTime<Utc>>,
) -> Result<Vec<PlayerProfile>> {
    validate_positions(request)?;

    let team_list = if request.restrict_to_team_list {
        Some(catalog.team_list().ok_or(TradeError::TeamListUnavailable)?)
    } else {
        None
    };
    let positions = allowed_positions(request, outgoing);

    let pool = catalog
        .players()
        .filter(|p| !outgoing.iter().any(|out| out.name == p.name))
        .filter(|p| team_list.map_or(true, |list| list.contains(&p.name)))
        .filter(|p| positions.as_ref().map_or(true, |set| set.contains(&p.position)))
        .filter(|p| catalog.is_active(p, stats.lookback_rounds))
        .filter(|p| reference_time.map_or(true, |at| !is_locked(p, at)))
        .map(|p| stats.profile(p))
        .collect();

    Ok(pool)
}
