//! Player catalog
//!
//! The catalog is an immutable snapshot of every player's static attributes
//! and weekly scores for the current scoring window. Snapshots are produced
//! by a [`CatalogSource`](crate::common::traits::CatalogSource) and published
//! through a [`CatalogStore`], which swaps the whole snapshot atomically so
//! in-flight requests never observe a partial reload.

mod csv_source;
mod postgres;
mod stats;
mod store;

pub use csv_source::{
    clean_numeric, load_team_list, parse_catalog_csv, parse_team_list, CsvCatalogSource,
};
pub use postgres::PostgresCatalogSource;
pub use stats::{priority_level, PlayerProfile, StatsModel};
pub use store::CatalogStore;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::common::errors::{Result, TradeError};
use crate::common::types::Position;

/// A single round's scoring line for a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyScore {
    pub round: u32,
    /// Base stats score for the round
    pub base: Decimal,
    /// Recorded "base exceeds price premium", when the data provides one
    #[serde(default)]
    pub premium: Option<Decimal>,
}

impl WeeklyScore {
    pub fn new(round: u32, base: Decimal) -> Self {
        Self {
            round,
            base,
            premium: None,
        }
    }

    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.premium = Some(premium);
        self
    }
}

/// A player as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique, case-sensitive name
    pub name: String,
    pub position: Position,
    /// Current price in currency units
    pub price: i64,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    /// Weekly scores ordered by round ascending
    pub weekly: Vec<WeeklyScore>,
    /// Point in time after which the player cannot be selected this round
    #[serde(default)]
    pub lockout: Option<DateTime<Utc>>,
}

impl Player {
    pub fn new(name: impl Into<String>, position: Position, price: i64) -> Self {
        Self {
            name: name.into(),
            position,
            price,
            team: None,
            age: None,
            weekly: Vec::new(),
            lockout: None,
        }
    }

    pub fn with_week(mut self, week: WeeklyScore) -> Self {
        self.weekly.push(week);
        self.weekly.sort_by_key(|w| w.round);
        self
    }

    /// Convenience for building a player from plain base scores, rounds 1..=n
    pub fn with_scores(mut self, scores: &[i64]) -> Self {
        self.weekly = scores
            .iter()
            .enumerate()
            .map(|(i, s)| WeeklyScore::new(i as u32 + 1, Decimal::from(*s)))
            .collect();
        self
    }

    pub fn with_lockout(mut self, lockout: DateTime<Utc>) -> Self {
        self.lockout = Some(lockout);
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Most recent round the player recorded a score in
    pub fn latest_round(&self) -> Option<u32> {
        self.weekly.last().map(|w| w.round)
    }
}

/// Set of player names named in the current team lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamList {
    members: HashSet<String>,
}

impl TeamList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Immutable catalog snapshot
#[derive(Debug, Clone)]
pub struct PlayerCatalog {
    players: BTreeMap<String, Arc<Player>>,
    team_list: Option<TeamList>,
    latest_round: Option<u32>,
    loaded_at: DateTime<Utc>,
}

impl PlayerCatalog {
    /// Build a catalog, rejecting duplicate names
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut map = BTreeMap::new();
        let mut latest_round = None;
        for player in players {
            latest_round = latest_round.max(player.latest_round());
            let name = player.name.clone();
            if map.insert(name.clone(), Arc::new(player)).is_some() {
                return Err(TradeError::CatalogLoad(format!("duplicate player '{name}'")));
            }
        }
        Ok(Self {
            players: map,
            team_list: None,
            latest_round,
            loaded_at: Utc::now(),
        })
    }

    /// An empty catalog, used before the first load completes
    pub fn empty() -> Self {
        Self {
            players: BTreeMap::new(),
            team_list: None,
            latest_round: None,
            loaded_at: Utc::now(),
        }
    }

    pub fn with_team_list(mut self, team_list: TeamList) -> Self {
        self.team_list = Some(team_list);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Player>> {
        self.players.get(name)
    }

    /// Look up a player, failing with `PlayerNotFound`
    pub fn require(&self, name: &str) -> Result<&Arc<Player>> {
        self.get(name)
            .ok_or_else(|| TradeError::PlayerNotFound(name.to_string()))
    }

    /// Players in name order
    pub fn players(&self) -> impl Iterator<Item = &Arc<Player>> {
        self.players.values()
    }

    /// All player names, sorted
    pub fn names(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }

    pub fn team_list(&self) -> Option<&TeamList> {
        self.team_list.as_ref()
    }

    pub fn latest_round(&self) -> Option<u32> {
        self.latest_round
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether the player scored in any of the last `window` catalog rounds
    pub fn is_active(&self, player: &Player, window: usize) -> bool {
        match (self.latest_round, player.latest_round()) {
            (Some(latest), Some(played)) => {
                let first_recent = latest.saturating_sub(window.saturating_sub(1) as u32);
                played >= first_recent
            }
            _ => false,
        }
    }
}
