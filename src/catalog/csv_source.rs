//! CSV catalog loader
//!
//! Reads the consolidated per-round export: one row per player per round.

use async_trait::async_trait;
use chrono::FixedOffset;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::{Player, PlayerCatalog, TeamList, WeeklyScore};
use crate::common::errors::{Result, TradeError};
use crate::common::traits::CatalogSource;
use crate::common::types::Position;
use crate::engine::lockout::parse_timestamp;

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Round")]
    round: String,
    #[serde(rename = "Player")]
    player: String,
    #[serde(rename = "POS")]
    position: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Total base")]
    total_base: String,
    #[serde(rename = "Team", default)]
    team: Option<String>,
    #[serde(rename = "Age", default)]
    age: Option<String>,
    #[serde(rename = "Base exceeds price premium", default)]
    premium: Option<String>,
    #[serde(rename = "Lockout", default)]
    lockout: Option<String>,
}

/// A row after cleaning, ready to be grouped by player
#[derive(Debug)]
pub(super) struct RoundRow {
    pub(super) round: u32,
    pub(super) position: Position,
    pub(super) price: i64,
    pub(super) base: Decimal,
    pub(super) premium: Option<Decimal>,
    pub(super) team: Option<String>,
    pub(super) age: Option<u32>,
    pub(super) lockout: Option<chrono::DateTime<chrono::Utc>>,
}

/// Strip currency symbols, thousands separators, spaces and quotes
pub fn clean_numeric(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ',' | ' ' | '"' | '$'))
        .collect()
}

fn parse_decimal(raw: &str, column: &str, line: usize) -> Result<Decimal> {
    let cleaned = clean_numeric(raw);
    Decimal::from_str(&cleaned).map_err(|e| {
        TradeError::CatalogLoad(format!("line {line}: invalid {column} '{raw}': {e}"))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_row(row: CatalogRow, line: usize, offset: FixedOffset) -> Result<Option<(String, RoundRow)>> {
    let name = row.player.trim().to_string();
    if name.is_empty() {
        warn!(line, "Skipping row without a player name");
        return Ok(None);
    }

    let position = match Position::from_str(&row.position) {
        Ok(position) => position,
        Err(_) => {
            warn!(line, player = %name, position = %row.position, "Skipping row with unknown position");
            return Ok(None);
        }
    };

    if clean_numeric(&row.total_base).is_empty() {
        warn!(line, player = %name, "Skipping row without a base score");
        return Ok(None);
    }

    let round = parse_decimal(&row.round, "Round", line)?;
    let round = Some(round)
        .filter(|r| r.fract().is_zero())
        .and_then(|r| r.to_u32())
        .ok_or_else(|| TradeError::CatalogLoad(format!("line {line}: invalid Round '{}'", row.round)))?;
    let price = parse_decimal(&row.price, "Price", line)?
        .round()
        .to_i64()
        .ok_or_else(|| TradeError::CatalogLoad(format!("line {line}: invalid Price '{}'", row.price)))?;
    let base = parse_decimal(&row.total_base, "Total base", line)?;

    let premium = match non_empty(row.premium) {
        Some(raw) => Some(parse_decimal(&raw, "Base exceeds price premium", line)?),
        None => None,
    };
    let age = match non_empty(row.age) {
        Some(raw) => parse_decimal(&raw, "Age", line)?.to_u32(),
        None => None,
    };
    let lockout = match non_empty(row.lockout) {
        Some(raw) => Some(parse_timestamp(&raw, offset).map_err(|_| {
            TradeError::CatalogLoad(format!("line {line}: invalid Lockout '{raw}'"))
        })?),
        None => None,
    };

    Ok(Some((
        name,
        RoundRow {
            round,
            position,
            price,
            base,
            premium,
            team: non_empty(row.team),
            age,
            lockout,
        },
    )))
}

/// Group per-round rows into players
///
/// The latest round of each player supplies position, price, team, age and
/// lockout; every round contributes a weekly score.
pub(super) fn group_rounds(rows: impl IntoIterator<Item = (String, RoundRow)>) -> Vec<Player> {
    let mut grouped: BTreeMap<String, BTreeMap<u32, RoundRow>> = BTreeMap::new();
    for (name, row) in rows {
        let rounds = grouped.entry(name.clone()).or_default();
        if rounds.insert(row.round, row).is_some() {
            warn!(player = %name, "Duplicate round for player, keeping the later row");
        }
    }

    grouped
        .into_iter()
        .filter_map(|(name, rounds)| {
            let weekly: Vec<WeeklyScore> = rounds
                .values()
                .map(|r| WeeklyScore {
                    round: r.round,
                    base: r.base,
                    premium: r.premium,
                })
                .collect();
            let (_, latest) = rounds.into_iter().next_back()?;
            Some(Player {
                name,
                position: latest.position,
                price: latest.price,
                team: latest.team,
                age: latest.age,
                weekly,
                lockout: latest.lockout,
            })
        })
        .collect()
}

/// Parse the per-round CSV into players
pub fn parse_catalog_csv<R: Read>(reader: R, offset: FixedOffset) -> Result<Vec<Player>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let line = index + 2;
        if let Some(parsed) = parse_row(record?, line, offset)? {
            rows.push(parsed);
        }
    }

    Ok(group_rounds(rows))
}

/// Parse a team list: one name per line, blank lines and `#` comments ignored
pub fn parse_team_list(content: &str) -> TeamList {
    TeamList::new(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

/// Read and parse a team list file
pub async fn load_team_list(path: &str) -> Result<TeamList> {
    let content = tokio::fs::read_to_string(path).await?;
    let team_list = parse_team_list(&content);
    info!(path, members = team_list.len(), "Loaded team list");
    Ok(team_list)
}

/// Catalog source backed by a CSV export on disk
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
    team_list_path: Option<String>,
    offset: FixedOffset,
}

impl CsvCatalogSource {
    pub fn new(path: impl Into<PathBuf>, offset: FixedOffset) -> Self {
        Self {
            path: path.into(),
            team_list_path: None,
            offset,
        }
    }

    pub fn with_team_list(mut self, path: impl Into<String>) -> Self {
        self.team_list_path = Some(path.into());
        self
    }
}

#[async_trait]
impl CatalogSource for CsvCatalogSource {
    async fn load(&self) -> Result<PlayerCatalog> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            TradeError::CatalogLoad(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let players = parse_catalog_csv(bytes.as_slice(), self.offset)?;
        debug!(players = players.len(), path = %self.path.display(), "Parsed catalog CSV");

        let mut catalog = PlayerCatalog::new(players)?;
        if let Some(path) = &self.team_list_path {
            catalog = catalog.with_team_list(load_team_list(path).await?);
        }
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
