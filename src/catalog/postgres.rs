//! PostgreSQL catalog loader
//!
//! Reads the `player_stats` table produced by the spreadsheet import: the
//! same columns as the CSV export with spaces replaced by underscores.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use super::csv_source::{group_rounds, load_team_list, RoundRow};
use super::PlayerCatalog;
use crate::common::errors::{Result, TradeError};
use crate::common::traits::CatalogSource;
use crate::common::types::Position;
use crate::config::DatabaseConfig;

const OPTIONAL_COLUMNS: [(&str, &str); 4] = [
    ("Team", "\"Team\"::text AS team"),
    ("Age", "\"Age\"::int4 AS age"),
    ("Base_exceeds_price_premium", "\"Base_exceeds_price_premium\"::numeric AS premium"),
    ("Lockout", "\"Lockout\"::timestamptz AS lockout"),
];

/// Catalog source backed by a PostgreSQL table
pub struct PostgresCatalogSource {
    pool: PgPool,
    table: String,
    team_list_path: Option<String>,
}

impl PostgresCatalogSource {
    /// Connect using the database configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        if !is_identifier(&config.table) {
            return Err(TradeError::Configuration(format!(
                "invalid table name '{}'",
                config.table
            )));
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .connect(&config.url)
            .await?;

        Ok(Self {
            pool,
            table: config.table.clone(),
            team_list_path: None,
        })
    }

    pub fn with_team_list(mut self, path: impl Into<String>) -> Self {
        self.team_list_path = Some(path.into());
        self
    }

    async fn existing_columns(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT column_name::text FROM information_schema.columns WHERE table_name = $1",
        )
        .bind(&self.table)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>(0).map_err(TradeError::from))
            .collect()
    }
}

/// Only plain identifiers are interpolated into SQL
fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.starts_with(|c: char| c.is_ascii_digit())
}

fn select_statement(table: &str, columns: &[String]) -> String {
    let mut select = vec![
        "\"Round\"::int4 AS round".to_string(),
        "\"Player\"::text AS player".to_string(),
        "\"POS\"::text AS pos".to_string(),
        "\"Price\"::numeric AS price".to_string(),
        "\"Total_base\"::numeric AS total_base".to_string(),
    ];
    for (column, expression) in OPTIONAL_COLUMNS {
        if columns.iter().any(|c| c == column) {
            select.push(expression.to_string());
        }
    }
    format!(
        "SELECT {} FROM \"{}\" WHERE \"Total_base\" IS NOT NULL",
        select.join(", "),
        table
    )
}

fn optional<'r, T>(row: &'r PgRow, column: &str) -> Result<Option<T>>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    match row.try_get::<Option<T>, _>(column) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnNotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn round_row(row: &PgRow) -> Result<Option<(String, RoundRow)>> {
    let name: String = row.try_get("player")?;
    let position_raw: String = row.try_get("pos")?;
    let position = match Position::from_str(&position_raw) {
        Ok(position) => position,
        Err(_) => {
            warn!(player = %name, position = %position_raw, "Skipping row with unknown position");
            return Ok(None);
        }
    };

    let round: i32 = row.try_get("round")?;
    let price: Decimal = row.try_get("price")?;
    let price = price
        .round()
        .to_i64()
        .ok_or_else(|| TradeError::CatalogLoad(format!("invalid price for {name}")))?;

    let age: Option<i32> = optional(row, "age")?;
    Ok(Some((
        name.trim().to_string(),
        RoundRow {
            round: u32::try_from(round)
                .map_err(|_| TradeError::CatalogLoad(format!("negative round for {name}")))?,
            position,
            price,
            base: row.try_get("total_base")?,
            premium: optional(row, "premium")?,
            team: optional(row, "team")?,
            age: age.and_then(|a| u32::try_from(a).ok()),
            lockout: optional(row, "lockout")?,
        },
    )))
}

#[async_trait]
impl CatalogSource for PostgresCatalogSource {
    async fn load(&self) -> Result<PlayerCatalog> {
        let columns = self.existing_columns().await?;
        if columns.is_empty() {
            return Err(TradeError::CatalogLoad(format!(
                "table '{}' does not exist",
                self.table
            )));
        }

        let statement = select_statement(&self.table, &columns);
        let rows = sqlx::query(&statement).fetch_all(&self.pool).await?;
        debug!(rows = rows.len(), table = %self.table, "Fetched catalog rows");

        let mut parsed = Vec::with_capacity(rows.len());
        for row in &rows {
            if let Some(entry) = round_row(row)? {
                parsed.push(entry);
            }
        }

        let mut catalog = PlayerCatalog::new(group_rounds(parsed))?;
        if let Some(path) = &self.team_list_path {
            catalog = catalog.with_team_list(load_team_list(path).await?);
        }
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("postgres:{}", self.table)
    }
}
