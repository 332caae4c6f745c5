//! Trade request model and decoding
//!
//! The front end posts an urlencoded form; API clients may post JSON with the
//! same field names. Both decode into [`CalculateParams`], which is then
//! validated into a typed [`TradeRequest`].

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::lockout::parse_timestamp;
use crate::common::errors::{Result, TradeError};
use crate::common::types::{Position, StrategyKind, TradeType};

/// A validated trade calculation request
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    pub player1: String,
    pub player2: Option<String>,
    pub strategy: StrategyKind,
    pub trade_type: TradeType,
    pub restrict_to_team_list: bool,
    pub apply_lockout: bool,
    /// Overrides the clock when lockout is applied
    pub simulate_date_time: Option<DateTime<Utc>>,
    /// Allowed positions for a positional swap; `None` means unrestricted
    pub positions: Option<BTreeSet<Position>>,
    /// Salary added to the freed budget; `None` uses the configured default
    pub salary_slack: Option<i64>,
}

impl TradeRequest {
    /// Single-player like-for-like request with the given strategy
    pub fn new(player1: impl Into<String>, strategy: StrategyKind) -> Self {
        Self {
            player1: player1.into(),
            player2: None,
            strategy,
            trade_type: TradeType::LikeForLike,
            restrict_to_team_list: false,
            apply_lockout: false,
            simulate_date_time: None,
            positions: None,
            salary_slack: None,
        }
    }

    pub fn with_player2(mut self, player2: impl Into<String>) -> Self {
        self.player2 = Some(player2.into());
        self
    }

    pub fn positional_swap<I: IntoIterator<Item = Position>>(mut self, positions: I) -> Self {
        self.trade_type = TradeType::PositionalSwap;
        self.positions = Some(positions.into_iter().collect());
        self
    }

    pub fn with_lockout(mut self, simulate_date_time: Option<DateTime<Utc>>) -> Self {
        self.apply_lockout = true;
        self.simulate_date_time = simulate_date_time;
        self
    }

    pub fn restricted_to_team_list(mut self) -> Self {
        self.restrict_to_team_list = true;
        self
    }

    pub fn with_salary_slack(mut self, slack: i64) -> Self {
        self.salary_slack = Some(slack);
        self
    }

    /// Outgoing player names in slot order
    pub fn outgoing_names(&self) -> Vec<&str> {
        std::iter::once(self.player1.as_str())
            .chain(self.player2.as_deref())
            .collect()
    }
}

/// Raw request fields as posted by the page or an API client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateParams {
    #[serde(default)]
    pub player1: String,
    #[serde(default)]
    pub player2: Option<String>,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub restrict_to_team_list: bool,
    #[serde(default)]
    pub apply_lockout: bool,
    #[serde(default)]
    pub simulate_date_time: Option<String>,
    #[serde(default)]
    pub positions: Option<Vec<String>>,
    #[serde(default)]
    pub salary_slack: Option<i64>,
}

/// Checkbox semantics: present means checked unless explicitly falsy
fn checkbox(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "off" | "0")
}

impl CalculateParams {
    /// Decode an `application/x-www-form-urlencoded` body
    ///
    /// `positions` may repeat (also accepted as `positions[]`).
    pub fn from_form(body: &[u8]) -> Result<Self> {
        let mut params = CalculateParams::default();
        let mut positions = Vec::new();

        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "player1" => params.player1 = value.into_owned(),
                "player2" => params.player2 = Some(value.into_owned()),
                "strategy" => params.strategy = value.into_owned(),
                "tradeType" => params.trade_type = Some(value.into_owned()),
                "restrictToTeamList" => params.restrict_to_team_list = checkbox(&value),
                "applyLockout" => params.apply_lockout = checkbox(&value),
                "simulateDateTime" => params.simulate_date_time = Some(value.into_owned()),
                "positions" | "positions[]" => positions.push(value.into_owned()),
                "salarySlack" => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        params.salary_slack = Some(trimmed.parse().map_err(|_| {
                            TradeError::InvalidRequest(format!("invalid salarySlack '{trimmed}'"))
                        })?);
                    }
                }
                _ => {}
            }
        }

        // A positional swap form with no boxes ticked still means "an empty set"
        let is_swap = params.trade_type.as_deref() == Some("positionalSwap");
        if is_swap || !positions.is_empty() {
            params.positions = Some(positions);
        }
        Ok(params)
    }

    /// Validate into a typed request
    ///
    /// Timestamps without an offset are read at `offset`.
    pub fn into_request(self, offset: FixedOffset) -> Result<TradeRequest> {
        let player1 = self.player1.trim().to_string();
        if player1.is_empty() {
            return Err(TradeError::InvalidRequest("player1 is required".into()));
        }

        let player2 = self
            .player2
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        if player2.as_deref() == Some(player1.as_str()) {
            return Err(TradeError::InvalidRequest(
                "player1 and player2 must be different players".into(),
            ));
        }

        let strategy = self.strategy.parse::<StrategyKind>()?;
        let trade_type = match self.trade_type.as_deref().map(str::trim) {
            None | Some("") => TradeType::LikeForLike,
            Some(raw) => raw.parse::<TradeType>()?,
        };

        let simulate_date_time = match self.simulate_date_time.as_deref().map(str::trim) {
            Some(raw) if self.apply_lockout && !raw.is_empty() => Some(parse_timestamp(raw, offset)?),
            _ => None,
        };

        let positions = match (trade_type, self.positions) {
            (TradeType::PositionalSwap, Some(raw)) => Some(
                raw.iter()
                    .map(|p| p.parse::<Position>())
                    .collect::<Result<BTreeSet<_>>>()?,
            ),
            _ => None,
        };

        Ok(TradeRequest {
            player1,
            player2,
            strategy,
            trade_type,
            restrict_to_team_list: self.restrict_to_team_list,
            apply_lockout: self.apply_lockout,
            simulate_date_time,
            positions,
            salary_slack: self.salary_slack,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_form_like_for_like() {
        let body = b"player1=N.+Cleary&player2=&strategy=2&tradeType=likeForLike";
        let request = CalculateParams::from_form(body).unwrap().into_request(utc()).unwrap();

        assert_eq!(request, TradeRequest::new("N. Cleary", StrategyKind::MaximizeBase));
        assert_eq!(request.outgoing_names(), vec!["N. Cleary"]);
    }

    #[test]
    fn test_form_positional_swap_with_checkboxes() {
        let body = b"player1=A&player2=B&strategy=3&tradeType=positionalSwap\
&positions=HLF&positions=CTR&positions=HLF&applyLockout=on\
&simulateDateTime=2024-03-07T19%3A30&restrictToTeamList=on&salarySlack=25000";
        let request = CalculateParams::from_form(body).unwrap().into_request(utc()).unwrap();

        assert_eq!(request.strategy, StrategyKind::Hybrid);
        assert_eq!(request.trade_type, TradeType::PositionalSwap);
        assert_eq!(
            request.positions,
            Some([Position::Hlf, Position::Ctr].into_iter().collect())
        );
        assert!(request.apply_lockout);
        assert!(request.restrict_to_team_list);
        assert_eq!(
            request.simulate_date_time,
            Some(Utc.with_ymd_and_hms(2024, 3, 7, 19, 30, 0).unwrap())
        );
        assert_eq!(request.salary_slack, Some(25_000));
        assert_eq!(request.outgoing_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_form_swap_without_positions_is_empty_set() {
        let body = b"player1=A&strategy=1&tradeType=positionalSwap";
        let request = CalculateParams::from_form(body).unwrap().into_request(utc()).unwrap();
        assert_eq!(request.positions, Some(BTreeSet::new()));
    }

    #[test]
    fn test_simulated_time_ignored_without_lockout() {
        let body = b"player1=A&strategy=1&simulateDateTime=2024-03-07T19%3A30";
        let request = CalculateParams::from_form(body).unwrap().into_request(utc()).unwrap();
        assert_eq!(request.simulate_date_time, None);
    }

    #[test]
    fn test_json_params() {
        let params: CalculateParams = serde_json::from_str(
            r#"{"player1":"A","player2":"B","strategy":"1","tradeType":"positionalSwap","applyLockout":true}"#,
        )
        .unwrap();
        let request = params.into_request(utc()).unwrap();
        // JSON without positions leaves the swap unrestricted
        assert_eq!(request.positions, None);
        assert!(request.apply_lockout);
    }

    #[test]
    fn test_validation_errors() {
        let missing = CalculateParams::from_form(b"strategy=1").unwrap();
        assert!(matches!(missing.into_request(utc()), Err(TradeError::InvalidRequest(_))));

        let same = CalculateParams::from_form(b"player1=A&player2=A&strategy=1").unwrap();
        assert!(matches!(same.into_request(utc()), Err(TradeError::InvalidRequest(_))));

        let strategy = CalculateParams::from_form(b"player1=A&strategy=9").unwrap();
        assert!(matches!(strategy.into_request(utc()), Err(TradeError::InvalidStrategy(_))));

        let position = CalculateParams::from_form(
            b"player1=A&strategy=1&tradeType=positionalSwap&positions=FRF",
        )
        .unwrap();
        assert!(matches!(position.into_request(utc()), Err(TradeError::InvalidRequest(_))));

        let slack = CalculateParams::from_form(b"player1=A&strategy=1&salarySlack=lots");
        assert!(matches!(slack, Err(TradeError::InvalidRequest(_))));
    }
}
