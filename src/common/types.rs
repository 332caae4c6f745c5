//! Unified types shared by the catalog, engine and API layers

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::TradeError;

/// Playing position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    /// Hooker
    Hok,
    /// Halfback / five-eighth
    Hlf,
    /// Centre
    Ctr,
    /// Winger / fullback
    Wfb,
    /// Edge forward
    Edg,
    /// Middle forward
    Mid,
}

impl Position {
    /// All positions in display order
    pub const ALL: [Position; 6] = [
        Position::Hok,
        Position::Hlf,
        Position::Ctr,
        Position::Wfb,
        Position::Edg,
        Position::Mid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Hok => "HOK",
            Position::Hlf => "HLF",
            Position::Ctr => "CTR",
            Position::Wfb => "WFB",
            Position::Edg => "EDG",
            Position::Mid => "MID",
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HOK" => Ok(Position::Hok),
            "HLF" => Ok(Position::Hlf),
            "CTR" => Ok(Position::Ctr),
            "WFB" => Ok(Position::Wfb),
            "EDG" => Ok(Position::Edg),
            "MID" => Ok(Position::Mid),
            other => Err(TradeError::InvalidRequest(format!("unknown position '{other}'"))),
        }
    }
}

/// How incoming players relate to the positions of outgoing players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    /// Each incoming player matches the position of the player it replaces
    #[serde(rename = "likeForLike")]
    LikeForLike,
    /// Incoming players may come from any requested position
    #[serde(rename = "positionalSwap")]
    PositionalSwap,
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeType::LikeForLike => write!(f, "likeForLike"),
            TradeType::PositionalSwap => write!(f, "positionalSwap"),
        }
    }
}

impl FromStr for TradeType {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "likeForLike" => Ok(TradeType::LikeForLike),
            "positionalSwap" => Ok(TradeType::PositionalSwap),
            other => Err(TradeError::InvalidRequest(format!("unknown trade type '{other}'"))),
        }
    }
}

/// Scoring strategy selected by the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Rank by base premium (value for money)
    MaximizeValue,
    /// Rank by average base stats
    MaximizeBase,
    /// Weighted blend of value and base
    Hybrid,
}

impl StrategyKind {
    /// Form code used by the front end ("1", "2", "3")
    pub fn code(&self) -> &'static str {
        match self {
            StrategyKind::MaximizeValue => "1",
            StrategyKind::MaximizeBase => "2",
            StrategyKind::Hybrid => "3",
        }
    }

    /// Whether results should carry value (BPRE) annotations
    pub fn is_value_oriented(&self) -> bool {
        matches!(self, StrategyKind::MaximizeValue | StrategyKind::Hybrid)
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::MaximizeValue => write!(f, "maximize_value"),
            StrategyKind::MaximizeBase => write!(f, "maximize_base"),
            StrategyKind::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = TradeError;

    /// Accepts the form codes and the snake_case names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "maximize_value" | "value" => Ok(StrategyKind::MaximizeValue),
            "2" | "maximize_base" | "base" => Ok(StrategyKind::MaximizeBase),
            "3" | "hybrid" => Ok(StrategyKind::Hybrid),
            other => Err(TradeError::InvalidStrategy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parsing() {
        assert_eq!("hlf".parse::<Position>().unwrap(), Position::Hlf);
        assert_eq!(" MID ".parse::<Position>().unwrap(), Position::Mid);
        assert!("2RF".parse::<Position>().is_err());
        assert_eq!(Position::Wfb.to_string(), "WFB");
    }

    #[test]
    fn test_strategy_codes() {
        for kind in [StrategyKind::MaximizeValue, StrategyKind::MaximizeBase, StrategyKind::Hybrid] {
            assert_eq!(kind.code().parse::<StrategyKind>().unwrap(), kind);
        }
        assert!(matches!(
            "4".parse::<StrategyKind>(),
            Err(TradeError::InvalidStrategy(code)) if code == "4"
        ));
    }

    #[test]
    fn test_trade_type_serde_names() {
        let json = serde_json::to_string(&TradeType::PositionalSwap).unwrap();
        assert_eq!(json, "\"positionalSwap\"");
        assert_eq!("likeForLike".parse::<TradeType>().unwrap(), TradeType::LikeForLike);
    }
}
