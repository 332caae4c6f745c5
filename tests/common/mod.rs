//! Common test utilities and fixtures

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use nrl_trade_calculator::catalog::{Player, PlayerCatalog, TeamList};
use nrl_trade_calculator::common::types::Position;
use once_cell::sync::Lazy;

/// Nathan Cleary's lockout
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 7, 19, 0, 0).unwrap()
}

/// Jahrome Hughes' lockout, a day after [`t0`]
pub fn t1() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 8, 20, 0, 0).unwrap()
}

fn player(name: &str, position: Position, price: i64, scores: &[i64]) -> Player {
    Player::new(name, position, price).with_scores(scores)
}

/// A small league across every position, three rounds played
pub fn league_players() -> Vec<Player> {
    vec![
        player("Nathan Cleary", Position::Hlf, 500_000, &[55, 60, 65]).with_lockout(t0()),
        player("Jahrome Hughes", Position::Hlf, 480_000, &[50, 52, 54]).with_lockout(t1()),
        player("Nicho Hynes", Position::Hlf, 490_000, &[48, 50, 52]),
        player("Mitchell Moses", Position::Hlf, 520_000, &[70, 70, 70]),
        player("Luke Brooks", Position::Hlf, 400_000, &[38, 40, 42]),
        player("Payne Haas", Position::Mid, 600_000, &[60, 65, 70]).with_age(25),
        player("Patrick Carrigan", Position::Mid, 580_000, &[55, 60, 65]).with_age(26),
        player("Jake Trbojevic", Position::Mid, 450_000, &[40, 45, 50]).with_age(30),
        player("Reuben Cotter", Position::Mid, 420_000, &[42, 44, 46]),
        player("Stephen Crichton", Position::Ctr, 520_000, &[50, 50, 50]),
        player("Herbie Farnworth", Position::Ctr, 470_000, &[45, 48, 51]),
        player("James Tedesco", Position::Wfb, 550_000, &[55, 50, 45]),
        player("Dylan Edwards", Position::Wfb, 530_000, &[52, 54, 56]),
        player("Api Koroisau", Position::Hok, 450_000, &[40, 42, 44]),
        player("Harry Grant", Position::Hok, 500_000, &[45, 47, 49]),
        player("Angus Crichton", Position::Edg, 460_000, &[44, 46, 48]),
    ]
}

pub fn league_team_list() -> TeamList {
    TeamList::new([
        "Jahrome Hughes",
        "Nicho Hynes",
        "Payne Haas",
        "Patrick Carrigan",
        "Stephen Crichton",
        "Dylan Edwards",
        "Harry Grant",
    ])
}

/// Shared league snapshot with the team list attached
pub static LEAGUE: Lazy<PlayerCatalog> = Lazy::new(|| {
    PlayerCatalog::new(league_players())
        .expect("league fixture has unique names")
        .with_team_list(league_team_list())
});

/// Catalog export in the on-disk CSV format
pub const LEAGUE_CSV: &str = "\
Round,Player,Team,POS,Age,Price,Total base,Lockout
1,Nathan Cleary,PEN,HLF,26,\"$500,000\",55,2024-03-07T19:00:00Z
2,Nathan Cleary,PEN,HLF,26,\"$500,000\",60,2024-03-07T19:00:00Z
3,Nathan Cleary,PEN,HLF,26,\"$500,000\",65,2024-03-07T19:00:00Z
1,Nicho Hynes,CRO,HLF,28,\"$490,000\",48,
2,Nicho Hynes,CRO,HLF,28,\"$490,000\",50,
3,Nicho Hynes,CRO,HLF,28,\"$490,000\",52,
1,Luke Brooks,MAN,HLF,29,\"$400,000\",38,
2,Luke Brooks,MAN,HLF,29,\"$400,000\",40,
3,Luke Brooks,MAN,HLF,29,\"$400,000\",42,
3,Payne Haas,BRI,MID,25,\"$600,000\",70,
";
