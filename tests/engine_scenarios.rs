//! Integration tests for the trade engine
//!
//! Exercises the full request path (resolution, lockout, eligibility, search)
//! against fixture catalogs.

mod common;

use common::{t0, t1, LEAGUE};
use nrl_trade_calculator::catalog::{Player, PlayerCatalog, StatsModel};
use nrl_trade_calculator::common::types::{Position, StrategyKind};
use nrl_trade_calculator::config::EngineConfig;
use nrl_trade_calculator::engine::{SearchDeadline, TradeEngine, TradeOption, TradeRequest};
use nrl_trade_calculator::TradeError;
use pretty_assertions::assert_eq;
use std::collections::HashSet;
use std::sync::Arc;

const STRATEGIES: [StrategyKind; 3] = [
    StrategyKind::MaximizeValue,
    StrategyKind::MaximizeBase,
    StrategyKind::Hybrid,
];

fn engine() -> TradeEngine {
    TradeEngine::new(EngineConfig::default()).unwrap()
}

fn run(catalog: &PlayerCatalog, request: &TradeRequest) -> Result<Vec<TradeOption>, TradeError> {
    engine().search(catalog, request, &SearchDeadline::none())
}

fn names(options: &[TradeOption]) -> Vec<Vec<String>> {
    options
        .iter()
        .map(|o| o.players.iter().map(|p| p.name().to_string()).collect())
        .collect()
}

fn budget_of(catalog: &PlayerCatalog, request: &TradeRequest) -> i64 {
    request
        .outgoing_names()
        .iter()
        .map(|n| catalog.get(n).unwrap().price)
        .sum::<i64>()
        + request.salary_slack.unwrap_or(0)
}

// ============================================================================
// Example scenarios
// ============================================================================

#[test]
fn test_locked_outgoing_player_is_rejected() {
    let request = TradeRequest::new("Nathan Cleary", StrategyKind::MaximizeValue).with_lockout(Some(t0()));
    let err = run(&LEAGUE, &request).unwrap_err();
    assert!(matches!(err, TradeError::OutgoingPlayerLocked(name) if name == "Nathan Cleary"));
}

#[test]
fn test_unlocked_outgoing_skips_locked_candidates() {
    // Cleary repriced inside Hughes' 480_000 budget; he locks at T0, Hughes at T1
    let players = common::league_players()
        .into_iter()
        .map(|mut p| {
            if p.name == "Nathan Cleary" {
                p.price = 450_000;
            }
            p
        })
        .collect();
    let catalog = PlayerCatalog::new(players).unwrap();

    let request = TradeRequest::new("Jahrome Hughes", StrategyKind::MaximizeValue);
    let mut unfiltered: Vec<String> = names(&run(&catalog, &request).unwrap()).concat();
    unfiltered.sort();
    assert_eq!(unfiltered, vec!["Luke Brooks".to_string(), "Nathan Cleary".to_string()]);

    let request = request.with_lockout(Some(t0()));
    let options = run(&catalog, &request).unwrap();
    assert_eq!(names(&options), vec![vec!["Luke Brooks".to_string()]]);

    let request = TradeRequest::new("Jahrome Hughes", StrategyKind::MaximizeValue).with_lockout(Some(t1()));
    assert!(matches!(
        run(&LEAGUE, &request),
        Err(TradeError::OutgoingPlayerLocked(_))
    ));
}

#[test]
fn test_only_affordable_candidate_returned() {
    let catalog = PlayerCatalog::new(vec![
        Player::new("A", Position::Hlf, 500_000).with_scores(&[50, 50, 50]),
        Player::new("C", Position::Hlf, 520_000).with_scores(&[80, 80, 80]),
        Player::new("D", Position::Hlf, 490_000).with_scores(&[45, 45, 45]),
    ])
    .unwrap();

    for strategy in STRATEGIES {
        let options = run(&catalog, &TradeRequest::new("A", strategy)).unwrap();
        assert_eq!(names(&options), vec![vec!["D".to_string()]]);
        assert_eq!(options[0].salary_remaining, 10_000);
    }
}

#[test]
fn test_five_candidates_yield_ten_ranked_pairs() {
    let mut players = vec![
        Player::new("Out One", Position::Ctr, 500_000).with_scores(&[50, 50, 50]),
        Player::new("Out Two", Position::Ctr, 500_000).with_scores(&[50, 50, 50]),
    ];
    for (i, score) in [40, 45, 50, 55, 60].into_iter().enumerate() {
        players.push(Player::new(format!("Centre {i}"), Position::Ctr, 300_000).with_scores(&[score, score, score]));
    }
    let catalog = PlayerCatalog::new(players).unwrap();

    let request = TradeRequest::new("Out One", StrategyKind::MaximizeBase).with_player2("Out Two");
    let options = run(&catalog, &request).unwrap();

    assert_eq!(options.len(), 10);
    let distinct: HashSet<Vec<String>> = names(&options)
        .into_iter()
        .map(|mut pair| {
            pair.sort();
            pair
        })
        .collect();
    assert_eq!(distinct.len(), 10);
    assert!(options.windows(2).all(|w| w[0].score >= w[1].score));
    assert_eq!(names(&options)[0], vec!["Centre 4".to_string(), "Centre 3".to_string()]);
}

#[test]
fn test_empty_position_set_fails_before_search() {
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeBase).positional_swap([Position::Hlf; 0]);
    assert!(matches!(run(&LEAGUE, &request), Err(TradeError::InvalidPositionSet)));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_options_are_feasible_and_never_self_trade() {
    let requests = [
        TradeRequest::new("Jahrome Hughes", StrategyKind::MaximizeValue)
            .with_player2("Payne Haas")
            .with_lockout(Some(t0())),
        TradeRequest::new("Nicho Hynes", StrategyKind::Hybrid)
            .positional_swap(Position::ALL)
            .with_salary_slack(50_000),
        TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeBase)
            .with_player2("Patrick Carrigan")
            .positional_swap([Position::Hlf, Position::Mid, Position::Ctr]),
    ];

    for request in requests {
        let budget = budget_of(&LEAGUE, &request);
        let outgoing = request.outgoing_names();
        let options = run(&LEAGUE, &request).unwrap();
        assert!(!options.is_empty());

        for option in &options {
            assert!(option.total_price <= budget);
            assert_eq!(option.salary_remaining, budget - option.total_price);
            assert_eq!(option.players.len(), outgoing.len());
            assert!(option.players.iter().all(|p| !outgoing.contains(&p.name())));
            if let Some(at) = request.simulate_date_time {
                assert!(option.players.iter().all(|p| p.player.lockout.map_or(true, |l| at < l)));
            }
            if option.players.len() == 2 {
                assert_ne!(option.players[0].name(), option.players[1].name());
            }
        }
    }
}

#[test]
fn test_like_for_like_pairs_keep_slot_positions() {
    for strategy in STRATEGIES {
        let request = TradeRequest::new("Jahrome Hughes", strategy).with_player2("Payne Haas");
        let options = run(&LEAGUE, &request).unwrap();
        assert!(!options.is_empty());
        for option in &options {
            assert_eq!(option.players[0].position(), Position::Hlf);
            assert_eq!(option.players[1].position(), Position::Mid);
        }
    }
}

#[test]
fn test_positional_swap_draws_from_requested_set() {
    let allowed = [Position::Ctr, Position::Wfb, Position::Hok];
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeValue)
        .with_player2("Patrick Carrigan")
        .positional_swap(allowed);
    let options = run(&LEAGUE, &request).unwrap();
    assert!(!options.is_empty());
    assert!(options
        .iter()
        .flat_map(|o| o.players.iter())
        .all(|p| allowed.contains(&p.position())));
}

#[test]
fn test_repeated_searches_are_identical() {
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::Hybrid)
        .with_player2("Stephen Crichton")
        .positional_swap(Position::ALL);
    let first = run(&LEAGUE, &request).unwrap();
    let second = run(&LEAGUE, &request).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_base_ranking_beats_every_excluded_candidate() {
    let config = EngineConfig {
        page_size: 3,
        ..EngineConfig::default()
    };
    let engine = TradeEngine::new(config).unwrap();
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeBase)
        .positional_swap(Position::ALL)
        .with_salary_slack(100_000);
    let budget = budget_of(&LEAGUE, &request);
    let options = engine.search(&LEAGUE, &request, &SearchDeadline::none()).unwrap();
    assert_eq!(options.len(), 3);

    let returned: HashSet<&str> = options.iter().map(|o| o.players[0].name()).collect();
    let worst_returned = options.iter().map(|o| o.players[0].avg_base).min().unwrap();
    let stats = StatsModel::default();
    for player in LEAGUE.players() {
        if player.name == "Nicho Hynes" || player.price > budget || returned.contains(player.name.as_str()) {
            continue;
        }
        assert!(stats.profile(player).avg_base <= worst_returned, "{} outranks a returned option", player.name);
    }
}

#[test]
fn test_equal_scores_fall_back_to_documented_order() {
    let catalog = PlayerCatalog::new(vec![
        Player::new("Out", Position::Edg, 600_000).with_scores(&[50]),
        Player::new("Zed", Position::Edg, 400_000).with_scores(&[50]),
        Player::new("Amos", Position::Edg, 400_000).with_scores(&[50]),
        Player::new("Cheaper", Position::Edg, 350_000).with_scores(&[50]),
    ])
    .unwrap();
    let options = run(&catalog, &TradeRequest::new("Out", StrategyKind::MaximizeBase)).unwrap();
    assert_eq!(
        names(&options),
        vec![
            vec!["Cheaper".to_string()],
            vec!["Amos".to_string()],
            vec!["Zed".to_string()],
        ]
    );
}

#[test]
fn test_team_list_restriction_applies() {
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeBase)
        .positional_swap(Position::ALL)
        .with_salary_slack(200_000)
        .restricted_to_team_list();
    let options = run(&LEAGUE, &request).unwrap();
    let team_list = LEAGUE.team_list().unwrap();
    assert!(!options.is_empty());
    assert!(options.iter().all(|o| team_list.contains(o.players[0].name())));
}

#[test]
fn test_large_pools_are_refused_for_pairs() {
    let config = EngineConfig {
        max_pair_pool: 4,
        ..EngineConfig::default()
    };
    let engine = TradeEngine::new(config).unwrap();
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeValue)
        .with_player2("Payne Haas")
        .positional_swap(Position::ALL);
    let err = engine.search(&LEAGUE, &request, &SearchDeadline::none()).unwrap_err();
    assert!(matches!(err, TradeError::CandidatePoolTooLarge { limit: 4, .. }));
}

#[test]
fn test_exclusive_options_share_no_players() {
    let config = EngineConfig {
        exclusive_options: true,
        ..EngineConfig::default()
    };
    let engine = TradeEngine::new(config).unwrap();
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeValue)
        .with_player2("Payne Haas")
        .positional_swap(Position::ALL);
    let options = engine.search(&LEAGUE, &request, &SearchDeadline::none()).unwrap();
    assert!(!options.is_empty());

    let mut seen = HashSet::new();
    for player in options.iter().flat_map(|o| o.players.iter()) {
        assert!(seen.insert(player.name().to_string()), "{} repeated", player.name());
    }
}

#[test]
fn test_unknown_second_player() {
    let request = TradeRequest::new("Nicho Hynes", StrategyKind::MaximizeValue).with_player2("Nobody");
    assert!(matches!(
        run(&LEAGUE, &request),
        Err(TradeError::PlayerNotFound(name)) if name == "Nobody"
    ));
}

#[test]
fn test_salary_slack_admits_dearer_players() {
    let catalog = Arc::new(PlayerCatalog::new(common::league_players()).unwrap());
    let request = TradeRequest::new("Luke Brooks", StrategyKind::MaximizeBase).with_salary_slack(100_000);
    let options = engine().search(&catalog, &request, &SearchDeadline::none()).unwrap();
    // HLF under 500_000 other than Brooks: Cleary (60 avg), Hughes (52), Hynes (50)
    assert_eq!(
        names(&options),
        vec![
            vec!["Nathan Cleary".to_string()],
            vec!["Jahrome Hughes".to_string()],
            vec!["Nicho Hynes".to_string()],
        ]
    );
}
