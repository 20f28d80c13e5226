//! End-to-end: CSV sources through resolution, adjustment and batching.

use std::sync::Arc;

use lineforge::adapter::outbound::csv::{read_odds, read_projections, read_salaries};
use lineforge::adapter::outbound::solver::HiGHSSolver;
use lineforge::application::{ManualOverrides, Pipeline, Slate};
use lineforge::config::{Config, ScoreMode};
use lineforge::domain::{
    BatchEnd, MatchupContext, Platform, Position, ResolvedPlayer, ScoringRules, Team,
};
use lineforge::error::DataSource;
use lineforge::testkit::fixtures::{odds_csv, projection_csv, salary_csv};
use lineforge::testkit::pool::{slate, SLATE_TEAMS};
use rust_decimal_macros::dec;

fn load(players: &[ResolvedPlayer], with_odds: bool) -> Slate {
    let priced = read_salaries(salary_csv(players).as_bytes()).unwrap().records;
    let projected = read_projections(
        projection_csv(players).as_bytes(),
        DataSource::PrimaryProjections,
        &ScoringRules::draftkings(),
    )
    .unwrap()
    .records;
    let context = if with_odds {
        MatchupContext::from_games(&read_odds(odds_csv(&SLATE_TEAMS).as_bytes()).unwrap().records)
    } else {
        MatchupContext::new()
    };
    Slate {
        platform: Platform::DraftKings,
        priced,
        projected,
        overrides: ManualOverrides::new(),
        context,
    }
}

fn pipeline(config: Config) -> Pipeline {
    Pipeline::new(config, Arc::new(HiGHSSolver::new()))
}

fn find<'a>(pool: &'a [ResolvedPlayer], team: &str, position: Position) -> &'a ResolvedPlayer {
    pool.iter()
        .find(|p| p.team == Team::new(team) && p.position == position)
        .expect("player on slate")
}

#[test]
fn every_player_resolves_exactly() {
    let players = slate(16);
    let slate = load(&players, false);
    let resolution = pipeline(Config::default()).resolve(&slate);
    assert_eq!(resolution.resolved.len(), players.len());
    assert!(resolution.unresolved.is_empty());
}

#[test]
fn game_lines_move_multipliers() {
    let slate = load(&slate(16), true);
    let p = pipeline(Config::default());
    let pool = p.score(&p.resolve(&slate), &slate);
    let players = pool.players();

    // ARI hosts ATL: ARI favored by 3, total 47.5.
    assert_eq!(find(players, "ARI", Position::RunningBack).multiplier, dec!(1.05));
    assert_eq!(find(players, "ARI", Position::WideReceiver).multiplier, dec!(1.05));
    assert_eq!(find(players, "ATL", Position::WideReceiver).multiplier, dec!(1.10));
    assert_eq!(find(players, "ATL", Position::RunningBack).multiplier, dec!(1));
    assert_eq!(find(players, "ARI", Position::Defense).multiplier, dec!(0.975));
}

#[test]
fn ceiling_mode_scales_every_score() {
    let slate = load(&slate(4), false);
    let mut config = Config::default();
    config.adjuster.mode = ScoreMode::Ceiling;
    let p = pipeline(config);
    let pool = p.score(&p.resolve(&slate), &slate);
    assert!(pool
        .iter()
        .all(|player| player.final_score == (player.projection * dec!(1.1)).round_dp(4)));
}

#[test]
fn seeded_variance_is_reproducible() {
    let slate = load(&slate(16), false);
    let mut config = Config::default();
    config.adjuster.variance_pct = dec!(10);
    config.adjuster.seed = Some(17);
    config.batch.count = 2;

    let first = pipeline(config.clone()).run(&slate).unwrap();
    let second = pipeline(config).run(&slate).unwrap();
    assert_eq!(first.batch.lineups, second.batch.lineups);
}

#[test]
fn full_run_reports_counts() {
    let players = slate(16);
    let slate = load(&players, true);
    let mut config = Config::default();
    config.batch.count = 4;
    config.batch.min_uniqueness = 2;
    config.batch.max_exposure_pct = Some(75);
    let report = pipeline(config).run(&slate).unwrap();

    assert_eq!(report.salary_cap, 50_000);
    assert_eq!(report.resolved, players.len());
    assert_eq!(report.pool.size, players.len());
    assert_eq!(report.batch.len(), 4);
    assert_eq!(report.batch.end, BatchEnd::Completed);
    assert!(report.batch.usage.values().all(|used| *used <= 3));
}
