//! Handler for the `run` command.

use std::sync::Arc;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{output, slate};
use crate::adapter::outbound::csv::{save_batch_csv, save_batch_json, BatchExport};
use crate::adapter::outbound::solver::HiGHSSolver;
use crate::application::{is_relaxed, Pipeline, RunReport, Step};
use crate::config::Config;
use crate::domain::{BatchEnd, Lineup, LineupBatch, PlayerPool, Position};
use crate::error::Result;

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Pos")]
    position: Position,
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Salary")]
    salary: u32,
    #[tabled(rename = "Proj")]
    projection: String,
    #[tabled(rename = "Mult")]
    multiplier: String,
    #[tabled(rename = "Score")]
    score: String,
}

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Pos")]
    position: Position,
    #[tabled(rename = "Players")]
    players: usize,
}

/// Execute the run command.
pub fn execute(args: &RunArgs) -> Result<()> {
    let mut config = slate::load_config(args.sources.config.as_deref())?;
    apply_overrides(&mut config, args, output::is_json());
    config.validate()?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    let (slate, choice) = slate::load_slate(&args.sources, &config, args.odds.as_deref())?;

    let pipeline = Pipeline::new(config, Arc::new(HiGHSSolver::new()));
    let config = pipeline.config();

    let resolution = pipeline.resolve(&slate);
    output::section("Resolution");
    output::field("Matched", resolution.resolved.len());
    output::field("Unresolved", resolution.unresolved.len());
    if resolution.resolved.len() < config.optimizer.small_pool_threshold {
        output::warning(&format!(
            "only {} players matched; check name overrides or run {}",
            resolution.resolved.len(),
            output::highlight("lineforge resolve -i")
        ));
    }

    let pool = pipeline.score(&resolution, &slate);
    print_pool(&pool);
    let constraints = pipeline.constraints(&pool, slate.platform);
    let relaxed = is_relaxed(&constraints);
    if relaxed {
        output::warning("receiver minimum relaxed to 2 for this pool");
    }
    let salary_cap = constraints.salary_cap;

    let request = pipeline.batch_request();
    let mut run = pipeline.driver().start(&pool, constraints, request)?;
    let pb = output::progress(request.count as u64, "Optimizing lineups");
    loop {
        match run.step() {
            Ok(Step::Accepted(_)) => pb.inc(1),
            Ok(Step::Finished(_)) => break,
            Err(e) => {
                output::spinner_fail(&pb, "Solver failed");
                return Err(e);
            }
        }
    }
    let batch = run.finish();
    output::spinner_success(
        &pb,
        &format!("Generated {} of {} lineups", batch.len(), batch.requested),
    );
    if let BatchEnd::Infeasible { accepted } = batch.end {
        output::warning(&format!(
            "stopped after {accepted} lineups: no further lineup satisfies the rules"
        ));
    }

    if let Some(path) = &args.output {
        save_batch_csv(path, &batch)?;
        output::field("CSV", path.display());
    }
    if let Some(path) = &args.json_output {
        save_batch_json(path, &BatchExport::new(slate.platform, salary_cap, &batch))?;
        output::field("JSON", path.display());
    }

    if output::is_json() {
        let report = RunReport {
            platform: slate.platform,
            salary_cap,
            resolved: resolution.resolved.len(),
            unresolved: resolution.unresolved.len(),
            pool: pool.summary(),
            relaxed,
            batch,
        };
        output::json_output(json!({
            "command": "run",
            "projection_source": choice,
            "report": report,
        }));
        return Ok(());
    }

    print_batch(&batch);
    Ok(())
}

/// Fold command-line flags into the loaded configuration.
fn apply_overrides(config: &mut Config, args: &RunArgs, force_json_logs: bool) {
    if let Some(count) = args.count {
        config.batch.count = count;
    }
    if let Some(min_uniqueness) = args.min_uniqueness {
        config.batch.min_uniqueness = min_uniqueness;
    }
    if let Some(pct) = args.max_exposure {
        config.batch.max_exposure_pct = Some(pct);
    }
    if args.stack {
        config.optimizer.stack_qb_wr = true;
    }
    if let Some(platform) = args.sources.platform {
        config.optimizer.platform = Some(platform);
    }
    if let Some(mode) = args.mode {
        config.adjuster.mode = mode;
    }
    if let Some(variance) = args.variance {
        config.adjuster.variance_pct = variance;
    }
    if let Some(seed) = args.seed {
        config.adjuster.seed = Some(seed);
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs || force_json_logs {
        config.logging.format = "json".to_string();
    }
}

fn print_pool(pool: &PlayerPool) {
    let summary = pool.summary();
    output::section("Player Pool");
    output::field("Eligible", summary.size);
    if let (Some(min), Some(max)) = (summary.min_salary, summary.max_salary) {
        output::field("Salary range", format!("${min} - ${max}"));
    }
    if output::verbosity() > 0 {
        let rows: Vec<PositionRow> = summary
            .by_position
            .iter()
            .map(|(position, players)| PositionRow {
                position: *position,
                players: *players,
            })
            .collect();
        output::lines(&Table::new(rows).to_string());
    }
}

fn print_batch(batch: &LineupBatch) {
    for (i, lineup) in batch.lineups.iter().enumerate() {
        output::section(&LineupBatch::label(i).replace('_', " "));
        output::lines(&Table::new(lineup_rows(lineup)).to_string());
        output::field("Salary", format!("${}", lineup.total_salary()));
        output::field("Projection", lineup.total_projection());
        output::field("Score", output::highlight(lineup.total_score()));
    }
}

fn lineup_rows(lineup: &Lineup) -> Vec<PlayerRow> {
    lineup
        .players()
        .iter()
        .map(|p| PlayerRow {
            position: p.position,
            name: p.name.clone(),
            team: p.team.to_string(),
            salary: p.salary,
            projection: p.projection.round_dp(2).to_string(),
            multiplier: p.multiplier.round_dp(3).to_string(),
            score: p.final_score.round_dp(2).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::{Cli, Commands};
    use crate::config::ScoreMode;
    use crate::testkit::pool::standard_nine;
    use clap::Parser;
    use rust_decimal_macros::dec;

    fn run_args(extra: &[&str]) -> RunArgs {
        let mut argv = vec![
            "lineforge",
            "run",
            "--salaries",
            "dk.csv",
            "--projections",
            "p.csv",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => *args,
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn flags_override_config() {
        let args = run_args(&[
            "-n",
            "10",
            "--max-exposure",
            "50",
            "--mode",
            "floor",
            "--variance",
            "5",
            "--seed",
            "9",
            "--stack",
            "--log-level",
            "debug",
        ]);
        let mut config = Config::default();
        apply_overrides(&mut config, &args, false);
        assert_eq!(config.batch.count, 10);
        assert_eq!(config.batch.max_exposure_pct, Some(50));
        assert_eq!(config.adjuster.mode, ScoreMode::Floor);
        assert_eq!(config.adjuster.variance_pct, dec!(5));
        assert_eq!(config.adjuster.seed, Some(9));
        assert!(config.optimizer.stack_qb_wr);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn json_output_forces_json_logs() {
        let mut config = Config::default();
        apply_overrides(&mut config, &run_args(&[]), true);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.batch, Config::default().batch);
    }

    #[test]
    fn lineup_rows_follow_roster_order() {
        let lineup = Lineup::new(standard_nine(0));
        let rows = lineup_rows(&lineup);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0].position, Position::Quarterback);
        assert_eq!(rows[8].position, Position::Defense);
        assert_eq!(rows[0].score, "10");
    }
}
