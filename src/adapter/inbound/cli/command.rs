//! Command-line interface definitions.
//!
//! Defines the `lineforge` CLI using `clap`: the full lineup pipeline, a
//! resolution-only pass for reviewing name matches, and configuration
//! utilities.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::ScoreMode;
use crate::domain::Platform;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "lineforge.toml";

/// DFS lineup optimizer
#[derive(Parser, Debug)]
#[command(name = "lineforge")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve players, score the pool and generate a batch of lineups
    Run(Box<RunArgs>),

    /// Match salary entries to projections and report what stays unresolved
    Resolve(ResolveArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `lineforge config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file.
    Validate(ConfigPathArg),
}

#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Input files shared by `run` and `resolve`.
#[derive(Parser, Debug)]
pub struct SourceArgs {
    /// Configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Salary export from the contest platform.
    #[arg(long)]
    pub salaries: PathBuf,

    /// Primary projection file.
    #[arg(long)]
    pub projections: PathBuf,

    /// Projection file used when the primary is empty or all zero.
    #[arg(long)]
    pub fallback_projections: Option<PathBuf>,

    /// Manual name overrides (`dfs_name,projection_name`).
    #[arg(long)]
    pub overrides: Option<PathBuf>,

    /// Contest platform; detected from the salary file name when omitted.
    #[arg(long)]
    pub platform: Option<Platform>,
}

/// Arguments for `lineforge run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Game lines for matchup adjustments.
    #[arg(long)]
    pub odds: Option<PathBuf>,

    /// Number of lineups to generate.
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Minimum players that differ between any two lineups.
    #[arg(long)]
    pub min_uniqueness: Option<usize>,

    /// Maximum share of lineups a player may appear in, in percent.
    #[arg(long)]
    pub max_exposure: Option<u32>,

    /// Require a same-team wide receiver with the quarterback.
    #[arg(long)]
    pub stack: bool,

    /// Scenario to optimize for.
    #[arg(long, value_enum)]
    pub mode: Option<ScoreMode>,

    /// Projection noise standard deviation, in percent.
    #[arg(long)]
    pub variance: Option<Decimal>,

    /// Seed for projection noise.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write lineups as CSV.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the whole batch as JSON.
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Log level (overrides config).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `lineforge resolve`.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Pick matches for unresolved players and save them as overrides.
    #[arg(short, long)]
    pub interactive: bool,

    /// How many unresolved players to review, highest salary first.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const RUN: [&str; 6] = [
        "lineforge",
        "run",
        "--salaries",
        "dk.csv",
        "--projections",
        "proj.csv",
    ];

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::try_parse_from(RUN).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.sources.salaries, PathBuf::from("dk.csv"));
        assert!(args.sources.config.is_none());
        assert!(args.count.is_none());
        assert!(!args.stack);
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_run_overrides() {
        let mut argv = RUN.to_vec();
        argv.extend([
            "-n",
            "20",
            "--min-uniqueness",
            "3",
            "--max-exposure",
            "40",
            "--stack",
            "--mode",
            "ceiling",
            "--variance",
            "7.5",
            "--platform",
            "fd",
        ]);
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.count, Some(20));
        assert_eq!(args.min_uniqueness, Some(3));
        assert_eq!(args.max_exposure, Some(40));
        assert!(args.stack);
        assert_eq!(args.mode, Some(ScoreMode::Ceiling));
        assert_eq!(args.variance, Some(dec!(7.5)));
        assert_eq!(args.sources.platform, Some(Platform::FanDuel));
    }

    #[test]
    fn run_requires_sources() {
        assert!(Cli::try_parse_from(["lineforge", "run"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let mut argv = RUN.to_vec();
        argv.extend(["--json", "-vv"]);
        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_color_never() {
        let mut argv = RUN.to_vec();
        argv.extend(["--color", "never"]);
        let cli = Cli::try_parse_from(argv).unwrap();
        assert!(matches!(cli.color, ColorChoice::Never));
    }

    #[test]
    fn config_validate_default_path() {
        let cli = Cli::try_parse_from(["lineforge", "config", "validate"]).unwrap();
        let Commands::Config(ConfigCommand::Validate(arg)) = cli.command else {
            panic!("expected config validate");
        };
        assert_eq!(arg.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn resolve_interactive_limit() {
        let cli = Cli::try_parse_from([
            "lineforge",
            "resolve",
            "--salaries",
            "a.csv",
            "--projections",
            "b.csv",
            "-i",
            "--limit",
            "10",
        ])
        .unwrap();
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert!(args.interactive);
        assert_eq!(args.limit, 10);
    }
}
