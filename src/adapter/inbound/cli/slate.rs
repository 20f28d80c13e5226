//! Loading configuration and slate inputs for `run` and `resolve`.

use std::path::Path;

use crate::adapter::inbound::cli::command::SourceArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::csv::{
    load_odds, load_overrides, load_projections, load_salaries, select_source, RejectedRow,
    SourceChoice,
};
use crate::application::{ManualOverrides, Slate};
use crate::config::Config;
use crate::domain::{MatchupContext, Platform, ScoringRules};
use crate::error::{DataSource, Result};

/// Load the configuration file, or defaults when none was given.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Platform from the flag, then the config, then the salary file name.
#[must_use]
pub fn platform(args: &SourceArgs, config: &Config) -> Platform {
    args.platform
        .or(config.optimizer.platform)
        .unwrap_or_else(|| Platform::detect(&args.salaries))
}

/// Load every input file, reporting progress as each one lands.
pub fn load_slate(
    args: &SourceArgs,
    config: &Config,
    odds: Option<&Path>,
) -> Result<(Slate, SourceChoice)> {
    let platform = platform(args, config);
    let rules = ScoringRules::for_platform(platform);

    let pb = output::spinner("Loading salaries...");
    let salaries = match load_salaries(&args.salaries) {
        Ok(loaded) => loaded,
        Err(e) => {
            output::spinner_fail(&pb, "Salary file unavailable");
            return Err(e);
        }
    };
    output::spinner_success(
        &pb,
        &format!(
            "Loaded {} {} salaries",
            salaries.records.len(),
            platform
        ),
    );
    report_rejected("salary", &salaries.rejected);

    let pb = output::spinner("Loading projections...");
    let primary = match load_projections(&args.projections, DataSource::PrimaryProjections, &rules)
    {
        Ok(loaded) => loaded,
        Err(e) => {
            output::spinner_fail(&pb, "Projection file unavailable");
            return Err(e);
        }
    };
    report_rejected("projection", &primary.rejected);
    let fallback = match &args.fallback_projections {
        Some(path) => {
            let loaded = load_projections(path, DataSource::FallbackProjections, &rules)?;
            report_rejected("fallback projection", &loaded.rejected);
            Some(loaded.records)
        }
        None => None,
    };
    let (projected, choice) = match select_source(primary.records, fallback) {
        Ok(selected) => selected,
        Err(e) => {
            output::spinner_fail(&pb, "No usable projections");
            return Err(e);
        }
    };
    output::spinner_success(
        &pb,
        &format!("Loaded {} projections ({})", projected.len(), source_label(choice)),
    );

    let overrides = match &args.overrides {
        Some(path) if path.exists() => {
            let overrides = load_overrides(path)?;
            output::field("Overrides", overrides.len());
            overrides
        }
        Some(path) => {
            output::note(&format!("{} not found, starting without overrides", path.display()));
            ManualOverrides::new()
        }
        None => ManualOverrides::new(),
    };

    let context = match odds {
        Some(path) => {
            let pb = output::spinner("Loading game lines...");
            match load_odds(path) {
                Ok(context) => {
                    output::spinner_success(
                        &pb,
                        &format!("Loaded game lines for {} teams", context.len()),
                    );
                    context
                }
                Err(e) => {
                    output::spinner_fail(&pb, "Game lines unavailable");
                    return Err(e);
                }
            }
        }
        None => MatchupContext::new(),
    };

    let slate = Slate {
        platform,
        priced: salaries.records,
        projected,
        overrides,
        context,
    };
    Ok((slate, choice))
}

fn source_label(choice: SourceChoice) -> &'static str {
    match choice {
        SourceChoice::Primary => "primary",
        SourceChoice::Fallback => "fallback",
    }
}

fn report_rejected(kind: &str, rejected: &[RejectedRow]) {
    if rejected.is_empty() {
        return;
    }
    output::warning(&format!("{} {kind} rows skipped", rejected.len()));
    if output::verbosity() > 0 {
        for row in rejected {
            output::note(&format!("line {}: {}", row.line, row.reason));
        }
    }
}
