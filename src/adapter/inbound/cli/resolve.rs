//! Handler for the `resolve` command.
//!
//! Reports how salary entries matched to projections. With `-i`, walks the
//! highest-salaried unresolved players and saves the chosen matches to the
//! overrides file.

use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ResolveArgs;
use crate::adapter::inbound::cli::{output, slate};
use crate::adapter::outbound::csv::save_overrides;
use crate::application::{IdentityResolver, ManualOverrides, MatchSource, Resolution, Slate};
use crate::domain::{Position, PricedPlayer};
use crate::error::{ConfigError, Result};

/// Candidates offered per unresolved player.
const SUGGESTIONS: usize = 5;

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Pos")]
    position: Position,
    #[tabled(rename = "Salary file")]
    name: String,
    #[tabled(rename = "Projection")]
    matched: String,
    #[tabled(rename = "Score")]
    score: u8,
    #[tabled(rename = "Via")]
    source: &'static str,
}

#[derive(Tabled)]
struct UnresolvedRow {
    #[tabled(rename = "Pos")]
    position: Position,
    #[tabled(rename = "Player")]
    name: String,
    #[tabled(rename = "Team")]
    team: String,
    #[tabled(rename = "Salary")]
    salary: u32,
}

/// Execute the resolve command.
pub fn execute(args: &ResolveArgs) -> Result<()> {
    if args.interactive && output::is_json() {
        return Err(ConfigError::InvalidValue {
            field: "interactive",
            reason: "cannot prompt in --json mode".to_string(),
        }
        .into());
    }
    if args.interactive && args.sources.overrides.is_none() {
        return Err(ConfigError::MissingField { field: "overrides" }.into());
    }

    let mut config = slate::load_config(args.sources.config.as_deref())?;
    if output::is_json() {
        config.logging.format = "json".to_string();
    }
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    let (slate, _) = slate::load_slate(&args.sources, &config, None)?;

    let resolver = IdentityResolver::new(config.resolver);
    let resolution = resolver.resolve(&slate.priced, &slate.projected, &slate.overrides);

    if output::is_json() {
        output::json_output(json!({
            "command": "resolve",
            "resolved": resolution.resolved.len(),
            "links": resolution.links.iter().map(|(id, link)| json!({
                "id": id,
                "projected": link.projected,
                "position": link.position,
                "score": link.score,
                "source": link.source,
            })).collect::<Vec<_>>(),
            "unresolved": resolution.unresolved,
        }));
        return Ok(());
    }

    print_summary(&resolution, args.limit);
    if !args.interactive || resolution.unresolved.is_empty() {
        if !resolution.unresolved.is_empty() {
            output::hint(&format!(
                "run {} to pick matches by hand",
                output::highlight("lineforge resolve -i --overrides <file>")
            ));
        }
        return Ok(());
    }

    let mut overrides = slate.overrides.clone();
    let added = review(&resolver, &resolution, &slate, &mut overrides, args.limit)?;
    if added == 0 {
        output::note("no overrides added");
        return Ok(());
    }

    if let Some(path) = &args.sources.overrides {
        save_overrides(path, &overrides)?;
        output::success(&format!("Saved {added} new overrides"));
        output::field("Path", path.display());
    }

    let again = resolver.resolve_again(&resolution, &slate.priced, &slate.projected, &overrides);
    output::section("After Review");
    output::field("Matched", again.resolved.len());
    output::field("Unresolved", again.unresolved.len());
    Ok(())
}

fn print_summary(resolution: &Resolution, limit: usize) {
    output::section("Resolution");
    output::field("Matched", resolution.resolved.len());
    output::field("Unresolved", resolution.unresolved.len());

    let inexact: Vec<MatchRow> = resolution
        .resolved
        .iter()
        .filter_map(|p| {
            let link = resolution.link(p.id)?;
            (link.source != MatchSource::Exact).then(|| MatchRow {
                position: p.position,
                name: p.name.clone(),
                matched: link.projected.to_string(),
                score: link.score,
                source: source_label(link.source),
            })
        })
        .collect();
    if !inexact.is_empty() && (output::verbosity() > 0 || inexact.len() <= limit) {
        output::section("Inexact Matches");
        output::lines(&Table::new(inexact).to_string());
    }

    let unresolved = by_salary(&resolution.unresolved, limit);
    if !unresolved.is_empty() {
        output::section("Unresolved");
        let rows: Vec<UnresolvedRow> = unresolved
            .iter()
            .map(|p| UnresolvedRow {
                position: p.position,
                name: p.name.clone(),
                team: p.team.to_string(),
                salary: p.salary,
            })
            .collect();
        output::lines(&Table::new(rows).to_string());
    }
}

/// Prompt for each unresolved player. Returns how many overrides were added.
fn review(
    resolver: &IdentityResolver,
    resolution: &Resolution,
    slate: &Slate,
    overrides: &mut ManualOverrides,
    limit: usize,
) -> Result<usize> {
    let theme = ColorfulTheme::default();
    let mut added = 0;

    output::section("Review");
    for player in by_salary(&resolution.unresolved, limit) {
        let candidates = resolver.suggestions(player, &slate.projected, SUGGESTIONS);
        if candidates.is_empty() {
            output::note(&format!("{}: no {} projections", player.name, player.position));
            continue;
        }

        let mut items: Vec<String> = candidates
            .iter()
            .map(|(c, score)| format!("{} ({}, {}) {score}%", c.name, c.position, c.team))
            .collect();
        items.push("Skip".to_string());
        items.push("Stop reviewing".to_string());

        let choice = Select::with_theme(&theme)
            .with_prompt(format!(
                "{} {} {} ${}",
                player.position, player.name, player.team, player.salary
            ))
            .items(&items)
            .default(0)
            .interact()?;

        match choice {
            i if i < candidates.len() => {
                let (target, _) = candidates[i];
                overrides.insert(player.normalized.clone(), target.normalized.clone());
                added += 1;
            }
            i if i == candidates.len() => {}
            _ => break,
        }
    }
    Ok(added)
}

/// Highest salaries first, at most `limit`.
fn by_salary(players: &[PricedPlayer], limit: usize) -> Vec<&PricedPlayer> {
    let mut sorted: Vec<&PricedPlayer> = players.iter().collect();
    sorted.sort_by(|a, b| b.salary.cmp(&a.salary).then(a.id.cmp(&b.id)));
    sorted.truncate(limit);
    sorted
}

fn source_label(source: MatchSource) -> &'static str {
    match source {
        MatchSource::Exact => "exact",
        MatchSource::Override => "override",
        MatchSource::Fuzzy => "fuzzy",
        MatchSource::PositionGated => "position",
    }
}
