//! Projection sources.
//!
//! A projection file needs a name (`name`, `player` or `full_name`) and a
//! position (`position`/`pos`). Points come from a `projection`, `fpts` or
//! `points` column when present; otherwise stat columns are scored with the
//! platform's [`ScoringRules`]. The team column is optional.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{field, line_of, open, reader, Headers, Loaded};
use crate::domain::{Position, ProjectedPlayer, ScoringRules, StatLine};
use crate::error::{DataSource, Error, Result};

const POINT_COLUMNS: [&str; 5] = ["projection", "fpts", "points", "proj", "fantasy_points"];

/// Where the points of a projection file come from.
enum PointsColumn {
    Direct(usize),
    Stats(StatColumns),
}

#[derive(Default)]
struct StatColumns {
    pass_yds: Option<usize>,
    pass_td: Option<usize>,
    pass_int: Option<usize>,
    rush_yds: Option<usize>,
    rush_td: Option<usize>,
    rec: Option<usize>,
    rec_yds: Option<usize>,
    rec_td: Option<usize>,
    fum_lost: Option<usize>,
}

impl StatColumns {
    fn detect(headers: &Headers) -> Option<Self> {
        let cols = Self {
            pass_yds: headers.find(&["pass_yds", "passing_yds", "pass yds"]),
            pass_td: headers.find(&["pass_td", "passing_td", "pass td"]),
            pass_int: headers.find(&["pass_int", "int", "interceptions"]),
            rush_yds: headers.find(&["rush_yds", "rushing_yds", "rush yds"]),
            rush_td: headers.find(&["rush_td", "rushing_td", "rush td"]),
            rec: headers.find(&["rec", "receptions"]),
            rec_yds: headers.find(&["rec_yds", "receiving_yds", "rec yds"]),
            rec_td: headers.find(&["rec_td", "receiving_td", "rec td"]),
            fum_lost: headers.find(&["fum_lost", "fl", "fumbles_lost"]),
        };
        let any = [
            cols.pass_yds,
            cols.pass_td,
            cols.pass_int,
            cols.rush_yds,
            cols.rush_td,
            cols.rec,
            cols.rec_yds,
            cols.rec_td,
            cols.fum_lost,
        ]
        .iter()
        .any(Option::is_some);
        any.then_some(cols)
    }

    fn read(&self, record: &csv::StringRecord) -> std::result::Result<StatLine, String> {
        let get = |col: Option<usize>| -> std::result::Result<Decimal, String> {
            match col.map(|i| field(record, i)) {
                None | Some("") => Ok(Decimal::ZERO),
                Some(raw) => parse_decimal(raw).ok_or_else(|| format!("unreadable stat '{raw}'")),
            }
        };
        Ok(StatLine {
            pass_yds: get(self.pass_yds)?,
            pass_td: get(self.pass_td)?,
            pass_int: get(self.pass_int)?,
            rush_yds: get(self.rush_yds)?,
            rush_td: get(self.rush_td)?,
            rec: get(self.rec)?,
            rec_yds: get(self.rec_yds)?,
            rec_td: get(self.rec_td)?,
            fum_lost: get(self.fum_lost)?,
        })
    }
}

/// Load projections from any reader.
///
/// # Errors
///
/// Fails when the name, position or points columns are missing, or the CSV
/// is malformed. Invalid rows are returned in [`Loaded::rejected`].
pub fn read_projections<R: Read>(
    rdr: R,
    source: DataSource,
    rules: &ScoringRules,
) -> Result<Loaded<ProjectedPlayer>> {
    let mut reader = reader(rdr);
    let headers = Headers::new(reader.headers()?);

    let name_col = headers.require(source, &["name", "player", "full_name"])?;
    let pos_col = headers.require(source, &["position", "pos"])?;
    let team_col = headers.find(&["team", "team_abbr", "teamabbrev"]);
    let points = match headers.find(&POINT_COLUMNS) {
        Some(i) => PointsColumn::Direct(i),
        None => StatColumns::detect(&headers)
            .map(PointsColumn::Stats)
            .ok_or_else(|| Error::upstream(source, "no projection or stat columns"))?,
    };

    let mut loaded = Loaded::new();
    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);

        let position = match Position::from_str(field(&record, pos_col)) {
            Ok(position) => position,
            Err(e) => {
                loaded.reject(line, e.to_string());
                continue;
            }
        };
        let projection = match &points {
            PointsColumn::Direct(i) => parse_decimal(field(&record, *i))
                .ok_or_else(|| format!("unreadable projection '{}'", field(&record, *i))),
            PointsColumn::Stats(cols) => cols.read(&record).map(|line| rules.score(&line)),
        };
        let projection = match projection {
            Ok(p) => p,
            Err(reason) => {
                loaded.reject(line, reason);
                continue;
            }
        };
        let team = team_col.map(|i| field(&record, i)).unwrap_or_default();
        match ProjectedPlayer::try_new(field(&record, name_col), position, team, projection) {
            Ok(player) => loaded.records.push(player),
            Err(e) => loaded.reject(line, e.to_string()),
        }
    }

    if !loaded.rejected.is_empty() {
        warn!(source = %source, rejected = loaded.rejected.len(), "projection rows skipped");
    }
    info!(source = %source, players = loaded.records.len(), "loaded projections");
    Ok(loaded)
}

/// Load projections from disk.
///
/// # Errors
///
/// See [`read_projections`]; an unreadable file is an upstream failure.
pub fn load_projections(
    path: &Path,
    source: DataSource,
    rules: &ScoringRules,
) -> Result<Loaded<ProjectedPlayer>> {
    read_projections(open(path, source)?, source, rules)
}

/// Which projection source fed the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceChoice {
    Primary,
    Fallback,
}

/// Pick the primary projections unless they are empty or total zero points.
///
/// # Errors
///
/// An upstream failure when the primary is unusable and there is no usable
/// fallback.
pub fn select_source(
    primary: Vec<ProjectedPlayer>,
    fallback: Option<Vec<ProjectedPlayer>>,
) -> Result<(Vec<ProjectedPlayer>, SourceChoice)> {
    if usable(&primary) {
        return Ok((primary, SourceChoice::Primary));
    }
    warn!(
        players = primary.len(),
        "primary projections empty or all zero, trying fallback"
    );
    match fallback {
        Some(fallback) if usable(&fallback) => {
            info!(players = fallback.len(), "using fallback projections");
            Ok((fallback, SourceChoice::Fallback))
        }
        Some(_) => Err(Error::upstream(
            DataSource::FallbackProjections,
            "no usable projections",
        )),
        None => Err(Error::upstream(
            DataSource::PrimaryProjections,
            "no usable projections and no fallback configured",
        )),
    }
}

fn usable(players: &[ProjectedPlayer]) -> bool {
    !players.is_empty() && players.iter().map(|p| p.projection).sum::<Decimal>() > Decimal::ZERO
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim())
        .or_else(|_| Decimal::from_scientific(raw.trim()))
        .ok()
}
