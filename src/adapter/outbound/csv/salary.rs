//! Salary exports from the contest platform.
//!
//! Accepted headers (case-insensitive): a name from `name`, `first name` +
//! `last name` or `nickname`; `position`/`pos`; `teamabbrev`/`team`; and
//! `salary`. Defense rows listed as `D/ST` or `D` become DST and lose a
//! trailing `DST` from their name. Later rows repeating a normalized name are
//! rejected.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::{field, line_of, open, reader, Headers, Loaded};
use crate::domain::{NormalizedName, PlayerId, Position, PricedPlayer};
use crate::error::{DataSource, Error, Result};

enum NameColumns {
    Full(usize),
    Split(usize, usize),
    Nickname(usize),
}

impl NameColumns {
    fn detect(headers: &Headers) -> Option<Self> {
        if let Some(i) = headers.find(&["name"]) {
            return Some(Self::Full(i));
        }
        if let (Some(first), Some(last)) =
            (headers.find(&["first name"]), headers.find(&["last name"]))
        {
            return Some(Self::Split(first, last));
        }
        headers.find(&["nickname"]).map(Self::Nickname)
    }

    fn read(&self, record: &csv::StringRecord) -> String {
        match *self {
            Self::Full(i) | Self::Nickname(i) => field(record, i).to_string(),
            Self::Split(first, last) => format!("{} {}", field(record, first), field(record, last))
                .trim()
                .to_string(),
        }
    }
}

/// Load a salary export from any reader.
///
/// # Errors
///
/// Fails when a required column is missing or the CSV itself is malformed.
/// Invalid rows are returned in [`Loaded::rejected`].
pub fn read_salaries<R: Read>(rdr: R) -> Result<Loaded<PricedPlayer>> {
    let source = DataSource::Pricing;
    let mut reader = reader(rdr);
    let headers = Headers::new(reader.headers()?);

    let name_cols = NameColumns::detect(&headers)
        .ok_or_else(|| Error::upstream(source, "no recognizable player name column"))?;
    let pos_col = headers.require(source, &["position", "pos"])?;
    let team_col = headers.require(source, &["teamabbrev", "team_abbr", "team"])?;
    let salary_col = headers.require(source, &["salary"])?;

    let mut loaded = Loaded::new();
    let mut seen: HashSet<NormalizedName> = HashSet::new();
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
        let mut name = name_cols.read(&record);
        if position == Position::Defense {
            name = strip_defense_suffix(&name);
        }
        let Some(salary) = parse_salary(field(&record, salary_col)) else {
            loaded.reject(line, format!("unreadable salary '{}'", field(&record, salary_col)));
            continue;
        };

        let id = PlayerId::new(loaded.records.len());
        match PricedPlayer::try_new(id, name, position, field(&record, team_col), salary) {
            Ok(player) if !seen.insert(player.normalized.clone()) => {
                loaded.reject(line, format!("duplicate player '{}'", player.name));
            }
            Ok(player) => loaded.records.push(player),
            Err(e) => loaded.reject(line, e.to_string()),
        }
    }

    if !loaded.rejected.is_empty() {
        warn!(rejected = loaded.rejected.len(), "salary rows skipped");
    }
    info!(players = loaded.records.len(), "loaded salaries");
    Ok(loaded)
}

/// Load a salary export from disk.
///
/// # Errors
///
/// See [`read_salaries`]; an unreadable file is an upstream failure.
pub fn load_salaries(path: &Path) -> Result<Loaded<PricedPlayer>> {
    read_salaries(open(path, DataSource::Pricing)?)
}

fn strip_defense_suffix(name: &str) -> String {
    name.strip_suffix("DST")
        .map_or(name, str::trim_end)
        .to_string()
}

/// Salaries are whole dollars, though some exports write `5000.0`.
fn parse_salary(raw: &str) -> Option<i64> {
    let raw = raw.trim_start_matches('$').replace(',', "");
    raw.parse::<i64>()
        .ok()
        .or_else(|| Decimal::from_str(&raw).ok()?.trunc().to_i64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_draftkings_export() {
        let csv = "\
Position,Name + ID,Name,ID,Roster Position,Salary,Game Info,TeamAbbrev,AvgPointsPerGame
QB,Josh Allen (1),Josh Allen,1,QB,8200,BUF@MIA,BUF,24.1
DST,Bills (2),Bills ,2,DST,3200,BUF@MIA,BUF,8.0
";
        let loaded = read_salaries(csv.as_bytes()).unwrap();
        assert!(loaded.rejected.is_empty());
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].salary, 8200);
        assert_eq!(loaded.records[1].position, Position::Defense);
        assert_eq!(loaded.records[1].name, "Bills");
        assert_eq!(loaded.records[1].id, PlayerId::new(1));
    }

    #[test]
    fn reads_fanduel_split_names_and_defense_codes() {
        let csv = "\
Id,Position,First Name,Last Name,Salary,Team
a,RB,Christian,McCaffrey,10000,SF
b,D,Buffalo Bills,DST,4000,BUF
";
        let loaded = read_salaries(csv.as_bytes()).unwrap();
        assert_eq!(loaded.records[0].name, "Christian McCaffrey");
        assert_eq!(loaded.records[1].name, "Buffalo Bills");
        assert_eq!(loaded.records[1].position, Position::Defense);
    }

    #[test]
    fn rejects_bad_rows_and_duplicates() {
        let csv = "\
Name,Position,Team,Salary
Josh Allen,QB,BUF,8200
Josh  Allen,QB,BUF,8100
Mystery,K,BUF,4000
Free Agent,WR,BUF,0
Cheap Guy,WR,BUF,n/a
";
        let loaded = read_salaries(csv.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        let lines: Vec<u64> = loaded.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
    }

    #[test]
    fn missing_salary_column_is_upstream_failure() {
        let csv = "Name,Position,Team\nJosh Allen,QB,BUF\n";
        let err = read_salaries(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn tolerant_salary_formats() {
        assert_eq!(parse_salary("5000"), Some(5000));
        assert_eq!(parse_salary("5000.0"), Some(5000));
        assert_eq!(parse_salary("$5,000"), Some(5000));
        assert_eq!(parse_salary(""), None);
    }
}
