//! Game lines for matchup context.
//!
//! One row per game line: `home_team,away_team,home_spread,total`. Teams may
//! be abbreviations or full franchise names. Several rows for the same game
//! (one per bookmaker) are averaged when the context is built.

use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use super::{open, Loaded};
use crate::domain::{GameLine, MatchupContext};
use crate::error::{DataSource, Result};

#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(alias = "home", alias = "Home", alias = "HomeTeam")]
    home_team: String,
    #[serde(alias = "away", alias = "Away", alias = "AwayTeam")]
    away_team: String,
    #[serde(alias = "spread", alias = "Spread")]
    home_spread: Decimal,
    #[serde(alias = "over_under", alias = "Total")]
    total: Decimal,
}

/// Read game lines from any reader.
///
/// # Errors
///
/// Fails only when the CSV cannot be read at all.
pub fn read_odds<R: Read>(rdr: R) -> Result<Loaded<GameLine>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut loaded = Loaded::new();
    for result in reader.deserialize::<RawLine>() {
        match result {
            Ok(raw) => loaded.records.push(GameLine {
                home_team: raw.home_team,
                away_team: raw.away_team,
                home_spread: raw.home_spread,
                total: raw.total,
            }),
            Err(e) => {
                let line = e.position().map_or(0, csv::Position::line);
                loaded.reject(line, e.to_string());
            }
        }
    }
    if !loaded.rejected.is_empty() {
        warn!(rejected = loaded.rejected.len(), "game lines skipped");
    }
    Ok(loaded)
}

/// Load game lines from disk and build the matchup context.
///
/// # Errors
///
/// An upstream failure when the file cannot be opened or parsed.
pub fn load_odds(path: &Path) -> Result<MatchupContext> {
    let loaded = read_odds(open(path, DataSource::MatchupOdds)?)?;
    let context = MatchupContext::from_games(&loaded.records);
    info!(
        lines = loaded.records.len(),
        teams = context.len(),
        "loaded matchup context"
    );
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Team;
    use rust_decimal_macros::dec;

    #[test]
    fn builds_context_for_both_sides() {
        let csv = "\
home_team,away_team,home_spread,total
Kansas City Chiefs,Buffalo Bills,-3.5,48.5
Kansas City Chiefs,Buffalo Bills,-2.5,47.5
";
        let loaded = read_odds(csv.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 2);
        let ctx = MatchupContext::from_games(&loaded.records);
        let kc = ctx.get(&Team::new("KC")).unwrap();
        assert_eq!(kc.spread, dec!(-3));
        assert_eq!(kc.total, dec!(48));
        assert_eq!(ctx.get(&Team::new("BUF")).unwrap().spread, dec!(3));
    }

    #[test]
    fn malformed_rows_are_reported() {
        let csv = "home,away,spread,total\nKC,BUF,abc,48\nDAL,PHI,3,44\n";
        let loaded = read_odds(csv.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.rejected.len(), 1);
        assert_eq!(loaded.rejected[0].line, 2);
    }
}
