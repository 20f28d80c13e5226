//! Per-team betting context: point spread and game total.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::player::Team;

/// Spread and total for one team's game. A negative spread is a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOdds {
    pub spread: Decimal,
    pub total: Decimal,
}

/// One game line as published by a sportsbook, from the home team's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameLine {
    pub home_team: String,
    pub away_team: String,
    pub home_spread: Decimal,
    pub total: Decimal,
}

/// Matchup context keyed by team abbreviation.
///
/// Teams without an entry get a neutral multiplier downstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupContext {
    by_team: HashMap<Team, TeamOdds>,
}

impl MatchupContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, team: Team, odds: TeamOdds) {
        self.by_team.insert(team, odds);
    }

    #[must_use]
    pub fn get(&self, team: &Team) -> Option<&TeamOdds> {
        self.by_team.get(team)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_team.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }

    /// Build context from game lines.
    ///
    /// Each line contributes to both teams (the away side gets the negated
    /// spread). Full team names are mapped to abbreviations; names that are
    /// neither a known franchise nor an abbreviation are skipped. When a team
    /// appears in several lines their spreads and totals are averaged.
    pub fn from_games(lines: &[GameLine]) -> Self {
        let mut sums: HashMap<Team, (Decimal, Decimal, u32)> = HashMap::new();
        for line in lines {
            let sides = [
                (&line.home_team, line.home_spread),
                (&line.away_team, -line.home_spread),
            ];
            for (name, spread) in sides {
                let Some(team) = team_from_name(name) else {
                    tracing::debug!(team = %name, "skipping unrecognized team in game line");
                    continue;
                };
                let entry = sums.entry(team).or_insert((Decimal::ZERO, Decimal::ZERO, 0));
                entry.0 += spread;
                entry.1 += line.total;
                entry.2 += 1;
            }
        }

        let by_team = sums
            .into_iter()
            .map(|(team, (spread, total, n))| {
                let n = Decimal::from(n);
                (
                    team,
                    TeamOdds {
                        spread: spread / n,
                        total: total / n,
                    },
                )
            })
            .collect();
        Self { by_team }
    }
}

const FRANCHISES: [(&str, &str); 32] = [
    ("New England Patriots", "NE"),
    ("Buffalo Bills", "BUF"),
    ("Miami Dolphins", "MIA"),
    ("New York Jets", "NYJ"),
    ("Baltimore Ravens", "BAL"),
    ("Cincinnati Bengals", "CIN"),
    ("Pittsburgh Steelers", "PIT"),
    ("Cleveland Browns", "CLE"),
    ("Kansas City Chiefs", "KC"),
    ("Los Angeles Chargers", "LAC"),
    ("Las Vegas Raiders", "LV"),
    ("Denver Broncos", "DEN"),
    ("Dallas Cowboys", "DAL"),
    ("Philadelphia Eagles", "PHI"),
    ("New York Giants", "NYG"),
    ("Washington Commanders", "WAS"),
    ("San Francisco 49ers", "SF"),
    ("Seattle Seahawks", "SEA"),
    ("Los Angeles Rams", "LAR"),
    ("Arizona Cardinals", "ARI"),
    ("Green Bay Packers", "GB"),
    ("Minnesota Vikings", "MIN"),
    ("Chicago Bears", "CHI"),
    ("Detroit Lions", "DET"),
    ("Tampa Bay Buccaneers", "TB"),
    ("New Orleans Saints", "NO"),
    ("Atlanta Falcons", "ATL"),
    ("Carolina Panthers", "CAR"),
    ("Jacksonville Jaguars", "JAX"),
    ("Tennessee Titans", "TEN"),
    ("Houston Texans", "HOU"),
    ("Indianapolis Colts", "IND"),
];

/// Map a franchise name or abbreviation to a [`Team`].
#[must_use]
pub fn team_from_name(name: &str) -> Option<Team> {
    let trimmed = name.trim();
    if let Some((_, abbr)) = FRANCHISES
        .iter()
        .find(|(full, _)| full.eq_ignore_ascii_case(trimmed))
    {
        return Some(Team::new(abbr));
    }
    FRANCHISES
        .iter()
        .find(|(_, abbr)| abbr.eq_ignore_ascii_case(trimmed))
        .map(|(_, abbr)| Team::new(abbr))
}
