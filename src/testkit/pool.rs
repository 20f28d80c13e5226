//! Builders for scored players and pools.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{NormalizedName, PlayerId, Position, ResolvedPlayer, Team};

/// A scored player with a neutral multiplier.
///
/// `score` is a decimal literal used for both projection and final score.
///
/// # Panics
///
/// Panics if `score` is not a valid decimal.
pub fn player(
    id: usize,
    name: &str,
    position: Position,
    team: &str,
    salary: u32,
    score: &str,
) -> ResolvedPlayer {
    let score = Decimal::from_str(score).expect("valid decimal score");
    let normalized = NormalizedName::new(name);
    ResolvedPlayer {
        id: PlayerId::new(id),
        name: name.to_string(),
        normalized: normalized.clone(),
        position,
        team: Team::new(team),
        salary,
        matched: normalized,
        projection: score,
        multiplier: Decimal::ONE,
        final_score: score,
    }
}

/// Exactly one legal lineup: QB, 2 RB, 4 WR, TE, DST with ids
/// `base..base + 9`, every player at 5000 salary and 10 points.
///
/// The QB and the first WR play for `KC`.
pub fn standard_nine(base: usize) -> Vec<ResolvedPlayer> {
    let layout = [
        ("Quinn Passer", Position::Quarterback, "KC"),
        ("Rory Runner", Position::RunningBack, "BUF"),
        ("Ray Rusher", Position::RunningBack, "DAL"),
        ("Wade Wideout", Position::WideReceiver, "KC"),
        ("Will Catcher", Position::WideReceiver, "MIA"),
        ("Walt Flanker", Position::WideReceiver, "SF"),
        ("Wes Slot", Position::WideReceiver, "DET"),
        ("Ted Tightend", Position::TightEnd, "PHI"),
        ("Guard Dogs", Position::Defense, "BAL"),
    ];
    layout
        .iter()
        .enumerate()
        .map(|(i, (name, position, team))| player(base + i, name, *position, team, 5000, "10"))
        .collect()
}

/// Team abbreviations used by [`slate`].
pub const SLATE_TEAMS: [&str; 16] = [
    "ARI", "ATL", "BAL", "BUF", "CAR", "CHI", "CIN", "CLE", "DAL", "DEN", "DET", "GB", "HOU",
    "IND", "JAX", "KC",
];

/// Per-team depth chart used by [`slate`]: position and how many of it.
const DEPTH: [(Position, usize); 5] = [
    (Position::Quarterback, 2),
    (Position::RunningBack, 3),
    (Position::WideReceiver, 5),
    (Position::TightEnd, 2),
    (Position::Defense, 1),
];

const DEPTH_TAGS: [&str; 5] = ["Alpha", "Bravo", "Charlie", "Delta", "Echo"];

/// A deterministic multi-team slate: 13 players per team.
///
/// Salaries and scores vary by team and depth so the optimum is unique-ish
/// and the salary cap binds. Names are `"{TEAM} {POS} {tag}"` with a
/// letter tag per depth slot, since normalization drops digits.
pub fn slate(teams: usize) -> Vec<ResolvedPlayer> {
    let mut players = Vec::new();
    for (t, team) in SLATE_TEAMS.iter().cycle().take(teams).enumerate() {
        for (position, depth) in DEPTH {
            for d in 0..depth {
                let id = players.len();
                let (salary, score) = price(position, d, t);
                let name = format!("{team} {} {}", position.code(), DEPTH_TAGS[d]);
                players.push(player(id, &name, position, team, salary, &score));
            }
        }
    }
    players
}

fn price(position: Position, depth: usize, team: usize) -> (u32, String) {
    let (top_salary, top_points) = match position {
        Position::Quarterback => (7600, 22),
        Position::RunningBack => (8000, 19),
        Position::WideReceiver => (8200, 18),
        Position::TightEnd => (6000, 12),
        Position::Defense => (3400, 8),
    };
    let t = team as u32;
    let d = depth as u32;
    let salary = top_salary - 900 * d - 100 * (t % 7);
    let points = top_points - 3 * d - (t % 5);
    let tenths = (t * 3 + d * 7) % 10;
    (salary.max(2500), format!("{}.{tenths}", points.max(1)))
}
