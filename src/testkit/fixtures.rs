//! CSV text for the loaders, rendered from scored players.

use std::fmt::Write;

use crate::domain::ResolvedPlayer;

/// A DraftKings-style salary export.
pub fn salary_csv(players: &[ResolvedPlayer]) -> String {
    let mut out = String::from("Position,Name,ID,Salary,TeamAbbrev\n");
    for (i, p) in players.iter().enumerate() {
        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            p.position.code(),
            p.name,
            1000 + i,
            p.salary,
            p.team
        );
    }
    out
}

/// A projection file with a points column.
pub fn projection_csv(players: &[ResolvedPlayer]) -> String {
    let mut out = String::from("name,position,team,projection\n");
    for p in players {
        let _ = writeln!(
            out,
            "{},{},{},{}",
            p.name,
            p.position.code(),
            p.team,
            p.projection
        );
    }
    out
}

/// Game lines pairing consecutive teams, home side favored by three.
pub fn odds_csv(teams: &[&str]) -> String {
    let mut out = String::from("home_team,away_team,home_spread,total\n");
    for pair in teams.chunks_exact(2) {
        let _ = writeln!(out, "{},{},-3,47.5", pair[0], pair[1]);
    }
    out
}
