//! Accepted lineups and the batch that collects them.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Serialize;

use super::player::{PlayerId, ResolvedPlayer, Team};
use super::position::Position;

/// One optimal roster. Immutable once accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lineup {
    players: Vec<ResolvedPlayer>,
}

impl Lineup {
    /// Build a lineup, ordering players by position then salary (highest first).
    pub fn new(mut players: Vec<ResolvedPlayer>) -> Self {
        players.sort_by(|a, b| {
            a.position
                .cmp(&b.position)
                .then(b.salary.cmp(&a.salary))
                .then(a.id.cmp(&b.id))
        });
        Self { players }
    }

    #[must_use]
    pub fn players(&self) -> &[ResolvedPlayer] {
        &self.players
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    /// Number of players shared with another lineup.
    #[must_use]
    pub fn overlap(&self, other: &Lineup) -> usize {
        let mine: BTreeSet<PlayerId> = self.players.iter().map(|p| p.id).collect();
        other.players.iter().filter(|p| mine.contains(&p.id)).count()
    }

    #[must_use]
    pub fn total_salary(&self) -> u32 {
        self.players.iter().map(|p| p.salary).sum()
    }

    #[must_use]
    pub fn total_projection(&self) -> Decimal {
        self.players.iter().map(|p| p.projection).sum()
    }

    #[must_use]
    pub fn total_score(&self) -> Decimal {
        self.players.iter().map(|p| p.final_score).sum()
    }

    pub fn at(&self, position: Position) -> impl Iterator<Item = &ResolvedPlayer> {
        self.players.iter().filter(move |p| p.position == position)
    }
}

/// Why a batch stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BatchEnd {
    /// Every requested lineup was produced.
    Completed,
    /// A solve had no feasible assignment; no further lineups were attempted.
    Infeasible { accepted: usize },
}

/// Lineups accepted in one run, with per-player usage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupBatch {
    pub requested: usize,
    pub lineups: Vec<Lineup>,
    pub usage: BTreeMap<PlayerId, usize>,
    pub end: BatchEnd,
}

impl LineupBatch {
    #[must_use]
    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    /// Number of accepted lineups containing a player.
    #[must_use]
    pub fn usage_of(&self, id: PlayerId) -> usize {
        self.usage.get(&id).copied().unwrap_or(0)
    }

    /// Label used to group export rows, `Lineup_1` for the first lineup.
    #[must_use]
    pub fn label(index: usize) -> String {
        format!("Lineup_{}", index + 1)
    }

    /// Flatten into one record per player per lineup.
    #[must_use]
    pub fn rows(&self) -> Vec<LineupRow> {
        self.lineups
            .iter()
            .enumerate()
            .flat_map(|(i, lineup)| {
                let label = Self::label(i);
                lineup.players().iter().map(move |p| LineupRow {
                    lineup: label.clone(),
                    name: p.name.clone(),
                    position: p.position,
                    team: p.team.clone(),
                    salary: p.salary,
                    projection: p.projection,
                    multiplier: p.multiplier,
                    final_score: p.final_score,
                })
            })
            .collect()
    }
}

/// Flat export record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineupRow {
    pub lineup: String,
    pub name: String,
    pub position: Position,
    pub team: Team,
    pub salary: u32,
    pub projection: Decimal,
    pub multiplier: Decimal,
    pub final_score: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::pool::{player, standard_nine};
    use rust_decimal_macros::dec;

    #[test]
    fn lineup_orders_by_position_then_salary() {
        let lineup = Lineup::new(vec![
            player(0, "Def", Position::Defense, "KC", 3000, "7"),
            player(1, "Cheap Rb", Position::RunningBack, "KC", 4000, "10"),
            player(2, "Qb", Position::Quarterback, "KC", 7000, "20"),
            player(3, "Pricey Rb", Position::RunningBack, "KC", 8000, "18"),
        ]);
        let names: Vec<&str> = lineup.players().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Qb", "Pricey Rb", "Cheap Rb", "Def"]);
    }

    #[test]
    fn totals_sum_players() {
        let lineup = Lineup::new(standard_nine(0));
        assert_eq!(lineup.len(), 9);
        assert_eq!(lineup.total_salary(), 45_000);
        assert_eq!(lineup.total_score(), dec!(90));
        assert_eq!(lineup.total_projection(), dec!(90));
    }

    #[test]
    fn rows_are_grouped_by_label() {
        let first = Lineup::new(standard_nine(0));
        let second = Lineup::new(standard_nine(100));
        let batch = LineupBatch {
            requested: 2,
            usage: BTreeMap::new(),
            lineups: vec![first, second],
            end: BatchEnd::Completed,
        };
        let rows = batch.rows();
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[0].lineup, "Lineup_1");
        assert_eq!(rows[17].lineup, "Lineup_2");
    }

    #[test]
    fn overlap_counts_shared_ids() {
        let a = Lineup::new(standard_nine(0));
        let b = Lineup::new(standard_nine(0));
        let c = Lineup::new(standard_nine(50));
        assert_eq!(a.overlap(&b), 9);
        assert_eq!(a.overlap(&c), 0);
    }
}
