//! The scored player pool handed to the optimizer.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::player::{PlayerId, ResolvedPlayer};
use super::position::Position;

/// Ordered, deduplicated set of players eligible for selection.
///
/// Entries are unique by [`PlayerId`]; the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: Vec<ResolvedPlayer>,
    index: HashMap<PlayerId, usize>,
}

impl PlayerPool {
    /// Build a pool, dropping later duplicates of an identifier.
    pub fn new(players: impl IntoIterator<Item = ResolvedPlayer>) -> Self {
        let mut pool = Self::default();
        for player in players {
            if pool.index.contains_key(&player.id) {
                continue;
            }
            pool.index.insert(player.id, pool.players.len());
            pool.players.push(player);
        }
        pool
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPlayer> {
        self.players.iter()
    }

    #[must_use]
    pub fn players(&self) -> &[ResolvedPlayer] {
        &self.players
    }

    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&ResolvedPlayer> {
        self.index.get(&id).map(|&i| &self.players[i])
    }

    #[must_use]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn has_defense(&self) -> bool {
        self.players.iter().any(|p| p.position == Position::Defense)
    }

    /// A copy of this pool without one player.
    #[must_use]
    pub fn without(&self, id: PlayerId) -> Self {
        Self::new(self.players.iter().filter(|p| p.id != id).cloned())
    }

    /// Position counts and salary range for display.
    #[must_use]
    pub fn summary(&self) -> PoolSummary {
        let mut by_position = BTreeMap::new();
        for player in &self.players {
            *by_position.entry(player.position).or_insert(0) += 1;
        }
        PoolSummary {
            size: self.players.len(),
            by_position,
            min_salary: self.players.iter().map(|p| p.salary).min(),
            max_salary: self.players.iter().map(|p| p.salary).max(),
        }
    }
}

/// Aggregate view of a pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolSummary {
    pub size: usize,
    pub by_position: BTreeMap<Position, usize>,
    pub min_salary: Option<u32>,
    pub max_salary: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::pool::player;

    #[test]
    fn first_duplicate_wins() {
        let a = player(0, "Alpha", Position::Quarterback, "KC", 7000, "20");
        let mut b = player(0, "Beta", Position::Quarterback, "KC", 6000, "10");
        b.name = "Beta".into();
        let pool = PlayerPool::new([a, b]);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(PlayerId::new(0)).unwrap().name, "Alpha");
    }

    #[test]
    fn summary_counts_positions_and_salary_range() {
        let pool = PlayerPool::new([
            player(0, "Qb One", Position::Quarterback, "KC", 7000, "20"),
            player(1, "Rb One", Position::RunningBack, "KC", 5000, "15"),
            player(2, "Rb Two", Position::RunningBack, "BUF", 4500, "12"),
        ]);
        let summary = pool.summary();
        assert_eq!(summary.size, 3);
        assert_eq!(summary.by_position[&Position::RunningBack], 2);
        assert_eq!(summary.min_salary, Some(4500));
        assert_eq!(summary.max_salary, Some(7000));
        assert!(!pool.has_defense());
    }

    #[test]
    fn without_removes_only_that_player() {
        let pool = PlayerPool::new([
            player(0, "Qb One", Position::Quarterback, "KC", 7000, "20"),
            player(1, "Rb One", Position::RunningBack, "KC", 5000, "15"),
        ]);
        let smaller = pool.without(PlayerId::new(0));
        assert_eq!(smaller.len(), 1);
        assert!(!smaller.contains(PlayerId::new(0)));
        assert!(smaller.contains(PlayerId::new(1)));
    }
}
