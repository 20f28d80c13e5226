//! Roster construction rules for a single solve.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, ResolvedPlayer};
use super::position::Position;

/// Players in every classic lineup.
pub const ROSTER_SIZE: usize = 9;

/// Inclusive bounds on how many players of a position a lineup holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLimit {
    pub min: usize,
    /// `None` leaves the position bounded only by the roster size.
    pub max: Option<usize>,
}

impl PositionLimit {
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: Some(n) }
    }

    #[must_use]
    pub const fn at_least(n: usize) -> Self {
        Self { min: n, max: None }
    }

    #[must_use]
    pub fn admits(&self, count: usize) -> bool {
        count >= self.min && self.max.map_or(true, |max| count <= max)
    }
}

/// Which set of position minimums to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionProfile {
    /// QB 1, RB ≥ 2, WR ≥ 3, TE ≥ 1, DST 1.
    #[default]
    Standard,
    /// Standard with the WR minimum lowered to 2.
    Relaxed,
    /// Relaxed when the pool is smaller than the configured threshold.
    Auto,
}

impl fmt::Display for PositionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Relaxed => f.write_str("relaxed"),
            Self::Auto => f.write_str("auto"),
        }
    }
}

/// Forces a new lineup to share at most `max_overlap` of `players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiversityCut {
    pub players: Vec<PlayerId>,
    pub max_overlap: usize,
}

impl DiversityCut {
    /// Require at least `min_uniqueness` picks that differ from `players`.
    #[must_use]
    pub fn against(players: Vec<PlayerId>, min_uniqueness: usize) -> Self {
        let max_overlap = players.len().saturating_sub(min_uniqueness);
        Self {
            players,
            max_overlap,
        }
    }
}

/// Everything a single solve must respect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    pub roster_size: usize,
    pub salary_cap: u32,
    pub limits: BTreeMap<Position, PositionLimit>,
    /// Every selected QB needs a same-team WR when one is available.
    pub stack_qb_wr: bool,
    /// Cuts derived from lineups already accepted in this batch.
    pub diversity: Vec<DiversityCut>,
    /// Players unavailable for this solve only.
    pub excluded: BTreeSet<PlayerId>,
}

impl ConstraintSet {
    /// Standard classic-contest rules under a salary cap.
    #[must_use]
    pub fn standard(salary_cap: u32) -> Self {
        let limits = BTreeMap::from([
            (Position::Quarterback, PositionLimit::exactly(1)),
            (Position::RunningBack, PositionLimit::at_least(2)),
            (Position::WideReceiver, PositionLimit::at_least(3)),
            (Position::TightEnd, PositionLimit::at_least(1)),
            (Position::Defense, PositionLimit::exactly(1)),
        ]);
        Self {
            roster_size: ROSTER_SIZE,
            salary_cap,
            limits,
            stack_qb_wr: false,
            diversity: Vec::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Standard rules with two required wide receivers instead of three.
    #[must_use]
    pub fn relaxed(salary_cap: u32) -> Self {
        let mut set = Self::standard(salary_cap);
        set.limits
            .insert(Position::WideReceiver, PositionLimit::at_least(2));
        set
    }

    /// Rules for a profile, resolving [`PositionProfile::Auto`] by pool size.
    #[must_use]
    pub fn for_profile(
        profile: PositionProfile,
        salary_cap: u32,
        pool_size: usize,
        small_pool_threshold: usize,
    ) -> Self {
        match profile {
            PositionProfile::Standard => Self::standard(salary_cap),
            PositionProfile::Relaxed => Self::relaxed(salary_cap),
            PositionProfile::Auto if pool_size < small_pool_threshold => {
                Self::relaxed(salary_cap)
            }
            PositionProfile::Auto => Self::standard(salary_cap),
        }
    }

    #[must_use]
    pub fn with_stacking(mut self, enabled: bool) -> Self {
        self.stack_qb_wr = enabled;
        self
    }

    #[must_use]
    pub fn limit(&self, position: Position) -> Option<PositionLimit> {
        self.limits.get(&position).copied()
    }

    /// Check a candidate roster against every rule in this set.
    #[must_use]
    pub fn is_satisfied_by(&self, players: &[&ResolvedPlayer]) -> bool {
        if players.len() != self.roster_size {
            return false;
        }
        let ids: BTreeSet<PlayerId> = players.iter().map(|p| p.id).collect();
        if ids.len() != players.len() || ids.iter().any(|id| self.excluded.contains(id)) {
            return false;
        }
        let salary: u64 = players.iter().map(|p| u64::from(p.salary)).sum();
        if salary > u64::from(self.salary_cap) {
            return false;
        }
        for (position, limit) in &self.limits {
            let count = players.iter().filter(|p| p.position == *position).count();
            if !limit.admits(count) {
                return false;
            }
        }
        self.diversity.iter().all(|cut| {
            cut.players.iter().filter(|id| ids.contains(id)).count() <= cut.max_overlap
        })
    }
}
