//! Player records from the two independent sources and their join.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::name::NormalizedName;
use super::position::Position;

/// Stable identifier of a priced player: its index among the accepted rows
/// of the salary source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(usize);

impl PlayerId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// NFL team abbreviation, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Team(String);

impl Team {
    pub fn new(abbr: impl AsRef<str>) -> Self {
        Self(abbr.as_ref().trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Team {
    fn from(abbr: &str) -> Self {
        Self::new(abbr)
    }
}

/// A player as listed by the contest platform's salary source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub normalized: NormalizedName,
    pub position: Position,
    pub team: Team,
    pub salary: u32,
}

impl PricedPlayer {
    /// Build a priced player, validating name and salary.
    pub fn try_new(
        id: PlayerId,
        name: impl Into<String>,
        position: Position,
        team: impl AsRef<str>,
        salary: i64,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let normalized = NormalizedName::try_new(&name)?;
        let salary = u32::try_from(salary)
            .ok()
            .filter(|s| *s > 0)
            .ok_or(DomainError::NonPositiveSalary { salary })?;
        Ok(Self {
            id,
            name,
            normalized,
            position,
            team: Team::new(team),
            salary,
        })
    }
}

/// A player as listed by a projection source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPlayer {
    pub name: String,
    pub normalized: NormalizedName,
    pub position: Position,
    pub team: Team,
    pub projection: Decimal,
}

impl ProjectedPlayer {
    /// Build a projected player, validating name and projection.
    pub fn try_new(
        name: impl Into<String>,
        position: Position,
        team: impl AsRef<str>,
        projection: Decimal,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let normalized = NormalizedName::try_new(&name)?;
        if projection.is_sign_negative() && !projection.is_zero() {
            return Err(DomainError::NegativeProjection { projection });
        }
        Ok(Self {
            name,
            normalized,
            position,
            team: Team::new(team),
            projection,
        })
    }
}

/// A priced player joined with its projection, ready for scoring.
///
/// Position, team and salary always come from the pricing source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlayer {
    pub id: PlayerId,
    pub name: String,
    pub normalized: NormalizedName,
    pub position: Position,
    pub team: Team,
    pub salary: u32,
    /// Name of the projection record this player was joined to.
    pub matched: NormalizedName,
    pub projection: Decimal,
    pub multiplier: Decimal,
    pub final_score: Decimal,
}

impl ResolvedPlayer {
    /// Join a priced player to a projection with a neutral multiplier.
    pub fn join(priced: &PricedPlayer, projected: &ProjectedPlayer) -> Self {
        Self {
            id: priced.id,
            name: priced.name.clone(),
            normalized: priced.normalized.clone(),
            position: priced.position,
            team: priced.team.clone(),
            salary: priced.salary,
            matched: projected.normalized.clone(),
            projection: projected.projection,
            multiplier: Decimal::ONE,
            final_score: projected.projection,
        }
    }
}
