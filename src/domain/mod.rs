//! DFS domain types: players, pools, roster rules and lineups.
//!
//! Everything here is plain data plus invariant-checking constructors; no
//! module performs I/O or calls the solver.

pub mod constraint;
pub mod error;
pub mod lineup;
pub mod matchup;
pub mod name;
pub mod platform;
pub mod player;
pub mod pool;
pub mod position;
pub mod roster;
pub mod scoring;

pub use lineup::{BatchEnd, Lineup, LineupBatch, LineupRow};
pub use matchup::{GameLine, MatchupContext, TeamOdds};
pub use name::NormalizedName;
pub use platform::Platform;
pub use player::{PlayerId, PricedPlayer, ProjectedPlayer, ResolvedPlayer, Team};
pub use pool::{PlayerPool, PoolSummary};
pub use position::Position;
pub use roster::{ConstraintSet, DiversityCut, PositionLimit, PositionProfile, ROSTER_SIZE};
pub use scoring::{ScoringRules, StatLine};
