//! Lineforge - daily fantasy football lineup optimization.
//!
//! Turns a contest's salary export and one or more projection sources into a
//! batch of diverse, salary-legal lineups.
//!
//! # Pipeline
//!
//! 1. **Identity resolution** ([`application::resolver`]) joins each priced
//!    player to a projection by exact name, manual override, or fuzzy
//!    similarity gated on position.
//! 2. **Projection adjustment** ([`application::adjuster`]) scales
//!    projections by matchup context from betting lines, the chosen scenario
//!    and optional seeded noise, then drops players under the floor.
//! 3. **Lineup optimization** ([`application::optimizer`]) solves a binary
//!    integer program for the best legal roster.
//! 4. **Batch generation** ([`application::driver`]) repeats the solve with
//!    diversity cuts and exposure caps until the batch is full or no legal
//!    lineup remains.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with validated defaults
//! - [`domain`] - Players, pools, roster rules and lineups
//! - [`application`] - The pipeline stages above
//! - [`port`] - Solver abstraction
//! - [`adapter`] - HiGHS solver, CSV sources and export, and the CLI
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use lineforge::adapter::outbound::solver::HiGHSSolver;
//! use lineforge::application::{LineupOptimizer, LineupSetDriver, BatchRequest};
//! use lineforge::domain::{ConstraintSet, PlayerPool};
//!
//! let driver = LineupSetDriver::new(LineupOptimizer::new(Arc::new(HiGHSSolver::new())));
//! let pool = PlayerPool::default();
//! let batch = driver.generate_batch(&pool, ConstraintSet::standard(50_000), BatchRequest::new(5, 2));
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
