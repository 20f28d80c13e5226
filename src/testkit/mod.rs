//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`pool`] — Builders for scored players, exact rosters and full slates.
//! - [`fixtures`] — CSV text for the salary, projection and odds loaders.

pub mod fixtures;
pub mod pool;
