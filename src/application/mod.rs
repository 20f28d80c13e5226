//! Application services (use cases).
//!
//! The pipeline runs in order: resolve identities, adjust projections into a
//! scored pool, then drive the optimizer for a batch of lineups.

pub mod adjuster;
pub mod driver;
pub mod fuzzy;
pub mod optimizer;
pub mod pipeline;
pub mod resolver;

pub use adjuster::{ProjectionAdjuster, VarianceSource};
pub use driver::{BatchRequest, BatchRun, LineupSetDriver, Step};
pub use optimizer::{LineupOptimizer, SolveOutcome};
pub use pipeline::{is_relaxed, Pipeline, RunReport, Slate};
pub use resolver::{IdentityResolver, ManualOverrides, MatchLink, MatchSource, Resolution};
