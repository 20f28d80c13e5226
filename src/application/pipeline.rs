//! End-to-end slate processing: resolve, score, constrain, generate.
//!
//! [`Pipeline`] wires the services together from one [`Config`]. Each stage
//! is exposed on its own so front ends can report between stages; [`Pipeline::run`]
//! chains them.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::adjuster::ProjectionAdjuster;
use super::driver::{BatchRequest, LineupSetDriver};
use super::optimizer::LineupOptimizer;
use super::resolver::{IdentityResolver, ManualOverrides, Resolution};
use crate::config::Config;
use crate::domain::{
    ConstraintSet, LineupBatch, MatchupContext, Platform, PlayerPool, PoolSummary, Position,
    PositionProfile, PricedPlayer, ProjectedPlayer,
};
use crate::error::Result;
use crate::port::outbound::solver::Solver;

/// Everything loaded for one slate.
#[derive(Debug, Clone)]
pub struct Slate {
    pub platform: Platform,
    pub priced: Vec<PricedPlayer>,
    pub projected: Vec<ProjectedPlayer>,
    pub overrides: ManualOverrides,
    pub context: MatchupContext,
}

/// Outcome of a full run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub platform: Platform,
    pub salary_cap: u32,
    pub resolved: usize,
    pub unresolved: usize,
    pub pool: PoolSummary,
    pub relaxed: bool,
    pub batch: LineupBatch,
}

/// The configured services for a run.
pub struct Pipeline {
    config: Config,
    resolver: IdentityResolver,
    adjuster: ProjectionAdjuster,
    driver: LineupSetDriver,
}

impl Pipeline {
    pub fn new(config: Config, solver: Arc<dyn Solver>) -> Self {
        let resolver = IdentityResolver::new(config.resolver);
        let adjuster = ProjectionAdjuster::new(config.adjuster.clone());
        let driver = LineupSetDriver::new(LineupOptimizer::new(solver));
        Self {
            config,
            resolver,
            adjuster,
            driver,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn driver(&self) -> &LineupSetDriver {
        &self.driver
    }

    #[must_use]
    pub fn batch_request(&self) -> BatchRequest {
        BatchRequest::from(&self.config.batch)
    }

    pub fn resolve(&self, slate: &Slate) -> Resolution {
        self.resolver
            .resolve(&slate.priced, &slate.projected, &slate.overrides)
    }

    /// Score resolved players into the eligible pool. Draws fresh noise.
    pub fn score(&self, resolution: &Resolution, slate: &Slate) -> PlayerPool {
        self.adjuster.build_pool(&resolution.resolved, &slate.context)
    }

    /// Roster rules for a pool, applying the configured profile.
    #[must_use]
    pub fn constraints(&self, pool: &PlayerPool, platform: Platform) -> ConstraintSet {
        let optimizer = &self.config.optimizer;
        let set = ConstraintSet::for_profile(
            optimizer.profile,
            platform.salary_cap(),
            pool.len(),
            optimizer.small_pool_threshold,
        )
        .with_stacking(optimizer.stack_qb_wr);
        if optimizer.profile == PositionProfile::Auto && is_relaxed(&set) {
            warn!(
                pool = pool.len(),
                threshold = optimizer.small_pool_threshold,
                "small player pool, receiver minimum relaxed"
            );
        }
        set
    }

    /// Run every stage and generate the batch.
    ///
    /// # Errors
    ///
    /// Pool errors when the scored pool cannot hold a lineup, or solver
    /// failures.
    pub fn run(&self, slate: &Slate) -> Result<RunReport> {
        let resolution = self.resolve(slate);
        let pool = self.score(&resolution, slate);
        let constraints = self.constraints(&pool, slate.platform);
        let relaxed = is_relaxed(&constraints);
        let salary_cap = constraints.salary_cap;

        let batch = self
            .driver
            .generate_batch(&pool, constraints, self.batch_request())?;
        info!(
            lineups = batch.len(),
            requested = batch.requested,
            "run complete"
        );
        Ok(RunReport {
            platform: slate.platform,
            salary_cap,
            resolved: resolution.resolved.len(),
            unresolved: resolution.unresolved.len(),
            pool: pool.summary(),
            relaxed,
            batch,
        })
    }
}

/// Whether a constraint set uses a lower receiver minimum than standard.
#[must_use]
pub fn is_relaxed(constraints: &ConstraintSet) -> bool {
    let standard = ConstraintSet::standard(constraints.salary_cap);
    constraints.limit(Position::WideReceiver) != standard.limit(Position::WideReceiver)
}
