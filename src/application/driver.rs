//! Batch generation: repeated solves with diversity and exposure rules.
//!
//! Each accepted lineup adds a diversity cut so the next lineup shares at
//! most `roster_size - min_uniqueness` of its players. With an exposure cap,
//! a player already used in `ceil(pct × count / 100)` lineups is excluded
//! from later solves. The batch stops at the first infeasible solve and
//! keeps what it already accepted.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::optimizer::{LineupOptimizer, SolveOutcome};
use crate::config::BatchConfig;
use crate::domain::{
    BatchEnd, ConstraintSet, DiversityCut, Lineup, LineupBatch, PlayerId, PlayerPool,
};
use crate::error::{PoolError, Result};

/// How many lineups to build and how different they must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub count: usize,
    pub min_uniqueness: usize,
    /// Maximum share of lineups any one player may appear in, in percent.
    pub max_exposure_pct: Option<u32>,
}

impl BatchRequest {
    #[must_use]
    pub fn new(count: usize, min_uniqueness: usize) -> Self {
        Self {
            count,
            min_uniqueness,
            max_exposure_pct: None,
        }
    }

    #[must_use]
    pub fn with_max_exposure(mut self, pct: u32) -> Self {
        self.max_exposure_pct = Some(pct);
        self
    }

    /// Most lineups a single player may appear in, rounded up.
    #[must_use]
    pub fn exposure_cap(&self) -> Option<usize> {
        self.max_exposure_pct
            .map(|pct| (pct as usize * self.count).div_ceil(100))
    }
}

impl From<&BatchConfig> for BatchRequest {
    fn from(config: &BatchConfig) -> Self {
        Self {
            count: config.count,
            min_uniqueness: config.min_uniqueness,
            max_exposure_pct: config.max_exposure_pct,
        }
    }
}

/// What a single [`BatchRun::step`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A lineup was accepted; carries its zero-based index.
    Accepted(usize),
    /// The run is over.
    Finished(BatchEnd),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Accumulating,
    Done(BatchEnd),
}

/// An in-progress batch. Drive it with [`BatchRun::step`] until it reports
/// [`Step::Finished`], then take the result with [`BatchRun::finish`].
pub struct BatchRun<'a> {
    optimizer: &'a LineupOptimizer,
    pool: &'a PlayerPool,
    template: ConstraintSet,
    request: BatchRequest,
    exposure_cap: Option<usize>,
    lineups: Vec<Lineup>,
    usage: BTreeMap<PlayerId, usize>,
    state: RunState,
}

impl<'a> BatchRun<'a> {
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self.state, RunState::Done(_))
    }

    /// Attempt the next lineup.
    ///
    /// # Errors
    ///
    /// Propagates solver failures. Infeasibility ends the run instead.
    pub fn step(&mut self) -> Result<Step> {
        if let RunState::Done(end) = self.state {
            return Ok(Step::Finished(end));
        }
        if self.lineups.len() >= self.request.count {
            return Ok(self.end(BatchEnd::Completed));
        }

        let constraints = self.next_constraints();
        let index = self.lineups.len();
        debug!(
            lineup = index + 1,
            cuts = constraints.diversity.len(),
            excluded = constraints.excluded.len(),
            "solving next lineup"
        );

        match self.optimizer.solve(self.pool, &constraints)? {
            SolveOutcome::Lineup(lineup) => {
                for id in lineup.ids() {
                    *self.usage.entry(id).or_insert(0) += 1;
                }
                info!(
                    lineup = index + 1,
                    score = %lineup.total_score(),
                    salary = lineup.total_salary(),
                    "lineup accepted"
                );
                self.lineups.push(lineup);
                if self.lineups.len() >= self.request.count {
                    self.state = RunState::Done(BatchEnd::Completed);
                }
                Ok(Step::Accepted(index))
            }
            SolveOutcome::Infeasible => {
                warn!(
                    accepted = index,
                    requested = self.request.count,
                    "no further feasible lineup, stopping early"
                );
                Ok(self.end(BatchEnd::Infeasible { accepted: index }))
            }
        }
    }

    /// Collect the accepted lineups.
    #[must_use]
    pub fn finish(self) -> LineupBatch {
        let end = match self.state {
            RunState::Done(end) => end,
            RunState::Accumulating if self.lineups.len() >= self.request.count => {
                BatchEnd::Completed
            }
            RunState::Accumulating => BatchEnd::Infeasible {
                accepted: self.lineups.len(),
            },
        };
        LineupBatch {
            requested: self.request.count,
            lineups: self.lineups,
            usage: self.usage,
            end,
        }
    }

    fn end(&mut self, end: BatchEnd) -> Step {
        self.state = RunState::Done(end);
        Step::Finished(end)
    }

    fn next_constraints(&self) -> ConstraintSet {
        let mut constraints = self.template.clone();
        constraints.diversity.extend(
            self.lineups
                .iter()
                .map(|l| DiversityCut::against(l.ids(), self.request.min_uniqueness)),
        );
        if let Some(cap) = self.exposure_cap {
            let capped: BTreeSet<PlayerId> = self
                .usage
                .iter()
                .filter(|(_, used)| **used >= cap)
                .map(|(id, _)| *id)
                .collect();
            constraints.excluded.extend(capped);
        }
        constraints
    }
}

/// Produces diverse batches of lineups.
#[derive(Clone)]
pub struct LineupSetDriver {
    optimizer: LineupOptimizer,
}

impl LineupSetDriver {
    pub fn new(optimizer: LineupOptimizer) -> Self {
        Self { optimizer }
    }

    /// Validate the pool and start a step-wise run.
    ///
    /// # Errors
    ///
    /// [`PoolError::MissingDefense`] or [`PoolError::InsufficientPlayers`]
    /// when no lineup could ever be built from `pool`.
    pub fn start<'a>(
        &'a self,
        pool: &'a PlayerPool,
        template: ConstraintSet,
        request: BatchRequest,
    ) -> Result<BatchRun<'a>> {
        if !pool.has_defense() {
            return Err(PoolError::MissingDefense.into());
        }
        if pool.len() < template.roster_size {
            return Err(PoolError::InsufficientPlayers {
                available: pool.len(),
                required: template.roster_size,
            }
            .into());
        }

        let exposure_cap = request.exposure_cap();
        info!(
            count = request.count,
            min_uniqueness = request.min_uniqueness,
            exposure_cap = ?exposure_cap,
            pool = pool.len(),
            "starting lineup batch"
        );
        let state = if request.count == 0 {
            RunState::Done(BatchEnd::Completed)
        } else {
            RunState::Accumulating
        };
        Ok(BatchRun {
            optimizer: &self.optimizer,
            pool,
            template,
            request,
            exposure_cap,
            lineups: Vec::with_capacity(request.count),
            usage: BTreeMap::new(),
            state,
        })
    }

    /// Generate a whole batch.
    ///
    /// # Errors
    ///
    /// See [`Self::start`] and [`BatchRun::step`].
    pub fn generate_batch(
        &self,
        pool: &PlayerPool,
        template: ConstraintSet,
        request: BatchRequest,
    ) -> Result<LineupBatch> {
        let mut run = self.start(pool, template, request)?;
        while let Step::Accepted(_) = run.step()? {}
        Ok(run.finish())
    }
}
