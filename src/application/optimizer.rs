//! Single-lineup optimization as a binary integer program.
//!
//! One binary variable per eligible player. The objective maximizes total
//! final score subject to the salary cap, the roster size, per-position
//! limits, optional QB/WR stacking and any diversity cuts carried by the
//! [`ConstraintSet`].

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::domain::constraint::Constraint;
use crate::domain::{ConstraintSet, Lineup, PlayerId, PlayerPool, ResolvedPlayer, Team};
use crate::error::{PoolError, Result};
use crate::port::outbound::solver::{IlpProblem, LpProblem, ObjectiveSense, Solver};

/// Result of one solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    Lineup(Lineup),
    /// No assignment satisfies the constraints.
    Infeasible,
}

impl SolveOutcome {
    #[must_use]
    pub fn lineup(self) -> Option<Lineup> {
        match self {
            Self::Lineup(lineup) => Some(lineup),
            Self::Infeasible => None,
        }
    }
}

/// Finds the highest-scoring lineup for a pool under a constraint set.
#[derive(Clone)]
pub struct LineupOptimizer {
    solver: Arc<dyn Solver>,
}

impl LineupOptimizer {
    pub fn new(solver: Arc<dyn Solver>) -> Self {
        Self { solver }
    }

    /// Solve for one lineup.
    ///
    /// Players in `constraints.excluded` are removed before the model is
    /// built. Diversity cuts only constrain players still in the model.
    ///
    /// # Errors
    ///
    /// [`PoolError::MissingDefense`] when the pool has no DST at all, or any
    /// error the solver backend raises.
    pub fn solve(&self, pool: &PlayerPool, constraints: &ConstraintSet) -> Result<SolveOutcome> {
        if !pool.has_defense() {
            return Err(PoolError::MissingDefense.into());
        }

        let eligible: Vec<&ResolvedPlayer> = pool
            .iter()
            .filter(|p| !constraints.excluded.contains(&p.id))
            .collect();
        if eligible.len() < constraints.roster_size {
            debug!(
                eligible = eligible.len(),
                required = constraints.roster_size,
                "too few eligible players"
            );
            return Ok(SolveOutcome::Infeasible);
        }

        let problem = build_problem(&eligible, constraints);
        debug!(
            solver = self.solver.name(),
            vars = problem.lp.num_vars(),
            constraints = problem.lp.constraints.len(),
            "solving lineup"
        );
        let solution = self.solver.solve_ilp(&problem)?;
        if !solution.is_optimal() {
            debug!(status = ?solution.status, "no optimal lineup");
            return Ok(SolveOutcome::Infeasible);
        }

        let picked: Vec<ResolvedPlayer> = eligible
            .iter()
            .zip(solution.values.iter())
            .filter(|(_, value)| **value > dec!(0.5))
            .map(|(player, _)| (*player).clone())
            .collect();
        let lineup = Lineup::new(picked);
        info!(
            salary = lineup.total_salary(),
            score = %lineup.total_score(),
            "optimal lineup found"
        );
        Ok(SolveOutcome::Lineup(lineup))
    }
}

fn build_problem(eligible: &[&ResolvedPlayer], constraints: &ConstraintSet) -> IlpProblem {
    let mut lp = LpProblem::new(eligible.len());
    lp.sense = ObjectiveSense::Maximize;
    lp.objective = eligible.iter().map(|p| p.final_score).collect();

    let salary_terms = eligible
        .iter()
        .enumerate()
        .map(|(i, p)| (i, Decimal::from(p.salary)))
        .collect();
    lp.constraints.push(Constraint::leq(
        "salary_cap",
        salary_terms,
        Decimal::from(constraints.salary_cap),
    ));
    lp.constraints.push(Constraint::eq(
        "roster_size",
        Constraint::unit_terms(0..eligible.len()),
        Decimal::from(constraints.roster_size),
    ));

    for (position, limit) in &constraints.limits {
        let vars: Vec<usize> = indices(eligible, |p| p.position == *position);
        if limit.max == Some(limit.min) {
            lp.constraints.push(Constraint::eq(
                format!("exactly_{position}"),
                Constraint::unit_terms(vars),
                Decimal::from(limit.min),
            ));
            continue;
        }
        lp.constraints.push(Constraint::geq(
            format!("min_{position}"),
            Constraint::unit_terms(vars.iter().copied()),
            Decimal::from(limit.min),
        ));
        if let Some(max) = limit.max {
            lp.constraints.push(Constraint::leq(
                format!("max_{position}"),
                Constraint::unit_terms(vars),
                Decimal::from(max),
            ));
        }
    }

    if constraints.stack_qb_wr {
        lp.constraints.extend(stacking_constraints(eligible));
    }

    let slot: BTreeMap<PlayerId, usize> = eligible
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();
    for (n, cut) in constraints.diversity.iter().enumerate() {
        let vars: Vec<usize> = cut
            .players
            .iter()
            .filter_map(|id| slot.get(id).copied())
            .collect();
        if vars.len() <= cut.max_overlap {
            continue;
        }
        lp.constraints.push(Constraint::leq(
            format!("diversity_{n}"),
            Constraint::unit_terms(vars),
            Decimal::from(cut.max_overlap),
        ));
    }

    IlpProblem::all_binary(lp)
}

/// `sum(same-team WR) - x_qb >= 0` for every QB whose team has a WR in the
/// model. QBs without a same-team WR are left unconstrained.
fn stacking_constraints(eligible: &[&ResolvedPlayer]) -> Vec<Constraint> {
    use crate::domain::Position;

    let mut receivers: BTreeMap<&Team, Vec<usize>> = BTreeMap::new();
    for (i, p) in eligible.iter().enumerate() {
        if p.position == Position::WideReceiver {
            receivers.entry(&p.team).or_default().push(i);
        }
    }

    eligible
        .iter()
        .enumerate()
        .filter(|(_, p)| p.position == Position::Quarterback)
        .filter_map(|(qb, p)| {
            let wrs = receivers.get(&p.team)?;
            let mut terms = Constraint::unit_terms(wrs.iter().copied());
            terms.push((qb, -Decimal::ONE));
            Some(Constraint::geq(
                format!("stack_{}", p.team),
                terms,
                Decimal::ZERO,
            ))
        })
        .collect()
}

fn indices(eligible: &[&ResolvedPlayer], pred: impl Fn(&ResolvedPlayer) -> bool) -> Vec<usize> {
    eligible
        .iter()
        .enumerate()
        .filter(|(_, p)| pred(p))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::solver::HiGHSSolver;
    use crate::domain::{DiversityCut, Position};
    use crate::error::Error;
    use crate::testkit::pool::{player, standard_nine};

    fn optimizer() -> LineupOptimizer {
        LineupOptimizer::new(Arc::new(HiGHSSolver::new()))
    }

    #[test]
    fn exact_pool_yields_every_player() {
        let pool = PlayerPool::new(standard_nine(0));
        let outcome = optimizer()
            .solve(&pool, &ConstraintSet::standard(50_000))
            .unwrap();
        let lineup = outcome.lineup().expect("feasible");
        assert_eq!(lineup.len(), 9);
        assert_eq!(lineup.total_salary(), 45_000);
        assert_eq!(lineup.total_score(), dec!(90));
    }

    #[test]
    fn missing_defense_is_an_error() {
        let players: Vec<_> = standard_nine(0)
            .into_iter()
            .filter(|p| p.position != Position::Defense)
            .collect();
        let result = optimizer().solve(&PlayerPool::new(players), &ConstraintSet::standard(50_000));
        assert!(matches!(result, Err(Error::Pool(PoolError::MissingDefense))));
    }

    #[test]
    fn too_few_players_is_infeasible() {
        let mut players = standard_nine(0);
        players.retain(|p| p.id != PlayerId::new(1));
        let outcome = optimizer()
            .solve(&PlayerPool::new(players), &ConstraintSet::standard(50_000))
            .unwrap();
        assert_eq!(outcome, SolveOutcome::Infeasible);
    }

    #[test]
    fn salary_cap_binds() {
        let mut players = standard_nine(0);
        players.push(player(9, "Star Rb", Position::RunningBack, "BUF", 9000, "30"));
        let pool = PlayerPool::new(players);

        let roomy = optimizer().solve(&pool, &ConstraintSet::standard(50_000)).unwrap();
        assert!(roomy.lineup().unwrap().contains(PlayerId::new(9)));

        let tight = optimizer().solve(&pool, &ConstraintSet::standard(45_000)).unwrap();
        assert!(!tight.lineup().unwrap().contains(PlayerId::new(9)));
    }

    #[test]
    fn stacking_pulls_in_teammate() {
        let mut players = standard_nine(0);
        // Swap the KC receiver for one from another team, then offer a
        // cheaper, weaker KC receiver.
        for p in &mut players {
            if p.position == Position::WideReceiver && p.team.as_str() == "KC" {
                p.team = Team::new("BUF");
            }
        }
        players.push(player(20, "Kc Wr", Position::WideReceiver, "KC", 3000, "2"));
        let pool = PlayerPool::new(players);

        let free = optimizer().solve(&pool, &ConstraintSet::standard(50_000)).unwrap();
        assert!(!free.lineup().unwrap().contains(PlayerId::new(20)));

        let stacked = optimizer()
            .solve(&pool, &ConstraintSet::standard(50_000).with_stacking(true))
            .unwrap();
        assert!(stacked.lineup().unwrap().contains(PlayerId::new(20)));
    }

    #[test]
    fn exclusions_and_cuts_apply() {
        let mut players = standard_nine(0);
        players.push(player(9, "Alt Te", Position::TightEnd, "NYJ", 4000, "6"));
        let pool = PlayerPool::new(players);

        let mut constraints = ConstraintSet::standard(50_000);
        constraints
            .diversity
            .push(DiversityCut::against((0..9).map(PlayerId::new).collect(), 1));
        let lineup = optimizer().solve(&pool, &constraints).unwrap().lineup().unwrap();
        assert!(lineup.contains(PlayerId::new(9)));
        assert_eq!((0..9).filter(|i| lineup.contains(PlayerId::new(*i))).count(), 8);

        constraints.excluded.insert(PlayerId::new(9));
        assert_eq!(
            optimizer().solve(&pool, &constraints).unwrap(),
            SolveOutcome::Infeasible
        );
    }
}
