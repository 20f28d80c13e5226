//! HiGHS backend for the lineup integer program, driven through good_lp.
//!
//! Decimal coefficients are converted to `f64` at the boundary and binary
//! results are rounded back before they leave the adapter.

use std::collections::HashSet;

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::domain::constraint::ConstraintSense;
use crate::error::{Error, Result};
use crate::port::outbound::solver::{IlpProblem, LpSolution, ObjectiveSense, SolutionStatus, Solver};

/// HiGHS-based ILP solver.
#[derive(Debug, Default, Clone)]
pub struct HiGHSSolver;

impl HiGHSSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HiGHSSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_ilp(&self, problem: &IlpProblem) -> Result<LpSolution> {
        solve_with_good_lp(problem)
    }
}

fn solve_with_good_lp(problem: &IlpProblem) -> Result<LpSolution> {
    let lp = &problem.lp;
    let n = lp.num_vars();

    if n == 0 {
        return Ok(LpSolution {
            values: vec![],
            objective: Decimal::ZERO,
            status: SolutionStatus::Optimal,
        });
    }
    if lp.bounds.len() != n {
        return Err(Error::Solver(format!(
            "{} bounds for {n} variables",
            lp.bounds.len()
        )));
    }
    if let Some(constr) = lp
        .constraints
        .iter()
        .find(|c| c.terms.iter().any(|(i, _)| *i >= n))
    {
        return Err(Error::Solver(format!(
            "row {} references a variable outside 0..{n}",
            constr.label
        )));
    }

    let integer: HashSet<usize> = problem.integer_vars.iter().copied().collect();
    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for (i, bounds) in lp.bounds.iter().enumerate() {
        let mut v = variable();

        if let Some(lb) = bounds.lower {
            v = v.min(lb.to_f64().unwrap_or(0.0));
        }
        if let Some(ub) = bounds.upper {
            v = v.max(ub.to_f64().unwrap_or(f64::INFINITY));
        }
        if integer.contains(&i) {
            v = v.integer();
        }

        var_list.push(vars.add(v));
    }

    let objective: Expression = var_list
        .iter()
        .zip(lp.objective.iter())
        .map(|(v, c)| c.to_f64().unwrap_or(0.0) * *v)
        .sum();

    let mut model = match lp.sense {
        ObjectiveSense::Minimize => vars.minimise(&objective).using(highs),
        ObjectiveSense::Maximize => vars.maximise(&objective).using(highs),
    };

    for constr in &lp.constraints {
        trace!(label = %constr.label, terms = constr.terms.len(), "adding row");
        let lhs: Expression = constr
            .terms
            .iter()
            .map(|(i, c)| c.to_f64().unwrap_or(0.0) * var_list[*i])
            .sum();

        let rhs = constr.rhs.to_f64().unwrap_or(0.0);

        model = match constr.sense {
            ConstraintSense::GreaterEqual => model.with(constraint!(lhs >= rhs)),
            ConstraintSense::LessEqual => model.with(constraint!(lhs <= rhs)),
            ConstraintSense::Equal => model.with(constraint!(lhs == rhs)),
        };
    }

    // good_lp also returns `Ok` when HiGHS stops on a time or iteration
    // limit. No limit is set on the model, so `Ok` means proven optimal; a
    // limit option must come with a model status check here.
    let solution = match model.solve() {
        Ok(solution) => {
            let values: Vec<Decimal> = var_list
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let raw = solution.value(*v);
                    let raw = if integer.contains(&i) {
                        raw.round()
                    } else {
                        raw
                    };
                    Decimal::try_from(raw).unwrap_or(Decimal::ZERO)
                })
                .collect();

            let objective = lp.evaluate(&values);

            LpSolution {
                values,
                objective,
                status: SolutionStatus::Optimal,
            }
        }
        Err(ResolutionError::Infeasible) => {
            debug!(rows = lp.constraints.len(), "highs proved the model infeasible");
            LpSolution::without_values(SolutionStatus::Infeasible)
        }
        Err(ResolutionError::Unbounded) => LpSolution::without_values(SolutionStatus::Unbounded),
        Err(e) => {
            debug!(error = %e, "highs stopped without an optimal solution");
            LpSolution::without_values(SolutionStatus::Error)
        }
    };
    Ok(solution)
}
