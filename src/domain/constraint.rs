//! Linear constraint primitives for the lineup integer program.
//!
//! Lineup constraints touch few variables (a position group, one team's
//! receivers, nine previously selected players), so constraints are stored
//! sparsely as `(variable index, coefficient)` terms.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single linear constraint: `sum(coef * x[var]) {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    /// Human-readable tag for logging (`salary_cap`, `min_RB`, ...).
    pub label: String,
    pub terms: Vec<(usize, Decimal)>,
    pub sense: ConstraintSense,
    pub rhs: Decimal,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub fn geq(label: impl Into<String>, terms: Vec<(usize, Decimal)>, rhs: Decimal) -> Self {
        Self {
            label: label.into(),
            terms,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub fn leq(label: impl Into<String>, terms: Vec<(usize, Decimal)>, rhs: Decimal) -> Self {
        Self {
            label: label.into(),
            terms,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub fn eq(label: impl Into<String>, terms: Vec<(usize, Decimal)>, rhs: Decimal) -> Self {
        Self {
            label: label.into(),
            terms,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// Unit coefficients over a set of variables.
    #[must_use]
    pub fn unit_terms(vars: impl IntoIterator<Item = usize>) -> Vec<(usize, Decimal)> {
        vars.into_iter().map(|v| (v, Decimal::ONE)).collect()
    }

    /// Evaluate the constraint at a point.
    #[must_use]
    pub fn is_satisfied_by(&self, values: &[Decimal]) -> bool {
        let lhs: Decimal = self
            .terms
            .iter()
            .map(|(var, coef)| values.get(*var).copied().unwrap_or_default() * coef)
            .sum();
        match self.sense {
            ConstraintSense::GreaterEqual => lhs >= self.rhs,
            ConstraintSense::LessEqual => lhs <= self.rhs,
            ConstraintSense::Equal => lhs == self.rhs,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Greater than or equal (>=).
    GreaterEqual,
    /// Less than or equal (<=).
    LessEqual,
    /// Equal (=).
    Equal,
}

/// Bounds on a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableBounds {
    /// Lower bound (None = -infinity).
    pub lower: Option<Decimal>,
    /// Upper bound (None = +infinity).
    pub upper: Option<Decimal>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: Some(Decimal::ONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn evaluates_sparse_terms() {
        let c = Constraint::leq("cap", vec![(0, dec!(3)), (2, dec!(4))], dec!(7));
        assert!(c.is_satisfied_by(&[dec!(1), dec!(1), dec!(1)]));
        assert!(!c.is_satisfied_by(&[dec!(1), dec!(0), dec!(1.5)]));
    }

    #[test]
    fn unit_terms_have_coefficient_one() {
        let c = Constraint::eq("count", Constraint::unit_terms([1, 3]), dec!(2));
        assert_eq!(c.terms, vec![(1, Decimal::ONE), (3, Decimal::ONE)]);
        assert!(c.is_satisfied_by(&[dec!(0), dec!(1), dec!(0), dec!(1)]));
        assert!(!c.is_satisfied_by(&[dec!(1), dec!(1), dec!(0), dec!(0)]));
    }
}
