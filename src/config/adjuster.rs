//! Projection adjuster configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::{Position, TeamOdds};

/// Which point outcome to optimize for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    #[default]
    Median,
    Ceiling,
    Floor,
}

/// When projection noise is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariancePolicy {
    /// One draw per player per batch, shared by every lineup in it.
    #[default]
    PerBatch,
    /// Never inject noise, whatever `variance_pct` says.
    Off,
}

/// A betting-line condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    /// Spread at or below `-points`.
    FavoriteBy { points: Decimal },
    /// Spread at or above `points`.
    UnderdogBy { points: Decimal },
    /// Game total at or above `points`.
    TotalAtLeast { points: Decimal },
    /// Game total at or below `points`.
    TotalAtMost { points: Decimal },
}

impl Trigger {
    #[must_use]
    pub fn fires(&self, odds: &TeamOdds) -> bool {
        match *self {
            Self::FavoriteBy { points } => odds.spread <= -points,
            Self::UnderdogBy { points } => odds.spread >= points,
            Self::TotalAtLeast { points } => odds.total >= points,
            Self::TotalAtMost { points } => odds.total <= points,
        }
    }
}

/// Add `impact` to the multiplier of `positions` when `trigger` fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRule {
    pub trigger: Trigger,
    pub positions: Vec<Position>,
    pub impact: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjusterConfig {
    pub mode: ScoreMode,
    pub ceiling_scale: Decimal,
    pub floor_scale: Decimal,
    /// Players projected below this many points never enter the pool.
    pub min_projection: Decimal,
    /// Standard deviation of the noise factor, in percent.
    pub variance_pct: Decimal,
    pub variance_policy: VariancePolicy,
    pub seed: Option<u64>,
    pub spread_trigger: Decimal,
    pub total_trigger: Decimal,
    /// How far below `total_trigger` a game must be to count as low scoring.
    pub low_total_gap: Decimal,
    pub impact_pct: Decimal,
    /// Explicit rule table. When absent the table is derived from the
    /// trigger and impact settings above.
    pub rules: Option<Vec<AdjustmentRule>>,
}

impl Default for AdjusterConfig {
    fn default() -> Self {
        Self {
            mode: ScoreMode::Median,
            ceiling_scale: dec!(1.1),
            floor_scale: dec!(0.9),
            min_projection: dec!(1.0),
            variance_pct: Decimal::ZERO,
            variance_policy: VariancePolicy::PerBatch,
            seed: None,
            spread_trigger: dec!(3),
            total_trigger: dec!(45),
            low_total_gap: dec!(5),
            impact_pct: dec!(5),
            rules: None,
        }
    }
}

impl AdjusterConfig {
    /// The rule table in effect.
    ///
    /// The derived table boosts running backs on big favorites, receivers on
    /// big underdogs and in high totals, and moves defenses by half the impact
    /// down in high totals and up in low ones.
    #[must_use]
    pub fn rule_table(&self) -> Vec<AdjustmentRule> {
        if let Some(rules) = &self.rules {
            return rules.clone();
        }
        let impact = self.impact_pct / dec!(100);
        let receivers = vec![Position::WideReceiver, Position::TightEnd];
        vec![
            AdjustmentRule {
                trigger: Trigger::FavoriteBy {
                    points: self.spread_trigger,
                },
                positions: vec![Position::RunningBack],
                impact,
            },
            AdjustmentRule {
                trigger: Trigger::UnderdogBy {
                    points: self.spread_trigger,
                },
                positions: receivers.clone(),
                impact,
            },
            AdjustmentRule {
                trigger: Trigger::TotalAtLeast {
                    points: self.total_trigger,
                },
                positions: receivers,
                impact,
            },
            AdjustmentRule {
                trigger: Trigger::TotalAtLeast {
                    points: self.total_trigger,
                },
                positions: vec![Position::Defense],
                impact: -impact / dec!(2),
            },
            AdjustmentRule {
                trigger: Trigger::TotalAtMost {
                    points: self.total_trigger - self.low_total_gap,
                },
                positions: vec![Position::Defense],
                impact: impact / dec!(2),
            },
        ]
    }

    /// Scale applied for the configured mode.
    #[must_use]
    pub fn mode_scale(&self, mode: ScoreMode) -> Decimal {
        match mode {
            ScoreMode::Median => Decimal::ONE,
            ScoreMode::Ceiling => self.ceiling_scale,
            ScoreMode::Floor => self.floor_scale,
        }
    }
}
