//! Projection adjustment: matchup multipliers, scenario mode and variance.
//!
//! `final_score = projection × multiplier × mode_scale × noise`
//!
//! The multiplier starts at 1 and each rule in the table whose trigger fires
//! for the player's team adds its impact when the player's position is
//! listed. Teams missing from the matchup context keep a multiplier of 1.
//! Noise is a draw from N(1, variance_pct / 100), taken once per player each
//! time a pool is built, so every lineup in a batch sees the same draw.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, info, warn};

use crate::config::{AdjusterConfig, AdjustmentRule, ScoreMode, VariancePolicy};
use crate::domain::{MatchupContext, PlayerPool, ResolvedPlayer};

/// Source of per-player noise factors for one batch.
pub struct VarianceSource {
    sampler: Option<(Normal<f64>, StdRng)>,
}

impl VarianceSource {
    /// A source that always yields 1.
    #[must_use]
    pub fn none() -> Self {
        Self { sampler: None }
    }

    /// Noise with standard deviation `variance_pct` percent.
    ///
    /// A zero or invalid deviation yields a source that always returns 1.
    pub fn new(variance_pct: Decimal, seed: Option<u64>) -> Self {
        use rust_decimal::prelude::ToPrimitive;

        let std_dev = (variance_pct / dec!(100)).to_f64().unwrap_or(0.0);
        if std_dev <= 0.0 {
            return Self::none();
        }
        let Ok(normal) = Normal::new(1.0, std_dev) else {
            warn!(variance_pct = %variance_pct, "invalid variance, noise disabled");
            return Self::none();
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            sampler: Some((normal, rng)),
        }
    }

    /// Next noise factor.
    pub fn draw(&mut self) -> Decimal {
        match &mut self.sampler {
            Some((normal, rng)) => {
                Decimal::try_from(normal.sample(rng)).unwrap_or(Decimal::ONE)
            }
            None => Decimal::ONE,
        }
    }
}

/// Turns resolved players into a scored pool.
#[derive(Debug, Clone)]
pub struct ProjectionAdjuster {
    config: AdjusterConfig,
    rules: Vec<AdjustmentRule>,
}

impl ProjectionAdjuster {
    pub fn new(config: AdjusterConfig) -> Self {
        let rules = config.rule_table();
        Self { config, rules }
    }

    #[must_use]
    pub fn config(&self) -> &AdjusterConfig {
        &self.config
    }

    /// Contextual multiplier for a player.
    #[must_use]
    pub fn multiplier(&self, player: &ResolvedPlayer, context: &MatchupContext) -> Decimal {
        let Some(odds) = context.get(&player.team) else {
            return Decimal::ONE;
        };
        Decimal::ONE
            + self
                .rules
                .iter()
                .filter(|rule| rule.positions.contains(&player.position) && rule.trigger.fires(odds))
                .map(|rule| rule.impact)
                .sum::<Decimal>()
    }

    /// Score one player under a mode with a given noise factor.
    #[must_use]
    pub fn score(
        &self,
        player: &ResolvedPlayer,
        context: &MatchupContext,
        mode: ScoreMode,
        noise: Decimal,
    ) -> ResolvedPlayer {
        let multiplier = self.multiplier(player, context);
        let final_score =
            (player.projection * multiplier * self.config.mode_scale(mode) * noise).round_dp(4);
        ResolvedPlayer {
            multiplier,
            final_score,
            ..player.clone()
        }
    }

    /// The noise source this configuration asks for.
    #[must_use]
    pub fn variance_source(&self) -> VarianceSource {
        match self.config.variance_policy {
            VariancePolicy::Off => VarianceSource::none(),
            VariancePolicy::PerBatch => {
                VarianceSource::new(self.config.variance_pct, self.config.seed)
            }
        }
    }

    /// Drop players under the projection floor and score the rest.
    ///
    /// Call once per batch: noise is drawn here.
    pub fn build_pool(&self, resolved: &[ResolvedPlayer], context: &MatchupContext) -> PlayerPool {
        self.build_pool_with(resolved, context, self.config.mode, &mut self.variance_source())
    }

    /// [`Self::build_pool`] with an explicit mode and noise source.
    pub fn build_pool_with(
        &self,
        resolved: &[ResolvedPlayer],
        context: &MatchupContext,
        mode: ScoreMode,
        noise: &mut VarianceSource,
    ) -> PlayerPool {
        if context.is_empty() {
            info!("no matchup context, all multipliers neutral");
        }

        let floor = self.config.min_projection;
        let (kept, dropped): (Vec<&ResolvedPlayer>, Vec<&ResolvedPlayer>) =
            resolved.iter().partition(|p| p.projection >= floor);

        let scored: Vec<ResolvedPlayer> = kept
            .into_iter()
            .map(|p| self.score(p, context, mode, noise.draw()))
            .collect();

        let adjusted = scored.iter().filter(|p| p.multiplier != Decimal::ONE).count();
        debug!(
            floor = %floor,
            below_floor = dropped.len(),
            adjusted,
            "projection adjustment complete"
        );
        info!(
            pool = scored.len(),
            below_floor = dropped.len(),
            mode = ?mode,
            "scored player pool"
        );
        PlayerPool::new(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Position, Team, TeamOdds};
    use crate::testkit::pool::player;

    fn context(team: &str, spread: Decimal, total: Decimal) -> MatchupContext {
        let mut ctx = MatchupContext::new();
        ctx.insert(Team::new(team), TeamOdds { spread, total });
        ctx
    }

    fn adjuster() -> ProjectionAdjuster {
        ProjectionAdjuster::new(AdjusterConfig::default())
    }

    #[test]
    fn missing_context_is_neutral() {
        let rb = player(0, "Rb", Position::RunningBack, "KC", 6000, "15");
        assert_eq!(adjuster().multiplier(&rb, &MatchupContext::new()), Decimal::ONE);
    }

    #[test]
    fn favorite_running_back_is_boosted() {
        let rb = player(0, "Rb", Position::RunningBack, "KC", 6000, "15");
        let ctx = context("KC", dec!(-7), dec!(44));
        assert_eq!(adjuster().multiplier(&rb, &ctx), dec!(1.05));
    }

    #[test]
    fn underdog_receiver_in_shootout_gets_both_boosts() {
        let wr = player(0, "Wr", Position::WideReceiver, "KC", 6000, "15");
        let ctx = context("KC", dec!(6.5), dec!(51));
        assert_eq!(adjuster().multiplier(&wr, &ctx), dec!(1.10));
    }

    #[test]
    fn defense_moves_with_game_total() {
        let dst = player(0, "Chiefs", Position::Defense, "KC", 3000, "8");
        assert_eq!(
            adjuster().multiplier(&dst, &context("KC", dec!(0), dec!(50))),
            dec!(0.975)
        );
        assert_eq!(
            adjuster().multiplier(&dst, &context("KC", dec!(0), dec!(38))),
            dec!(1.025)
        );
        assert_eq!(
            adjuster().multiplier(&dst, &context("KC", dec!(0), dec!(42))),
            Decimal::ONE
        );
    }

    #[test]
    fn mode_scales_final_score() {
        let qb = player(0, "Qb", Position::Quarterback, "KC", 7000, "20");
        let ctx = MatchupContext::new();
        let a = adjuster();
        assert_eq!(a.score(&qb, &ctx, ScoreMode::Median, Decimal::ONE).final_score, dec!(20));
        assert_eq!(a.score(&qb, &ctx, ScoreMode::Ceiling, Decimal::ONE).final_score, dec!(22));
        assert_eq!(a.score(&qb, &ctx, ScoreMode::Floor, Decimal::ONE).final_score, dec!(18));
    }

    #[test]
    fn floor_excludes_low_projections() {
        let players = vec![
            player(0, "Starter", Position::RunningBack, "KC", 6000, "12"),
            player(1, "Backup", Position::RunningBack, "KC", 4000, "0.5"),
        ];
        let pool = adjuster().build_pool(&players, &MatchupContext::new());
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.players()[0].name, "Starter");
    }

    #[test]
    fn seeded_variance_is_reproducible_and_drawn_per_player() {
        let config = AdjusterConfig {
            variance_pct: dec!(20),
            seed: Some(11),
            ..AdjusterConfig::default()
        };
        let a = ProjectionAdjuster::new(config);
        let players: Vec<ResolvedPlayer> = (0..5)
            .map(|i| player(i, &format!("Wr {i}"), Position::WideReceiver, "KC", 5000, "10"))
            .collect();
        let first = a.build_pool(&players, &MatchupContext::new());
        let second = a.build_pool(&players, &MatchupContext::new());
        let scores = |pool: &PlayerPool| pool.iter().map(|p| p.final_score).collect::<Vec<_>>();
        assert_eq!(scores(&first), scores(&second));
        assert!(scores(&first).iter().any(|s| *s != dec!(10)));
    }

    #[test]
    fn variance_off_policy_ignores_percentage() {
        let config = AdjusterConfig {
            variance_pct: dec!(30),
            variance_policy: VariancePolicy::Off,
            ..AdjusterConfig::default()
        };
        let a = ProjectionAdjuster::new(config);
        let players = vec![player(0, "Wr", Position::WideReceiver, "KC", 5000, "10")];
        let pool = a.build_pool(&players, &MatchupContext::new());
        assert_eq!(pool.players()[0].final_score, dec!(10));
    }
}
