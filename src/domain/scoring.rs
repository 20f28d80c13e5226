//! Platform scoring rules for turning projected stat lines into points.
//!
//! Some projection sources publish raw stat projections rather than fantasy
//! points. Those lines are scored with the contest platform's rules before
//! identity resolution so every projected player carries a point total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::platform::Platform;

/// Projected raw statistics for one player. Missing categories are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub pass_yds: Decimal,
    pub pass_td: Decimal,
    pub pass_int: Decimal,
    pub rush_yds: Decimal,
    pub rush_td: Decimal,
    pub rec: Decimal,
    pub rec_yds: Decimal,
    pub rec_td: Decimal,
    pub fum_lost: Decimal,
}

/// Per-category point values plus yardage milestone bonuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    pub pass_yds: Decimal,
    pub pass_td: Decimal,
    pub pass_int: Decimal,
    pub rush_yds: Decimal,
    pub rush_td: Decimal,
    pub rec: Decimal,
    pub rec_yds: Decimal,
    pub rec_td: Decimal,
    pub fum_lost: Decimal,
    /// Bonus for reaching 300 passing or 100 rushing/receiving yards.
    pub milestone_bonus: Decimal,
}

impl ScoringRules {
    /// Full-PPR DraftKings scoring.
    #[must_use]
    pub fn draftkings() -> Self {
        Self {
            pass_yds: dec!(0.04),
            pass_td: dec!(4),
            pass_int: dec!(-1),
            rush_yds: dec!(0.1),
            rush_td: dec!(6),
            rec: dec!(1),
            rec_yds: dec!(0.1),
            rec_td: dec!(6),
            fum_lost: dec!(-1),
            milestone_bonus: dec!(3),
        }
    }

    /// Half-PPR FanDuel scoring.
    #[must_use]
    pub fn fanduel() -> Self {
        Self {
            rec: dec!(0.5),
            ..Self::draftkings()
        }
    }

    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::DraftKings => Self::draftkings(),
            Platform::FanDuel => Self::fanduel(),
        }
    }

    /// Score a stat line.
    #[must_use]
    pub fn score(&self, line: &StatLine) -> Decimal {
        let mut total = line.pass_yds * self.pass_yds
            + line.pass_td * self.pass_td
            + line.pass_int * self.pass_int
            + line.rush_yds * self.rush_yds
            + line.rush_td * self.rush_td
            + line.rec * self.rec
            + line.rec_yds * self.rec_yds
            + line.rec_td * self.rec_td
            + line.fum_lost * self.fum_lost;

        if line.pass_yds >= dec!(300) {
            total += self.milestone_bonus;
        }
        if line.rush_yds >= dec!(100) {
            total += self.milestone_bonus;
        }
        if line.rec_yds >= dec!(100) {
            total += self.milestone_bonus;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarterback_line_with_passing_bonus() {
        let line = StatLine {
            pass_yds: dec!(310),
            pass_td: dec!(2),
            pass_int: dec!(1),
            rush_yds: dec!(20),
            ..StatLine::default()
        };
        // 12.4 + 8 - 1 + 2 + 3
        assert_eq!(ScoringRules::draftkings().score(&line), dec!(24.4));
    }

    #[test]
    fn receptions_are_worth_less_on_fanduel() {
        let line = StatLine {
            rec: dec!(6),
            rec_yds: dec!(80),
            ..StatLine::default()
        };
        assert_eq!(ScoringRules::draftkings().score(&line), dec!(14.0));
        assert_eq!(ScoringRules::fanduel().score(&line), dec!(11.0));
    }

    #[test]
    fn milestones_stack() {
        let line = StatLine {
            rush_yds: dec!(100),
            rec_yds: dec!(100),
            ..StatLine::default()
        };
        assert_eq!(ScoringRules::fanduel().score(&line), dec!(26.0));
    }
}
