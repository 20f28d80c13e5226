//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section is optional and
//! falls back to its defaults, so an empty file is a valid configuration.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::ROSTER_SIZE;
use crate::error::{ConfigError, Result};

mod adjuster;
mod logging;
mod optimizer;
mod resolver;

pub use adjuster::{AdjusterConfig, AdjustmentRule, ScoreMode, Trigger, VariancePolicy};
pub use logging::LoggingConfig;
pub use optimizer::{BatchConfig, OptimizerConfig};
pub use resolver::ResolverConfig;

/// Main application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub adjuster: AdjusterConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("format", "must be \"pretty\" or \"json\""));
        }
        if self.resolver.threshold > 100 {
            return Err(invalid("threshold", "must be between 0 and 100"));
        }
        if self.resolver.defense_threshold > 100 {
            return Err(invalid("defense_threshold", "must be between 0 and 100"));
        }

        let adjuster = &self.adjuster;
        if adjuster.variance_pct < Decimal::ZERO || adjuster.variance_pct > dec!(100) {
            return Err(invalid("variance_pct", "must be between 0 and 100"));
        }
        if adjuster.min_projection < Decimal::ZERO {
            return Err(invalid("min_projection", "must be non-negative"));
        }
        if adjuster.ceiling_scale <= Decimal::ZERO {
            return Err(invalid("ceiling_scale", "must be positive"));
        }
        if adjuster.floor_scale <= Decimal::ZERO {
            return Err(invalid("floor_scale", "must be positive"));
        }

        if self.batch.count == 0 {
            return Err(invalid("count", "must be at least 1"));
        }
        if self.batch.min_uniqueness > ROSTER_SIZE {
            return Err(invalid(
                "min_uniqueness",
                format!("cannot exceed the roster size of {ROSTER_SIZE}"),
            ));
        }
        if let Some(pct) = self.batch.max_exposure_pct {
            if pct == 0 || pct > 100 {
                return Err(invalid("max_exposure_pct", "must be between 1 and 100"));
            }
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Platform, PositionProfile};
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.resolver.threshold, 85);
        assert_eq!(config.batch.count, 3);
    }

    #[test]
    fn parses_every_section() {
        let config = Config::parse(
            r#"
[logging]
level = "debug"
format = "json"

[resolver]
threshold = 80
defense_threshold = 45

[adjuster]
mode = "ceiling"
variance_pct = 10
seed = 7

[optimizer]
platform = "fanduel"
profile = "auto"
stack_qb_wr = true

[batch]
count = 20
min_uniqueness = 3
max_exposure_pct = 40
"#,
        )
        .unwrap();
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.resolver.defense_threshold, 45);
        assert_eq!(config.adjuster.mode, ScoreMode::Ceiling);
        assert_eq!(config.adjuster.variance_pct, dec!(10));
        assert_eq!(config.adjuster.seed, Some(7));
        assert_eq!(config.optimizer.platform, Some(Platform::FanDuel));
        assert_eq!(config.optimizer.profile, PositionProfile::Auto);
        assert_eq!(config.batch.max_exposure_pct, Some(40));
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let result = Config::parse("[resolver]\nthreshold = 101\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "threshold",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_zero_exposure() {
        let result = Config::parse("[batch]\nmax_exposure_pct = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "max_exposure_pct",
                ..
            }))
        ));
    }

    #[test]
    fn parses_explicit_rule_table() {
        let config = Config::parse(
            r#"
[[adjuster.rules]]
trigger = { kind = "favorite_by", points = 10 }
positions = ["RB"]
impact = 0.08

[[adjuster.rules]]
trigger = { kind = "total_at_most", points = 40 }
positions = ["DST"]
impact = 0.06
"#,
        )
        .unwrap();
        let rules = config.adjuster.rule_table();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].impact, dec!(0.08));
    }

    #[test]
    fn round_trips_through_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert_eq!(Config::parse(&rendered).unwrap(), Config::default());
    }
}
