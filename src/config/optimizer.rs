//! Optimizer and batch configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{Platform, PositionProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Contest platform; detected from the salary file name when absent.
    pub platform: Option<Platform>,
    pub profile: PositionProfile,
    /// Pool size below which the `auto` profile relaxes receiver minimums.
    pub small_pool_threshold: usize,
    pub stack_qb_wr: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            platform: None,
            profile: PositionProfile::Standard,
            small_pool_threshold: 150,
            stack_qb_wr: false,
        }
    }
}

/// How many lineups to build and how different they must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub count: usize,
    /// Minimum number of players each lineup must not share with every
    /// earlier lineup in the batch.
    pub min_uniqueness: usize,
    /// Maximum share of the batch, in percent, any one player may appear in.
    pub max_exposure_pct: Option<u32>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 3,
            min_uniqueness: 1,
            max_exposure_pct: None,
        }
    }
}
