//! Identity resolver configuration.

use serde::{Deserialize, Serialize};

/// Fuzzy acceptance thresholds, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum similarity for skill positions.
    pub threshold: u8,
    /// Minimum similarity for defenses, whose naming varies far more.
    pub defense_threshold: u8,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            threshold: 85,
            defense_threshold: 50,
        }
    }
}
