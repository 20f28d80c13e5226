//! Contest platforms and their salary caps.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A DFS contest platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    DraftKings,
    FanDuel,
}

impl Platform {
    /// Salary cap for a classic contest.
    #[must_use]
    pub const fn salary_cap(self) -> u32 {
        match self {
            Self::DraftKings => 50_000,
            Self::FanDuel => 60_000,
        }
    }

    /// Guess the platform from a salary export's file name.
    ///
    /// Names containing `draftkings` or `dk` are DraftKings exports; anything
    /// else is treated as FanDuel.
    pub fn detect(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.contains("draftkings") || name.contains("dk") {
            Self::DraftKings
        } else {
            Self::FanDuel
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DraftKings => "DraftKings",
            Self::FanDuel => "FanDuel",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draftkings" | "dk" => Ok(Self::DraftKings),
            "fanduel" | "fd" => Ok(Self::FanDuel),
            _ => Err(DomainError::UnknownPlatform {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_draftkings_from_filename() {
        assert_eq!(
            Platform::detect(Path::new("/tmp/DKSalaries_week3.csv")),
            Platform::DraftKings
        );
        assert_eq!(
            Platform::detect(Path::new("draftkings-main.csv")),
            Platform::DraftKings
        );
    }

    #[test]
    fn everything_else_is_fanduel() {
        assert_eq!(
            Platform::detect(Path::new("FanDuel-NFL-2024.csv")),
            Platform::FanDuel
        );
        assert_eq!(Platform::FanDuel.salary_cap(), 60_000);
        assert_eq!(Platform::DraftKings.salary_cap(), 50_000);
    }
}
