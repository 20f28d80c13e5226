//! Roster positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A classic-contest roster position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "DST", alias = "D/ST", alias = "D")]
    Defense,
}

impl Position {
    /// All positions in roster display order.
    pub const ALL: [Self; 5] = [
        Self::Quarterback,
        Self::RunningBack,
        Self::WideReceiver,
        Self::TightEnd,
        Self::Defense,
    ];

    /// Short code used by salary and projection sources.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Quarterback => "QB",
            Self::RunningBack => "RB",
            Self::WideReceiver => "WR",
            Self::TightEnd => "TE",
            Self::Defense => "DST",
        }
    }

    /// Whether this is a pass-catching position (WR or TE).
    #[must_use]
    pub const fn is_receiving(self) -> bool {
        matches!(self, Self::WideReceiver | Self::TightEnd)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = DomainError;

    /// Parse a position code. Defense spellings `D/ST` and `D` map to DST.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Ok(Self::Quarterback),
            "RB" => Ok(Self::RunningBack),
            "WR" => Ok(Self::WideReceiver),
            "TE" => Ok(Self::TightEnd),
            "DST" | "D/ST" | "D" | "DEF" => Ok(Self::Defense),
            _ => Err(DomainError::UnknownPosition {
                value: s.to_string(),
            }),
        }
    }
}
