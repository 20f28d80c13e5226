//! Player name normalization.
//!
//! Salary files and projection sources disagree on punctuation, suffixes and
//! case ("D.J. Moore" vs "DJ Moore", "Patrick Mahomes II"). Every comparison
//! between the two sources happens on the normalized form: lower-case ASCII
//! letters only.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A player name reduced to lower-case ASCII letters.
///
/// The inner String is private so every value has gone through
/// [`NormalizedName::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedName(String);

impl NormalizedName {
    /// Normalize a raw name. The result may be empty.
    pub fn new(raw: &str) -> Self {
        Self(
            raw.to_lowercase()
                .chars()
                .filter(char::is_ascii_lowercase)
                .collect(),
        )
    }

    /// Normalize a raw name, rejecting names with no letters at all.
    pub fn try_new(raw: &str) -> Result<Self, DomainError> {
        let name = Self::new(raw);
        if name.is_empty() {
            return Err(DomainError::EmptyName {
                raw: raw.to_string(),
            });
        }
        Ok(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_digits_and_case() {
        assert_eq!(NormalizedName::new("D.J. Moore").as_str(), "djmoore");
        assert_eq!(NormalizedName::new("Amon-Ra St. Brown").as_str(), "amonrastbrown");
        assert_eq!(NormalizedName::new("49ers ").as_str(), "ers");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = NormalizedName::new("Patrick Mahomes II");
        let twice = NormalizedName::new(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn try_new_rejects_empty() {
        assert!(matches!(
            NormalizedName::try_new("  42 "),
            Err(DomainError::EmptyName { .. })
        ));
    }
}
