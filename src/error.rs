use std::fmt;

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// The pool cannot support a lineup; raised before any solve is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("no DST entry in the player pool; cannot build lineups")]
    MissingDefense,

    #[error("only {available} eligible players, a lineup needs {required}")]
    InsufficientPlayers { available: usize, required: usize },
}

/// An external collaborator that feeds the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Pricing,
    PrimaryProjections,
    FallbackProjections,
    MatchupOdds,
    ManualOverrides,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pricing => "salary file",
            Self::PrimaryProjections => "primary projections",
            Self::FallbackProjections => "fallback projections",
            Self::MatchupOdds => "matchup odds",
            Self::ManualOverrides => "manual overrides",
        };
        f.write_str(name)
    }
}

/// A collaborator failed to supply its data.
#[derive(Error, Debug)]
#[error("{source_name} unavailable: {reason}")]
pub struct UpstreamError {
    pub source_name: DataSource,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("solver error: {0}")]
    Solver(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt error: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for an [`UpstreamError`].
    pub fn upstream(source_name: DataSource, reason: impl Into<String>) -> Self {
        Self::Upstream(UpstreamError {
            source_name,
            reason: reason.into(),
        })
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
