//! Domain validation errors for core domain types.
//!
//! These errors are returned by `try_new` constructors and parsers when a
//! boundary record violates a domain invariant. They let adapters reject a
//! malformed row instead of defaulting a missing field.
//!
//! # Examples
//!
//! ```
//! use lineforge::domain::error::DomainError;
//! use lineforge::domain::Position;
//!
//! let result: Result<Position, DomainError> = "K".parse();
//! assert!(matches!(result, Err(DomainError::UnknownPosition { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The position code is not one of QB, RB, WR, TE, DST.
    #[error("unknown position '{value}'")]
    UnknownPosition {
        /// The raw value that failed to parse.
        value: String,
    },

    /// A player name normalized to nothing.
    #[error("player name '{raw}' has no alphabetic characters")]
    EmptyName {
        /// The raw name as supplied.
        raw: String,
    },

    /// Salaries are positive integers.
    #[error("salary must be positive, got {salary}")]
    NonPositiveSalary {
        /// The invalid salary.
        salary: i64,
    },

    /// Projections are non-negative points.
    #[error("projection must be non-negative, got {projection}")]
    NegativeProjection {
        /// The invalid projection.
        projection: Decimal,
    },

    /// Platform names are `draftkings` or `fanduel`.
    #[error("unknown platform '{value}'")]
    UnknownPlatform {
        /// The raw value that failed to parse.
        value: String,
    },
}
