//! # Generator Error Types
//!
//! All errors that can occur in the generator.
//!
//! The computation itself is total; every variant here is a precondition
//! the caller failed to uphold, or a config file that could not be used.

use thiserror::Error;

/// Errors that can occur in the generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// A bounded draw was requested with an exclusive maximum of zero.
    #[error("invalid bound: exclusive maximum must be greater than zero")]
    InvalidBound,

    /// A palette (or a palette length) of zero entries was supplied.
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// Smoothness divisors must be positive and finite.
    #[error("invalid smoothness: x = {x}, y = {y}")]
    InvalidSmoothness {
        /// Divisor applied to the row coordinate.
        x: f64,
        /// Divisor applied to the column coordinate.
        y: f64,
    },

    /// A constant stream value outside [0, 1).
    #[error("constant stream value {0} is outside [0, 1)")]
    InvalidConstant(f64),

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),
}

/// Result type for generator operations.
pub type GeneratorResult<T> = Result<T, GeneratorError>;
