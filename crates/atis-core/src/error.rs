//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised while validating configuration or sampling demand.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid demand peak (mean {mean}, std {std}): {reason}")]
    InvalidPeak { mean: f64, std: f64, reason: String },

    #[error("no departure time inside ({lo}, {hi}) after {attempts} draws")]
    DepartureWindow { lo: f64, hi: f64, attempts: u32 },
}

/// Shorthand result type for `atis-core`.
pub type CoreResult<T> = Result<T, CoreError>;
