// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for clock configuration and decomposition.

use thiserror::Error;

/// Errors raised while building unit systems, editing the clock configuration,
/// or preparing a decomposition.
///
/// The decomposition arithmetic itself never fails; every variant here is
/// detected *before* any division happens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClockError {
    /// A unit ratio was zero, negative, or not finite.
    #[error("invalid {ratio}: {value} (must be a finite value greater than zero)")]
    InvalidRatio { ratio: &'static str, value: f64 },

    /// Year/month/day grouping was requested on a unit system without months.
    #[error("unit system has no month ratios")]
    MissingMonthRatios,

    /// A time value handed to the overlay was NaN or infinite.
    #[error("non-finite time value: {0}")]
    NonFiniteTime(f64),

    /// An epoch offset was NaN or infinite.
    #[error("non-finite epoch offset: {0}")]
    NonFiniteOffset(f64),

    /// A text field could not be parsed as a number.
    #[error("cannot parse {field} from {input:?}")]
    Parse { field: &'static str, input: String },

    /// Reading or writing the configuration file failed.
    #[error("config store I/O: {0}")]
    Io(String),

    /// The configuration file is not a flat JSON object.
    #[error("config store format: {0}")]
    Json(String),
}

impl From<std::io::Error> for ClockError {
    fn from(err: std::io::Error) -> Self {
        ClockError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClockError {
    fn from(err: serde_json::Error) -> Self {
        ClockError::Json(err.to_string())
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ClockError>;

/// Check that `value` is a usable ratio (finite and strictly positive).
pub(crate) fn check_ratio(ratio: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ClockError::InvalidRatio { ratio, value })
    }
}
