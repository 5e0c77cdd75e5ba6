// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use horologe::ClockError;

/// Status codes returned by horologe-ffi functions.
///
/// cbindgen:prefix-with-name
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorologeStatus {
    /// Success.
    Ok = 0,
    /// A required pointer was null.
    NullPointer = 1,
    /// A ratio is zero, negative, NaN or infinite.
    InvalidRatio = 2,
    /// Year/month/day grouping was requested on units without months.
    MissingMonthRatios = 3,
    /// A time or offset is NaN or infinite.
    NonFiniteTime = 4,
    /// The output buffer cannot hold the formatted text and its NUL.
    BufferTooSmall = 5,
    /// A Rust panic was caught at the boundary.
    Panic = 6,
    /// A library error with no dedicated code.
    Internal = 7,
}

impl From<ClockError> for HorologeStatus {
    fn from(err: ClockError) -> Self {
        match err {
            ClockError::InvalidRatio { .. } => HorologeStatus::InvalidRatio,
            ClockError::MissingMonthRatios => HorologeStatus::MissingMonthRatios,
            ClockError::NonFiniteTime(_) | ClockError::NonFiniteOffset(_) => {
                HorologeStatus::NonFiniteTime
            }
            // Text parsing and the config store are not exported.
            ClockError::Parse { .. } | ClockError::Io(_) | ClockError::Json(_) => {
                HorologeStatus::Internal
            }
        }
    }
}

/// Run `$body`, turning an unwinding panic into `$on_panic`.
#[macro_export]
macro_rules! catch_panic {
    ($on_panic:expr, $body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| $body)) {
            Ok(status) => status,
            Err(_) => $on_panic,
        }
    };
}
