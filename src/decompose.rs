// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Mixed-radix time decomposition.
//!
//! One routine serves every calendar: the [`UnitSystem`] supplies the radices,
//! the [`Grouping`] decides whether days roll into months or straight into
//! years, and the [`Mode`] decides whether the result is a 1-indexed calendar
//! stamp or a zero-based duration.
//!
//! Each step divides the running count `n` by a ratio `r` and keeps
//!
//! ```text
//! q   = trunc(n / r)
//! rem = n − trunc(q · r)
//! ```
//!
//! so non-integer ratios (a 30.4375-day month) never carry fractional
//! remainders forward.  [`Decomposer::recompose`] applies the same steps in
//! reverse and reproduces the truncated input exactly.
//!
//! Fields stay in range only while the running count fits an `f64` mantissa
//! (|n| ≤ 2⁵³ base units).  Above that `n as f64` rounds, `trunc(q · r)` can
//! exceed `n` and a remainder can go negative; the recompose law still holds.
//!
//! ## Quick Example
//! ```rust
//! use horologe::{Decomposer, Grouping, UnitSystem};
//!
//! let earth = Decomposer::new(UnitSystem::EARTH, Grouping::YearMonthDay)?;
//! assert_eq!(earth.absolute(0.0, 0.0).to_string(), "01:01:01 00:00:00");
//! assert_eq!(earth.elapsed(3_725.0).to_string(), "01:02:05");
//! # Ok::<(), horologe::ClockError>(())
//! ```

use crate::breakdown::{Grouping, Mode, TimeBreakdown};
use crate::error::{check_ratio, ClockError, Result};
use crate::units::UnitSystem;

/// Split `n` into `(trunc(n / ratio), remainder)`.
///
/// `as i64` truncates toward zero and saturates on overflow, so the step is
/// total even for absurd inputs.  Exact only for `|n| <= 2^53`.
#[inline]
fn split(n: i64, ratio: f64) -> (i64, i64) {
    let q = (n as f64 / ratio) as i64;
    (q, n - carried(q, ratio))
}

/// Whole lower units contained in `q` higher units.
#[inline]
fn carried(q: i64, ratio: f64) -> i64 {
    (q as f64 * ratio) as i64
}

/// A unit system paired with a validated grouping.
///
/// Holding a `Decomposer` means the grouping is compatible with the unit
/// system, so [`absolute`](Self::absolute) and [`elapsed`](Self::elapsed)
/// cannot fail.  The struct is a cheap `Copy` snapshot; build a new one after
/// the ratios change.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Decomposer {
    units: UnitSystem,
    grouping: Grouping,
}

impl Decomposer {
    /// Pair `units` with `grouping`.
    ///
    /// Fails with [`ClockError::MissingMonthRatios`] when year/month/day
    /// grouping is requested on a system without months, and with
    /// [`ClockError::InvalidRatio`] for a non-positive `days_per_year`.
    pub fn new(units: UnitSystem, grouping: Grouping) -> Result<Self> {
        match grouping {
            Grouping::YearMonthDay if units.months().is_none() => {
                return Err(ClockError::MissingMonthRatios)
            }
            Grouping::YearDay { days_per_year } => {
                check_ratio("days per year", days_per_year)?;
            }
            Grouping::YearMonthDay => {}
        }
        Ok(Self { units, grouping })
    }

    #[inline]
    pub const fn units(&self) -> &UnitSystem {
        &self.units
    }

    #[inline]
    pub const fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Calendar stamp of `elapsed + epoch_offset`, 1-indexed.
    #[inline]
    pub fn absolute(&self, elapsed: f64, epoch_offset: f64) -> TimeBreakdown {
        self.decompose(elapsed + epoch_offset, Mode::Absolute)
    }

    /// Duration breakdown of `elapsed`, zero-based.
    #[inline]
    pub fn elapsed(&self, elapsed: f64) -> TimeBreakdown {
        self.decompose(elapsed, Mode::Elapsed)
    }

    /// Decompose the scalar `t` (base-unit seconds) in the given mode.
    pub fn decompose(&self, t: f64, mode: Mode) -> TimeBreakdown {
        let units = &self.units;
        let total = t.trunc() as i64;

        let (minutes, seconds) = split(total, units.seconds_per_minute());
        let (hours, minutes) = split(minutes, units.minutes_per_hour());
        let (days, hours) = split(hours, units.hours_per_day());

        let (years, months, days) = match (self.grouping, units.months()) {
            (Grouping::YearMonthDay, Some(m)) => {
                let (months, days) = split(days, m.days_per_month);
                let (years, months) = split(months, m.months_per_year);
                (years, Some(months), days)
            }
            (Grouping::YearDay { days_per_year }, _) => {
                let (years, days) = split(days, days_per_year);
                (years, None, days)
            }
            // Rejected by `new`.
            (Grouping::YearMonthDay, None) => (0, None, days),
        };

        let mut out = TimeBreakdown {
            mode,
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        };
        if mode == Mode::Absolute {
            // Year 1, month 1, day 1 at t = 0.
            out.years = out.years.saturating_add(1);
            out.months = out.months.map(|m| m.saturating_add(1));
            out.days = out.days.saturating_add(1);
        }
        out
    }

    /// Total base-unit seconds represented by `breakdown`.
    ///
    /// Inverse of [`decompose`](Self::decompose): for any `t` produced under
    /// the same unit system and grouping, `recompose(decompose(t)) ==
    /// trunc(t)`.
    pub fn recompose(&self, breakdown: &TimeBreakdown) -> i64 {
        let units = &self.units;
        let index = i64::from(breakdown.mode == Mode::Absolute);

        let years = breakdown.years - index;
        let days = breakdown.days - index;
        let days = match (self.grouping, units.months(), breakdown.months) {
            (Grouping::YearMonthDay, Some(m), Some(months)) => {
                let months = months - index + carried(years, m.months_per_year);
                days + carried(months, m.days_per_month)
            }
            (Grouping::YearDay { days_per_year }, _, _) => days + carried(years, days_per_year),
            _ => days,
        };
        let hours = breakdown.hours + carried(days, units.hours_per_day());
        let minutes = breakdown.minutes + carried(hours, units.minutes_per_hour());
        breakdown.seconds + carried(minutes, units.seconds_per_minute())
    }
}

/// Decompose `elapsed + epoch_offset` under `units` in one call.
///
/// Convenience wrapper over [`Decomposer`]; the epoch offset only applies in
/// [`Mode::Absolute`].
pub fn decompose(
    elapsed: f64,
    units: &UnitSystem,
    epoch_offset: f64,
    grouping: Grouping,
    mode: Mode,
) -> Result<TimeBreakdown> {
    let decomposer = Decomposer::new(*units, grouping)?;
    Ok(match mode {
        Mode::Absolute => decomposer.absolute(elapsed, epoch_offset),
        Mode::Elapsed => decomposer.elapsed(elapsed),
    })
}
