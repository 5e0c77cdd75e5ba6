// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Decomposition output and its text rendering.
//!
//! A [`TimeBreakdown`] is a snapshot of one scalar time split into
//! years/months/days/hours/minutes/seconds.  Its [`Display`](fmt::Display)
//! implementation depends on the [`Mode`] it was produced in:
//!
//! | Mode | Grouping | Example |
//! |------|----------|---------|
//! | Absolute | year/month/day | `01:01:01 00:00:00` |
//! | Absolute | year/day | `01:01 00:00:00` |
//! | Elapsed | any | `00:00:05`, `3d 04:05:06`, `1y 0m 0d 00:00:05` |

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a scalar time is interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Calendar stamp since the epoch; years, months and days are 1-indexed.
    Absolute,
    /// Duration; every unit counts from zero and leading zero units are hidden.
    Elapsed,
}

/// Which date units the day count is grouped into.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Grouping {
    /// Days roll into months, months into years.
    YearMonthDay,
    /// Days roll straight into years of `days_per_year` days; no month field.
    YearDay { days_per_year: f64 },
}

impl Grouping {
    #[inline]
    pub const fn has_months(&self) -> bool {
        matches!(self, Grouping::YearMonthDay)
    }
}

/// Result of decomposing one scalar time value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeBreakdown {
    pub mode: Mode,
    pub years: i64,
    /// `None` under [`Grouping::YearDay`].
    pub months: Option<i64>,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeBreakdown {
    /// `(hours, minutes, seconds)`.
    #[inline]
    pub const fn time_of_day(&self) -> (i64, i64, i64) {
        (self.hours, self.minutes, self.seconds)
    }

    fn write_clock(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }

    fn write_absolute(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:", self.years)?;
        if let Some(months) = self.months {
            write!(f, "{:02}:", months)?;
        }
        write!(f, "{:02} ", self.days)?;
        self.write_clock(f)
    }

    fn write_elapsed(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Largest unit first; once one is shown every smaller one is too.
        let mut shown = false;
        let leading = [
            (Some(self.years), 'y'),
            (self.months, 'm'),
            (Some(self.days), 'd'),
        ];
        for (value, suffix) in leading {
            let Some(value) = value else { continue };
            shown |= value != 0;
            if shown {
                write!(f, "{value}{suffix} ")?;
            }
        }
        self.write_clock(f)
    }
}

impl fmt::Display for TimeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::Absolute => self.write_absolute(f),
            Mode::Elapsed => self.write_elapsed(f),
        }
    }
}

/// Format an integer with `,` between groups of three digits.
///
/// ```
/// assert_eq!(horologe::group_thousands(1_234_567), "1,234,567");
/// assert_eq!(horologe::group_thousands(-1_000), "-1,000");
/// ```
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(mode: Mode, ymd: (i64, Option<i64>, i64), hms: (i64, i64, i64)) -> TimeBreakdown {
        TimeBreakdown {
            mode,
            years: ymd.0,
            months: ymd.1,
            days: ymd.2,
            hours: hms.0,
            minutes: hms.1,
            seconds: hms.2,
        }
    }

    #[test]
    fn test_absolute_year_month_day() {
        let b = breakdown(Mode::Absolute, (1, Some(1), 1), (0, 0, 0));
        assert_eq!(b.to_string(), "01:01:01 00:00:00");

        let b = breakdown(Mode::Absolute, (12, Some(3), 27), (5, 9, 41));
        assert_eq!(b.to_string(), "12:03:27 05:09:41");
    }

    #[test]
    fn test_absolute_year_day() {
        let b = breakdown(Mode::Absolute, (1, None, 1), (0, 0, 0));
        assert_eq!(b.to_string(), "01:01 00:00:00");

        let b = breakdown(Mode::Absolute, (3, None, 247), (11, 0, 2));
        assert_eq!(b.to_string(), "03:247 11:00:02");
    }

    #[test]
    fn test_elapsed_hides_leading_zero_units() {
        let zero = breakdown(Mode::Elapsed, (0, Some(0), 0), (0, 0, 0));
        assert_eq!(zero.to_string(), "00:00:00");

        let hours = breakdown(Mode::Elapsed, (0, Some(0), 0), (4, 5, 6));
        assert_eq!(hours.to_string(), "04:05:06");

        let days = breakdown(Mode::Elapsed, (0, Some(0), 3), (4, 5, 6));
        assert_eq!(days.to_string(), "3d 04:05:06");
    }

    #[test]
    fn elapsed_shows_inner_zeros_below_a_non_zero_unit() {
        let b = breakdown(Mode::Elapsed, (1, Some(0), 0), (0, 0, 5));
        assert_eq!(b.to_string(), "1y 0m 0d 00:00:05");

        let b = breakdown(Mode::Elapsed, (0, Some(2), 0), (0, 0, 0));
        assert_eq!(b.to_string(), "2m 0d 00:00:00");
    }

    #[test]
    fn elapsed_without_months_skips_month_field() {
        let b = breakdown(Mode::Elapsed, (2, None, 0), (1, 2, 3));
        assert_eq!(b.to_string(), "2y 0d 01:02:03");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
        assert_eq!(group_thousands(-45_000), "-45,000");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn grouping_reports_months() {
        assert!(Grouping::YearMonthDay.has_months());
        assert!(!Grouping::YearDay { days_per_year: 365.25 }.has_months());
    }
}
