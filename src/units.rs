// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar unit systems.
//!
//! A [`UnitSystem`] is the mixed-radix definition of one calendar: how many
//! seconds make a minute, minutes an hour, hours a day and, optionally, days a
//! month and months a year.  Ratios are `f64` and need not be integers, so a
//! "month" may be 30.4375 days long.
//!
//! | Instance | s/min | min/h | h/day | days/month | months/year |
//! |----------|-------|-------|-------|------------|-------------|
//! | [`UnitSystem::EARTH`] | 60 | 60 | 24 | 30.4375 | 12 |
//! | [`UnitSystem::KERBIN`] | 24 | 24 | 12 | 6.418476 | 66.23057 |
//!
//! Derived quantities such as [`UnitSystem::seconds_per_day`] are computed from
//! the current fields on every call; nothing is cached.

use crate::error::{check_ratio, ClockError, Result};
use qtty::{Days, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of the Earth calendar year used for year/day grouping.
pub const EARTH_DAYS_PER_YEAR: Days = Days::new(365.25);

/// Days-per-month and months-per-year, present or absent together.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonthRatios {
    pub days_per_month: f64,
    pub months_per_year: f64,
}

/// One of the five editable ratios of a [`UnitSystem`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Ratio {
    SecondsPerMinute,
    MinutesPerHour,
    HoursPerDay,
    DaysPerMonth,
    MonthsPerYear,
}

impl Ratio {
    /// All ratios, smallest unit first.
    pub const ALL: [Ratio; 5] = [
        Ratio::SecondsPerMinute,
        Ratio::MinutesPerHour,
        Ratio::HoursPerDay,
        Ratio::DaysPerMonth,
        Ratio::MonthsPerYear,
    ];

    /// Human-readable name, also used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Ratio::SecondsPerMinute => "seconds per minute",
            Ratio::MinutesPerHour => "minutes per hour",
            Ratio::HoursPerDay => "hours per day",
            Ratio::DaysPerMonth => "days per month",
            Ratio::MonthsPerYear => "months per year",
        }
    }

    /// Key under which the planet's value of this ratio is persisted.
    pub const fn key(self) -> &'static str {
        match self {
            Ratio::SecondsPerMinute => "kerbinSecondsPerMinute",
            Ratio::MinutesPerHour => "kerbinMinutesPerHour",
            Ratio::HoursPerDay => "kerbinHoursPerDay",
            Ratio::DaysPerMonth => "kerbinDaysPerMonth",
            Ratio::MonthsPerYear => "kerbinMonthsPerYear",
        }
    }

    /// `true` for the two ratios that only exist on systems with months.
    pub const fn is_month_ratio(self) -> bool {
        matches!(self, Ratio::DaysPerMonth | Ratio::MonthsPerYear)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mixed-radix definition of a calendar.
///
/// Construction validates every ratio; a value of `UnitSystem` therefore
/// always holds finite, strictly positive ratios.  Edits go through
/// [`UnitSystem::with_ratio`], which returns a new system and leaves the
/// receiver untouched, so a rejected edit never disturbs the last good one.
/// Deserialization runs the same checks.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "RawUnitSystem")
)]
pub struct UnitSystem {
    seconds_per_minute: f64,
    minutes_per_hour: f64,
    hours_per_day: f64,
    months: Option<MonthRatios>,
}

/// Unvalidated wire form of [`UnitSystem`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawUnitSystem {
    seconds_per_minute: f64,
    minutes_per_hour: f64,
    hours_per_day: f64,
    months: Option<MonthRatios>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUnitSystem> for UnitSystem {
    type Error = ClockError;

    fn try_from(raw: RawUnitSystem) -> Result<Self> {
        let units = UnitSystem::new(raw.seconds_per_minute, raw.minutes_per_hour, raw.hours_per_day)?;
        match raw.months {
            Some(m) => units.with_months(m.days_per_month, m.months_per_year),
            None => Ok(units),
        }
    }
}

impl UnitSystem {
    /// Earth: 60 s/min, 60 min/h, 24 h/day, 365.25/12 days/month, 12 months/year.
    pub const EARTH: Self = Self {
        seconds_per_minute: 60.0,
        minutes_per_hour: 60.0,
        hours_per_day: 24.0,
        months: Some(MonthRatios {
            days_per_month: 365.25 / 12.0,
            months_per_year: 12.0,
        }),
    };

    /// Default ratios of the fictional planet calendar.
    pub const KERBIN: Self = Self {
        seconds_per_minute: 24.0,
        minutes_per_hour: 24.0,
        hours_per_day: 12.0,
        months: Some(MonthRatios {
            days_per_month: 6.418476,
            months_per_year: 66.23057,
        }),
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Build a day-granular system (no months).
    pub fn new(seconds_per_minute: f64, minutes_per_hour: f64, hours_per_day: f64) -> Result<Self> {
        Ok(Self {
            seconds_per_minute: check_ratio(Ratio::SecondsPerMinute.name(), seconds_per_minute)?,
            minutes_per_hour: check_ratio(Ratio::MinutesPerHour.name(), minutes_per_hour)?,
            hours_per_day: check_ratio(Ratio::HoursPerDay.name(), hours_per_day)?,
            months: None,
        })
    }

    /// Add (or replace) the month ratios.
    pub fn with_months(self, days_per_month: f64, months_per_year: f64) -> Result<Self> {
        Ok(Self {
            months: Some(MonthRatios {
                days_per_month: check_ratio(Ratio::DaysPerMonth.name(), days_per_month)?,
                months_per_year: check_ratio(Ratio::MonthsPerYear.name(), months_per_year)?,
            }),
            ..self
        })
    }

    /// Drop month granularity.
    pub fn without_months(self) -> Self {
        Self {
            months: None,
            ..self
        }
    }

    /// Return a copy with one ratio replaced.
    ///
    /// Fails with [`ClockError::InvalidRatio`] for non-positive or non-finite
    /// values, and with [`ClockError::MissingMonthRatios`] when a month ratio is
    /// edited on a system that has none.
    pub fn with_ratio(self, ratio: Ratio, value: f64) -> Result<Self> {
        let value = check_ratio(ratio.name(), value)?;
        let mut next = self;
        match ratio {
            Ratio::SecondsPerMinute => next.seconds_per_minute = value,
            Ratio::MinutesPerHour => next.minutes_per_hour = value,
            Ratio::HoursPerDay => next.hours_per_day = value,
            Ratio::DaysPerMonth => {
                next.months
                    .as_mut()
                    .ok_or(ClockError::MissingMonthRatios)?
                    .days_per_month = value
            }
            Ratio::MonthsPerYear => {
                next.months
                    .as_mut()
                    .ok_or(ClockError::MissingMonthRatios)?
                    .months_per_year = value
            }
        }
        Ok(next)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn seconds_per_minute(&self) -> f64 {
        self.seconds_per_minute
    }

    #[inline]
    pub const fn minutes_per_hour(&self) -> f64 {
        self.minutes_per_hour
    }

    #[inline]
    pub const fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    #[inline]
    pub const fn months(&self) -> Option<MonthRatios> {
        self.months
    }

    /// Current value of `ratio`, or `None` for a month ratio on a system
    /// without months.
    pub fn ratio(&self, ratio: Ratio) -> Option<f64> {
        match ratio {
            Ratio::SecondsPerMinute => Some(self.seconds_per_minute),
            Ratio::MinutesPerHour => Some(self.minutes_per_hour),
            Ratio::HoursPerDay => Some(self.hours_per_day),
            Ratio::DaysPerMonth => self.months.map(|m| m.days_per_month),
            Ratio::MonthsPerYear => self.months.map(|m| m.months_per_year),
        }
    }

    // ── derived quantities ────────────────────────────────────────────

    #[inline]
    pub fn seconds_per_hour(&self) -> f64 {
        self.seconds_per_minute * self.minutes_per_hour
    }

    /// `seconds_per_minute · minutes_per_hour · hours_per_day`.
    #[inline]
    pub fn seconds_per_day(&self) -> f64 {
        self.seconds_per_hour() * self.hours_per_day
    }

    pub fn seconds_per_month(&self) -> Option<f64> {
        self.months
            .map(|m| self.seconds_per_day() * m.days_per_month)
    }

    pub fn seconds_per_year(&self) -> Option<f64> {
        self.months
            .map(|m| self.seconds_per_day() * m.days_per_month * m.months_per_year)
    }

    /// `days_per_month · months_per_year`, when months are defined.
    pub fn days_per_year(&self) -> Option<f64> {
        self.months.map(|m| m.days_per_month * m.months_per_year)
    }

    /// Local seconds elapsed per external second, given how many external
    /// seconds one local day lasts.
    ///
    /// Used to turn simulation time into planet time: a planet whose
    /// `seconds_per_day` is 6 912 and whose day lasts 21 650 simulation seconds
    /// ticks ≈0.319 planet seconds per simulation second.
    pub fn rescale_factor(&self, external_seconds_per_day: f64) -> Result<f64> {
        let external = check_ratio("external seconds per day", external_seconds_per_day)?;
        Ok(self.seconds_per_day() / external)
    }

    /// Convert `external_seconds` into local seconds.
    ///
    /// Multiplies before dividing, so whole external days land on whole local
    /// days exactly (`21 650 · 6 912 / 21 650 == 6 912`), which a precomputed
    /// [`rescale_factor`](Self::rescale_factor) cannot guarantee.
    pub fn rescale(&self, external_seconds: f64, external_seconds_per_day: f64) -> Result<f64> {
        let external = check_ratio("external seconds per day", external_seconds_per_day)?;
        Ok(external_seconds * self.seconds_per_day() / external)
    }

    /// Number of local days in one orbit lasting `period` local seconds.
    pub fn days_per_orbit(&self, period: Seconds) -> Result<f64> {
        let period = check_ratio("orbital period", period.value())?;
        Ok(period / self.seconds_per_day())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Presets
// ═══════════════════════════════════════════════════════════════════════════

/// Known planet calendars.
///
/// Older releases disagreed on the planet's day: one counted solar days on
/// 24/24/12 ratios, another counted sidereal days on 60/60/6.  Both survive
/// as presets rather than one being declared canonical.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlanetPreset {
    /// 24 s/min, 24 min/h, 12 h/day; one day = 6 h 50 s of simulation time.
    KerbinSolar,
    /// 60 s/min, 60 min/h, 6 h/day; 38.6-hour months, 2 556.5-hour years.
    KerbinSidereal,
}

impl PlanetPreset {
    pub const ALL: [PlanetPreset; 2] = [PlanetPreset::KerbinSolar, PlanetPreset::KerbinSidereal];

    pub fn units(self) -> UnitSystem {
        match self {
            PlanetPreset::KerbinSolar => UnitSystem::KERBIN,
            PlanetPreset::KerbinSidereal => UnitSystem {
                seconds_per_minute: 60.0,
                minutes_per_hour: 60.0,
                hours_per_day: 6.0,
                months: Some(MonthRatios {
                    days_per_month: 38.6 / 6.0,
                    months_per_year: 2556.5 / 38.6,
                }),
            },
        }
    }

    /// Simulation seconds in one planet day.
    pub fn sim_seconds_per_day(self) -> f64 {
        match self {
            PlanetPreset::KerbinSolar => 6.0 * 3600.0 + 50.0,
            PlanetPreset::KerbinSidereal => 6.0 * 3600.0,
        }
    }
}

impl fmt::Display for PlanetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanetPreset::KerbinSolar => f.write_str("solar days"),
            PlanetPreset::KerbinSidereal => f.write_str("sidereal days"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
