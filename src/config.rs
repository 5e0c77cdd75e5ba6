// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Mutable clock settings.
//!
//! [`ClockConfiguration`] is the only state that outlives a single
//! decomposition.  It is created with defaults, edited in place by the user,
//! and merged from / written to a [`ConfigStore`] at load/save points chosen by
//! the host.
//!
//! Loading is a **merge**: every key is read on its own, and a key that is
//! absent, unreadable or out of range leaves the in-memory value untouched.
//! Edits are validated the same way, so a rejected edit keeps the last good
//! value.

use crate::breakdown::Grouping;
use crate::error::{ClockError, Result};
use crate::store::ConfigStore;
use crate::units::{PlanetPreset, Ratio, UnitSystem, EARTH_DAYS_PER_YEAR};
use qtty::Seconds;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Persisted key names.
///
/// Kept identical to the names used by earlier save files.
pub mod keys {
    pub const DEBUG: &str = "debug";
    pub const SHOW_MONTHS: &str = "showMonths";
    pub const EPOCH_OFFSET: &str = "initialOffsetInEarthSeconds";
    pub const SIM_SECONDS_PER_PLANET_DAY: &str = "earthSecondsPerKerbinDay";
    pub const PLANET_ORBITAL_PERIOD: &str = "kerbinOrbitalPeriod";
}

/// The five displayable clocks, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockKind {
    /// Absolute simulation seconds.
    Universal,
    /// Earth calendar.
    Earth,
    /// Fictional planet calendar.
    Planet,
    /// Mission elapsed time.
    Mission,
    /// Host wall clock.
    Real,
}

impl ClockKind {
    pub const ALL: [ClockKind; 5] = [
        ClockKind::Universal,
        ClockKind::Earth,
        ClockKind::Planet,
        ClockKind::Mission,
        ClockKind::Real,
    ];

    /// Short label shown in front of the clock's value.
    pub const fn label(self) -> &'static str {
        match self {
            ClockKind::Universal => "UT",
            ClockKind::Earth => "ET",
            ClockKind::Planet => "KT",
            ClockKind::Mission => "MET",
            ClockKind::Real => "RT",
        }
    }

    /// Key of this clock's visibility flag.
    pub const fn key(self) -> &'static str {
        match self {
            ClockKind::Universal => "showingUniversalTime",
            ClockKind::Earth => "showingEarthTime",
            ClockKind::Planet => "showingKerbinTime",
            ClockKind::Mission => "showingMissionTime",
            ClockKind::Real => "showingRealTime",
        }
    }
}

impl fmt::Display for ClockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-clock visibility flags.  Every clock is shown by default.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockVisibility {
    pub universal: bool,
    pub earth: bool,
    pub planet: bool,
    pub mission: bool,
    pub real: bool,
}

impl Default for ClockVisibility {
    fn default() -> Self {
        Self {
            universal: true,
            earth: true,
            planet: true,
            mission: true,
            real: true,
        }
    }
}

impl ClockVisibility {
    pub fn is_shown(&self, kind: ClockKind) -> bool {
        *self.flag(kind)
    }

    pub fn set_shown(&mut self, kind: ClockKind, shown: bool) {
        *self.flag_mut(kind) = shown;
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&mut self, kind: ClockKind) -> bool {
        let flag = self.flag_mut(kind);
        *flag = !*flag;
        *flag
    }

    fn flag(&self, kind: ClockKind) -> &bool {
        match kind {
            ClockKind::Universal => &self.universal,
            ClockKind::Earth => &self.earth,
            ClockKind::Planet => &self.planet,
            ClockKind::Mission => &self.mission,
            ClockKind::Real => &self.real,
        }
    }

    fn flag_mut(&mut self, kind: ClockKind) -> &mut bool {
        match kind {
            ClockKind::Universal => &mut self.universal,
            ClockKind::Earth => &mut self.earth,
            ClockKind::Planet => &mut self.planet,
            ClockKind::Mission => &mut self.mission,
            ClockKind::Real => &mut self.real,
        }
    }
}

/// Outcome of [`ClockConfiguration::load`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Keys read and applied.
    pub applied: usize,
    /// Keys absent, unreadable or rejected; their fields kept the prior value.
    pub kept: usize,
}

/// User-facing clock settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfiguration {
    pub visibility: ClockVisibility,
    /// Year/month/day when `true`, year/day otherwise.
    pub show_months: bool,
    /// Adds the sidereal planet line.
    pub debug: bool,
    epoch_offset: f64,
    planet: UnitSystem,
    sim_seconds_per_planet_day: f64,
    planet_orbital_period: Seconds,
}

impl Default for ClockConfiguration {
    fn default() -> Self {
        Self {
            visibility: ClockVisibility::default(),
            show_months: true,
            debug: false,
            epoch_offset: 0.0,
            planet: PlanetPreset::KerbinSolar.units(),
            sim_seconds_per_planet_day: PlanetPreset::KerbinSolar.sim_seconds_per_day(),
            planet_orbital_period: Self::DEFAULT_ORBITAL_PERIOD,
        }
    }
}

impl ClockConfiguration {
    /// Default planet orbital period, in simulation seconds.
    pub const DEFAULT_ORBITAL_PERIOD: Seconds = Seconds::new(9_203_545.0);

    pub fn new() -> Self {
        Self::default()
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Simulation seconds added to the clock before the planet calendar is
    /// decomposed.
    #[inline]
    pub fn epoch_offset(&self) -> f64 {
        self.epoch_offset
    }

    #[inline]
    pub fn planet(&self) -> &UnitSystem {
        &self.planet
    }

    #[inline]
    pub fn sim_seconds_per_planet_day(&self) -> f64 {
        self.sim_seconds_per_planet_day
    }

    #[inline]
    pub fn planet_orbital_period(&self) -> Seconds {
        self.planet_orbital_period
    }

    /// Planet seconds elapsed per simulation second.
    pub fn planet_rescale_factor(&self) -> Result<f64> {
        self.planet.rescale_factor(self.sim_seconds_per_planet_day)
    }

    /// Planet days in one orbit, used for year/day grouping.
    pub fn planet_days_per_year(&self) -> Result<f64> {
        let period = self
            .planet
            .rescale(self.planet_orbital_period.value(), self.sim_seconds_per_planet_day)?;
        self.planet.days_per_orbit(Seconds::new(period))
    }

    pub fn earth_grouping(&self) -> Grouping {
        if self.show_months {
            Grouping::YearMonthDay
        } else {
            Grouping::YearDay {
                days_per_year: EARTH_DAYS_PER_YEAR.value(),
            }
        }
    }

    /// Year/month/day only when months are enabled *and* the planet has them.
    pub fn planet_grouping(&self) -> Result<Grouping> {
        if self.show_months && self.planet.months().is_some() {
            Ok(Grouping::YearMonthDay)
        } else {
            Ok(Grouping::YearDay {
                days_per_year: self.planet_days_per_year()?,
            })
        }
    }

    // ── validated edits ───────────────────────────────────────────────

    /// Replace one planet ratio.  An invalid value is rejected and the
    /// previous ratio stays in effect.
    pub fn set_planet_ratio(&mut self, ratio: Ratio, value: f64) -> Result<()> {
        let next = self
            .planet
            .with_ratio(ratio, value)
            .map_err(|err| rejected(ratio.name(), value, err))?;
        self.planet = next;
        Ok(())
    }

    /// Parse a ratio typed into a text field, then apply it.
    pub fn set_planet_ratio_text(&mut self, ratio: Ratio, text: &str) -> Result<()> {
        let value = parse_field(ratio.name(), text)?;
        self.set_planet_ratio(ratio, value)
    }

    /// Replace the whole planet unit system.
    pub fn set_planet(&mut self, units: UnitSystem) {
        self.planet = units;
    }

    pub fn set_epoch_offset(&mut self, offset: f64) -> Result<()> {
        if !offset.is_finite() {
            return Err(rejected(
                "epoch offset",
                offset,
                ClockError::NonFiniteOffset(offset),
            ));
        }
        self.epoch_offset = offset;
        Ok(())
    }

    pub fn set_epoch_offset_text(&mut self, text: &str) -> Result<()> {
        let value = parse_field("epoch offset", text)?;
        self.set_epoch_offset(value)
    }

    pub fn set_sim_seconds_per_planet_day(&mut self, seconds: f64) -> Result<()> {
        crate::error::check_ratio("simulation seconds per planet day", seconds)
            .map_err(|err| rejected("simulation seconds per planet day", seconds, err))?;
        self.sim_seconds_per_planet_day = seconds;
        Ok(())
    }

    pub fn set_planet_orbital_period(&mut self, period: Seconds) -> Result<()> {
        crate::error::check_ratio("orbital period", period.value())
            .map_err(|err| rejected("orbital period", period.value(), err))?;
        self.planet_orbital_period = period;
        Ok(())
    }

    /// Switch the planet calendar to a known preset.
    pub fn apply_preset(&mut self, preset: PlanetPreset) {
        self.planet = preset.units();
        self.sim_seconds_per_planet_day = preset.sim_seconds_per_day();
        tracing::debug!(%preset, "applied planet preset");
    }

    // ── persistence ───────────────────────────────────────────────────

    /// Merge settings from `store`.
    ///
    /// Each key is handled independently; a missing or bad key never stops
    /// the rest of the load.
    pub fn load(&mut self, store: &impl ConfigStore) -> LoadReport {
        let mut report = LoadReport::default();

        merge_bool(store, keys::DEBUG, &mut self.debug, &mut report);
        merge_bool(store, keys::SHOW_MONTHS, &mut self.show_months, &mut report);
        for kind in ClockKind::ALL {
            let mut shown = self.visibility.is_shown(kind);
            merge_bool(store, kind.key(), &mut shown, &mut report);
            self.visibility.set_shown(kind, shown);
        }

        self.merge_f64(store, keys::EPOCH_OFFSET, &mut report, |cfg, v| {
            cfg.set_epoch_offset(v)
        });
        self.merge_f64(store, keys::SIM_SECONDS_PER_PLANET_DAY, &mut report, |cfg, v| {
            cfg.set_sim_seconds_per_planet_day(v)
        });
        self.merge_f64(store, keys::PLANET_ORBITAL_PERIOD, &mut report, |cfg, v| {
            cfg.set_planet_orbital_period(Seconds::new(v))
        });

        // A planet without months gains them only when both ratios are valid.
        if self.planet.months().is_none() {
            let dpm = store.get_f64(Ratio::DaysPerMonth.key());
            let mpy = store.get_f64(Ratio::MonthsPerYear.key());
            if let (Some(dpm), Some(mpy)) = (dpm, mpy) {
                if let Ok(units) = self.planet.with_months(dpm, mpy) {
                    self.planet = units;
                }
            }
        }
        for ratio in Ratio::ALL {
            self.merge_f64(store, ratio.key(), &mut report, |cfg, v| {
                cfg.set_planet_ratio(ratio, v)
            });
        }

        tracing::debug!(applied = report.applied, kept = report.kept, "merged clock settings");
        report
    }

    /// Write every setting to `store`.
    pub fn save(&self, store: &mut impl ConfigStore) {
        store.set_bool(keys::DEBUG, self.debug);
        store.set_bool(keys::SHOW_MONTHS, self.show_months);
        for kind in ClockKind::ALL {
            store.set_bool(kind.key(), self.visibility.is_shown(kind));
        }
        store.set_f64(keys::EPOCH_OFFSET, self.epoch_offset);
        store.set_f64(keys::SIM_SECONDS_PER_PLANET_DAY, self.sim_seconds_per_planet_day);
        store.set_f64(keys::PLANET_ORBITAL_PERIOD, self.planet_orbital_period.value());
        for ratio in Ratio::ALL {
            if let Some(value) = self.planet.ratio(ratio) {
                store.set_f64(ratio.key(), value);
            }
        }
        tracing::debug!("saved clock settings");
    }

    fn merge_f64(
        &mut self,
        store: &impl ConfigStore,
        key: &str,
        report: &mut LoadReport,
        apply: impl FnOnce(&mut Self, f64) -> Result<()>,
    ) {
        match store.get_f64(key) {
            Some(value) => match apply(self, value) {
                Ok(()) => report.applied += 1,
                Err(_) => report.kept += 1,
            },
            None => {
                tracing::debug!(key, "config key absent or unreadable; keeping current value");
                report.kept += 1;
            }
        }
    }
}

fn merge_bool(store: &impl ConfigStore, key: &str, field: &mut bool, report: &mut LoadReport) {
    match store.get_bool(key) {
        Some(value) => {
            *field = value;
            report.applied += 1;
        }
        None => {
            tracing::debug!(key, "config key absent or unreadable; keeping current value");
            report.kept += 1;
        }
    }
}

fn parse_field(field: &'static str, text: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| {
        tracing::warn!(field, input = text, "rejected unparsable edit");
        ClockError::Parse {
            field,
            input: text.to_owned(),
        }
    })
}

fn rejected(field: &'static str, value: f64, err: ClockError) -> ClockError {
    tracing::warn!(field, value, error = %err, "rejected edit; keeping previous value");
    err
}
