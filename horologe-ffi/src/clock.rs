// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! FFI bindings for unit systems, decomposition and formatting.

use crate::catch_panic;
use crate::error::HorologeStatus;
use horologe::{decompose, Grouping, Mode, TimeBreakdown, UnitSystem};
use std::os::raw::c_char;

// ═══════════════════════════════════════════════════════════════════════════
// C-repr types
// ═══════════════════════════════════════════════════════════════════════════

/// Mixed-radix unit system for C interop.
///
/// `days_per_month` and `months_per_year` are ignored when `has_months` is
/// false. C callers must store 0 or 1 in `has_months`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorologeUnits {
    pub seconds_per_minute: f64,
    pub minutes_per_hour: f64,
    pub hours_per_day: f64,
    pub days_per_month: f64,
    pub months_per_year: f64,
    pub has_months: bool,
}

impl HorologeUnits {
    fn from_units(units: &UnitSystem) -> Self {
        let months = units.months();
        Self {
            seconds_per_minute: units.seconds_per_minute(),
            minutes_per_hour: units.minutes_per_hour(),
            hours_per_day: units.hours_per_day(),
            days_per_month: months.map_or(0.0, |m| m.days_per_month),
            months_per_year: months.map_or(0.0, |m| m.months_per_year),
            has_months: months.is_some(),
        }
    }

    fn to_units(self) -> Result<UnitSystem, HorologeStatus> {
        let units = UnitSystem::new(
            self.seconds_per_minute,
            self.minutes_per_hour,
            self.hours_per_day,
        )?;
        if self.has_months {
            Ok(units.with_months(self.days_per_month, self.months_per_year)?)
        } else {
            Ok(units)
        }
    }
}

/// Decomposition mode.
///
/// cbindgen:prefix-with-name
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorologeMode {
    /// 1-indexed calendar stamp.
    Absolute = 0,
    /// Zero-based duration.
    Elapsed = 1,
}

impl From<HorologeMode> for Mode {
    fn from(mode: HorologeMode) -> Self {
        match mode {
            HorologeMode::Absolute => Mode::Absolute,
            HorologeMode::Elapsed => Mode::Elapsed,
        }
    }
}

impl From<Mode> for HorologeMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Absolute => HorologeMode::Absolute,
            Mode::Elapsed => HorologeMode::Elapsed,
        }
    }
}

/// Decomposed time for C interop. `months` is meaningful only when
/// `has_months` is true.
///
/// `mode` must hold a `HorologeMode` discriminant and `has_months` must be 0
/// or 1; any other bit pattern is undefined behaviour on the Rust side.
/// Values filled in by [`horologe_decompose`] always qualify.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorologeBreakdown {
    pub mode: HorologeMode,
    pub years: i64,
    pub months: i64,
    pub has_months: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl From<TimeBreakdown> for HorologeBreakdown {
    fn from(b: TimeBreakdown) -> Self {
        Self {
            mode: b.mode.into(),
            years: b.years,
            months: b.months.unwrap_or(0),
            has_months: b.months.is_some(),
            days: b.days,
            hours: b.hours,
            minutes: b.minutes,
            seconds: b.seconds,
        }
    }
}

impl From<HorologeBreakdown> for TimeBreakdown {
    fn from(b: HorologeBreakdown) -> Self {
        Self {
            mode: b.mode.into(),
            years: b.years,
            months: b.has_months.then_some(b.months),
            days: b.days,
            hours: b.hours,
            minutes: b.minutes,
            seconds: b.seconds,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit systems
// ═══════════════════════════════════════════════════════════════════════════

/// Earth units: 60/60/24, 365.25/12 days per month, 12 months per year.
#[no_mangle]
pub extern "C" fn horologe_units_earth() -> HorologeUnits {
    HorologeUnits::from_units(&UnitSystem::EARTH)
}

/// Default planet units: 24/24/12 with the planet's month ratios.
#[no_mangle]
pub extern "C" fn horologe_units_kerbin() -> HorologeUnits {
    HorologeUnits::from_units(&UnitSystem::KERBIN)
}

/// Check that every used ratio is finite and strictly positive.
#[no_mangle]
pub extern "C" fn horologe_units_validate(units: HorologeUnits) -> HorologeStatus {
    catch_panic!(HorologeStatus::Panic, {
        match units.to_units() {
            Ok(_) => HorologeStatus::Ok,
            Err(status) => status,
        }
    })
}

/// Base-unit seconds in one day of `units`.
///
/// # Safety
/// `out` must be a valid, writable pointer to `f64`.
#[no_mangle]
pub unsafe extern "C" fn horologe_units_seconds_per_day(
    units: HorologeUnits,
    out: *mut f64,
) -> HorologeStatus {
    catch_panic!(HorologeStatus::Panic, {
        if out.is_null() {
            return HorologeStatus::NullPointer;
        }
        match units.to_units() {
            Ok(units) => {
                unsafe { *out = units.seconds_per_day() };
                HorologeStatus::Ok
            }
            Err(status) => status,
        }
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Decomposition
// ═══════════════════════════════════════════════════════════════════════════

/// Decompose `elapsed` (plus `epoch_offset` in absolute mode).
///
/// With `show_months` the result is year/month/day and `units` must carry
/// months; otherwise days roll straight into years of `days_per_year`.
///
/// # Safety
/// `out` must be a valid, writable pointer to `HorologeBreakdown`. `mode`
/// must be a `HorologeMode` discriminant and `show_months` must be 0 or 1.
#[no_mangle]
pub unsafe extern "C" fn horologe_decompose(
    units: HorologeUnits,
    elapsed: f64,
    epoch_offset: f64,
    show_months: bool,
    days_per_year: f64,
    mode: HorologeMode,
    out: *mut HorologeBreakdown,
) -> HorologeStatus {
    catch_panic!(HorologeStatus::Panic, {
        if out.is_null() {
            return HorologeStatus::NullPointer;
        }
        if !elapsed.is_finite() || !epoch_offset.is_finite() {
            return HorologeStatus::NonFiniteTime;
        }
        let units = match units.to_units() {
            Ok(units) => units,
            Err(status) => return status,
        };
        let grouping = if show_months {
            Grouping::YearMonthDay
        } else {
            Grouping::YearDay { days_per_year }
        };
        match decompose(elapsed, &units, epoch_offset, grouping, mode.into()) {
            Ok(breakdown) => {
                unsafe { *out = breakdown.into() };
                HorologeStatus::Ok
            }
            Err(err) => err.into(),
        }
    })
}

/// Render `breakdown` as clock text (`"01:01:02 00:00:00"`, `"2d 03:04:05"`)
/// into `buf`, NUL-terminated.
///
/// When `out_len` is non-null it receives the text length without the NUL,
/// also on `BufferTooSmall`, so callers can size a retry.
///
/// # Safety
/// `breakdown` must point to a valid `HorologeBreakdown`: its `mode` is a
/// `HorologeMode` discriminant and `has_months` is 0 or 1, as
/// [`horologe_decompose`] writes them. `buf` must be writable for `buf_len`
/// bytes. `out_len` must be null or writable.
#[no_mangle]
pub unsafe extern "C" fn horologe_format(
    breakdown: *const HorologeBreakdown,
    buf: *mut c_char,
    buf_len: usize,
    out_len: *mut usize,
) -> HorologeStatus {
    catch_panic!(HorologeStatus::Panic, {
        if breakdown.is_null() || buf.is_null() {
            return HorologeStatus::NullPointer;
        }
        let text = TimeBreakdown::from(unsafe { *breakdown }).to_string();
        if !out_len.is_null() {
            unsafe { *out_len = text.len() };
        }
        if text.len() >= buf_len {
            return HorologeStatus::BufferTooSmall;
        }
        unsafe {
            std::ptr::copy_nonoverlapping(text.as_ptr(), buf.cast::<u8>(), text.len());
            *buf.add(text.len()) = 0;
        }
        HorologeStatus::Ok
    })
}
