// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Multi-calendar clock engine
//!
//! This crate turns one continuous simulation time into several parallel
//! clocks: the raw simulation seconds, an Earth-style calendar, a
//! configurable fictional planet calendar, mission elapsed time and the host
//! wall clock.
//!
//! # Core types
//!
//! - [`UnitSystem`]: the mixed-radix definition of one calendar (s/min,
//!   min/h, h/day and optional days/month, months/year).
//! - [`Decomposer`] / [`decompose`]: split a scalar time into a
//!   [`TimeBreakdown`], either as a 1-indexed calendar stamp
//!   ([`Mode::Absolute`]) or a zero-based duration ([`Mode::Elapsed`]).
//! - [`ClockConfiguration`]: the user's settings, with validated edits and
//!   merge-on-load persistence through a [`ConfigStore`].
//! - [`DisplayTree`]: display visibility with cascading hide.
//! - [`render`] / [`Overlay`]: the per-frame entry point for a render loop.
//!
//! # Calendars
//!
//! | Clock | Label | Unit system | Mode |
//! |-------|-------|-------------|------|
//! | Simulation | `UT` | n/a | thousands-grouped seconds |
//! | Earth | `ET` | [`UnitSystem::EARTH`] | absolute |
//! | Planet | `KT` | [`ClockConfiguration::planet`] | absolute |
//! | Mission | `MET` | [`UnitSystem::EARTH`] | elapsed |
//! | Real | `RT` | n/a | `HH:MM:SS` |
//!
//! # Quick example
//!
//! ```rust
//! use horologe::{Decomposer, Grouping, UnitSystem};
//!
//! let kerbin = Decomposer::new(UnitSystem::KERBIN, Grouping::YearMonthDay)?;
//! // 24 · 24 · 12 = 6 912 local seconds make one planet day.
//! assert_eq!(kerbin.absolute(6_912.0, 0.0).to_string(), "01:01:02 00:00:00");
//! # Ok::<(), horologe::ClockError>(())
//! ```

mod breakdown;
mod config;
mod decompose;
mod error;
mod overlay;
mod store;
mod units;
mod visibility;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use breakdown::{group_thousands, Grouping, Mode, TimeBreakdown};
pub use config::{keys, ClockConfiguration, ClockKind, ClockVisibility, LoadReport};
pub use decompose::{decompose, Decomposer};
pub use error::{ClockError, Result};
pub use overlay::{
    earth_time, mission_time, planet_time, preset_time, render, ClockLine, FrameInput, Overlay,
};
pub use store::{ConfigStore, JsonStore};
pub use units::{MonthRatios, PlanetPreset, Ratio, UnitSystem, EARTH_DAYS_PER_YEAR};
pub use visibility::{DisplayId, DisplayTree, ObserverId, OverlayDisplays};
