// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-frame clock rendering.
//!
//! The host's render loop calls [`render`] (or [`Overlay::frame`]) once per
//! refresh with the current simulation time.  Each visible clock becomes one
//! [`ClockLine`]:
//!
//! ```text
//! UT: 1,234,567
//! ET: 01:01:15 06:56:07
//! KT: 01:09:04 02:07:00
//! MET: 2d 03:04:05
//! RT: 14:03:27
//! ```
//!
//! The Earth and planet calendars are decomposed independently from the same
//! input; they share no intermediate state.

use crate::breakdown::{group_thousands, Grouping, TimeBreakdown};
use crate::config::{ClockConfiguration, ClockKind, LoadReport};
use crate::decompose::Decomposer;
use crate::error::{ClockError, Result};
use crate::store::ConfigStore;
use crate::units::{PlanetPreset, UnitSystem};
use crate::visibility::{DisplayTree, OverlayDisplays};
use chrono::NaiveTime;
use qtty::Seconds;
use std::fmt;

/// Everything the host supplies for one refresh.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInput {
    /// Absolute simulation time; non-decreasing between frames.
    pub universal_time: Seconds,
    /// Age of the active mission, if there is one.
    pub mission_elapsed: Option<Seconds>,
    /// Host wall-clock time of day.
    pub wall_clock: NaiveTime,
}

/// One rendered clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockLine {
    pub kind: ClockKind,
    pub text: String,
}

impl fmt::Display for ClockLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.label(), self.text)
    }
}

fn finite(value: Seconds) -> Result<f64> {
    let v = value.value();
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ClockError::NonFiniteTime(v))
    }
}

/// Earth calendar stamp of `ut`.
pub fn earth_time(config: &ClockConfiguration, ut: f64) -> Result<TimeBreakdown> {
    Ok(Decomposer::new(UnitSystem::EARTH, config.earth_grouping())?.absolute(ut, 0.0))
}

/// Planet calendar stamp of `ut`, rescaled from simulation seconds to planet
/// seconds and shifted by the configured epoch offset.
pub fn planet_time(config: &ClockConfiguration, ut: f64) -> Result<TimeBreakdown> {
    let units = config.planet();
    let day = config.sim_seconds_per_planet_day();
    let decomposer = Decomposer::new(*units, config.planet_grouping()?)?;
    Ok(decomposer.absolute(
        units.rescale(ut, day)?,
        units.rescale(config.epoch_offset(), day)?,
    ))
}

/// Planet calendar stamp of `ut` under a fixed preset, ignoring the user's
/// ratios and epoch offset.
pub fn preset_time(
    config: &ClockConfiguration,
    preset: PlanetPreset,
    ut: f64,
) -> Result<TimeBreakdown> {
    let units = preset.units();
    let day = preset.sim_seconds_per_day();
    let grouping = if config.show_months {
        Grouping::YearMonthDay
    } else {
        let period = units.rescale(config.planet_orbital_period().value(), day)?;
        Grouping::YearDay {
            days_per_year: units.days_per_orbit(Seconds::new(period))?,
        }
    };
    Ok(Decomposer::new(units, grouping)?.absolute(units.rescale(ut, day)?, 0.0))
}

/// Mission elapsed time, in Earth units.
pub fn mission_time(config: &ClockConfiguration, elapsed: f64) -> Result<TimeBreakdown> {
    Ok(Decomposer::new(UnitSystem::EARTH, config.earth_grouping())?.elapsed(elapsed))
}

/// Render every visible clock for one frame.
///
/// Non-finite simulation or mission times are rejected before any
/// decomposition runs.
pub fn render(config: &ClockConfiguration, frame: &FrameInput) -> Result<Vec<ClockLine>> {
    let ut = finite(frame.universal_time)?;
    let mission = frame.mission_elapsed.map(finite).transpose()?;
    let shown = |kind| config.visibility.is_shown(kind);

    let mut lines = Vec::with_capacity(ClockKind::ALL.len() + 1);
    let mut push = |kind, text: String| lines.push(ClockLine { kind, text });

    if shown(ClockKind::Universal) {
        push(ClockKind::Universal, group_thousands(ut.trunc() as i64));
    }
    if shown(ClockKind::Earth) {
        push(ClockKind::Earth, earth_time(config, ut)?.to_string());
    }
    if shown(ClockKind::Planet) {
        push(ClockKind::Planet, planet_time(config, ut)?.to_string());
        if config.debug {
            let preset = PlanetPreset::KerbinSidereal;
            let stamp = preset_time(config, preset, ut)?;
            push(ClockKind::Planet, format!("{stamp} ({preset})"));
        }
    }
    if let (true, Some(elapsed)) = (shown(ClockKind::Mission), mission) {
        push(ClockKind::Mission, mission_time(config, elapsed)?.to_string());
    }
    if shown(ClockKind::Real) {
        push(ClockKind::Real, frame.wall_clock.format("%H:%M:%S").to_string());
    }
    Ok(lines)
}

/// Clock overlay state: settings plus the display tree.
///
/// Mirrors the host-facing surface of the clock window: load/save, show/hide
/// with cascading to the settings and help panels, and per-frame rendering
/// that yields nothing while the window is hidden.
#[derive(Debug)]
pub struct Overlay {
    pub config: ClockConfiguration,
    displays: DisplayTree,
    ids: OverlayDisplays,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new(ClockConfiguration::default())
    }
}

impl Overlay {
    pub fn new(config: ClockConfiguration) -> Self {
        let (displays, ids) = DisplayTree::overlay();
        Self {
            config,
            displays,
            ids,
        }
    }

    pub fn ids(&self) -> OverlayDisplays {
        self.ids
    }

    pub fn displays(&self) -> &DisplayTree {
        &self.displays
    }

    pub fn displays_mut(&mut self) -> &mut DisplayTree {
        &mut self.displays
    }

    pub fn is_visible(&self) -> bool {
        self.displays.is_visible(self.ids.main)
    }

    /// Show or hide the clock window; hiding also hides its panels.
    pub fn set_visible(&mut self, visible: bool) {
        self.displays.set_visible(self.ids.main, visible);
    }

    pub fn toggle(&mut self) -> bool {
        self.displays.toggle(self.ids.main)
    }

    pub fn load(&mut self, store: &impl ConfigStore) -> LoadReport {
        self.config.load(store)
    }

    pub fn save(&self, store: &mut impl ConfigStore) {
        self.config.save(store)
    }

    /// Lines to draw this frame; empty while the window is hidden.
    pub fn frame(&self, input: &FrameInput) -> Result<Vec<ClockLine>> {
        if !self.is_visible() {
            return Ok(Vec::new());
        }
        render(&self.config, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Ratio;

    fn frame(ut: f64) -> FrameInput {
        FrameInput {
            universal_time: Seconds::new(ut),
            mission_elapsed: None,
            wall_clock: NaiveTime::from_hms_opt(14, 3, 27).unwrap(),
        }
    }

    fn texts(lines: &[ClockLine]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_render_at_zero() {
        let cfg = ClockConfiguration::default();
        let lines = render(&cfg, &frame(0.0)).unwrap();
        assert_eq!(
            texts(&lines),
            vec![
                "UT: 0",
                "ET: 01:01:01 00:00:00",
                "KT: 01:01:01 00:00:00",
                "RT: 14:03:27"
            ]
        );
    }

    #[test]
    fn planet_time_is_rescaled_from_sim_seconds() {
        let cfg = ClockConfiguration::default();
        // One planet day lasts 21 650 simulation seconds.
        let b = planet_time(&cfg, 21_650.0).unwrap();
        assert_eq!(b.to_string(), "01:01:02 00:00:00");
    }

    #[test]
    fn epoch_offset_shifts_planet_only() {
        let mut cfg = ClockConfiguration::default();
        cfg.set_epoch_offset(21_650.0).unwrap();
        assert_eq!(planet_time(&cfg, 0.0).unwrap().days, 2);
        assert_eq!(earth_time(&cfg, 0.0).unwrap().days, 1);
    }

    #[test]
    fn hidden_clocks_are_skipped() {
        let mut cfg = ClockConfiguration::default();
        cfg.visibility.earth = false;
        cfg.visibility.real = false;
        let lines = render(&cfg, &frame(1_234_567.9)).unwrap();
        let kinds: Vec<_> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![ClockKind::Universal, ClockKind::Planet]);
        assert_eq!(lines[0].text, "1,234,567");
    }

    #[test]
    fn mission_line_needs_a_mission() {
        let cfg = ClockConfiguration::default();
        let mut input = frame(0.0);
        input.mission_elapsed = Some(Seconds::new(2.0 * 86_400.0 + 3.0 * 3_600.0 + 4.0 * 60.0 + 5.0));
        let lines = render(&cfg, &input).unwrap();
        let met = lines
            .iter()
            .find(|l| l.kind == ClockKind::Mission)
            .expect("mission line");
        assert_eq!(met.to_string(), "MET: 2d 03:04:05");
    }

    #[test]
    fn debug_adds_sidereal_line() {
        let mut cfg = ClockConfiguration::default();
        cfg.debug = true;
        let lines = render(&cfg, &frame(21_600.0)).unwrap();
        let planet: Vec<_> = lines
            .iter()
            .filter(|l| l.kind == ClockKind::Planet)
            .map(|l| l.text.clone())
            .collect();
        assert_eq!(planet.len(), 2);
        assert_eq!(planet[1], "01:01:02 00:00:00 (sidereal days)");
    }

    #[test]
    fn sidereal_line_ignores_epoch_offset() {
        let mut cfg = ClockConfiguration::default();
        cfg.debug = true;
        cfg.set_epoch_offset(21_600.0).unwrap();
        let lines = render(&cfg, &frame(0.0)).unwrap();
        let planet: Vec<_> = lines
            .iter()
            .filter(|l| l.kind == ClockKind::Planet)
            .map(|l| l.text.clone())
            .collect();
        assert_eq!(planet[1], "01:01:01 00:00:00 (sidereal days)");
        assert_ne!(planet[0], "01:01:01 00:00:00");
    }

    #[test]
    fn non_finite_time_is_rejected() {
        let cfg = ClockConfiguration::default();
        assert!(matches!(
            render(&cfg, &frame(f64::NAN)),
            Err(ClockError::NonFiniteTime(_))
        ));
        let mut input = frame(0.0);
        input.mission_elapsed = Some(Seconds::new(f64::INFINITY));
        assert_eq!(
            render(&cfg, &input),
            Err(ClockError::NonFiniteTime(f64::INFINITY))
        );
    }

    #[test]
    fn ratio_edits_apply_on_next_frame() {
        let mut cfg = ClockConfiguration::default();
        cfg.apply_preset(PlanetPreset::KerbinSidereal);
        let before = planet_time(&cfg, 3_600.0).unwrap();
        cfg.set_planet_ratio(Ratio::HoursPerDay, 12.0).unwrap();
        let after = planet_time(&cfg, 3_600.0).unwrap();
        assert_eq!(before.time_of_day(), (1, 0, 0));
        assert_eq!(after.time_of_day(), (2, 0, 0));
    }

    #[test]
    fn overlay_renders_only_while_visible() {
        let mut overlay = Overlay::default();
        assert!(overlay.frame(&frame(0.0)).unwrap().is_empty());

        overlay.set_visible(true);
        let settings = overlay.ids().settings;
        overlay.displays_mut().set_visible(settings, true);
        assert_eq!(overlay.frame(&frame(0.0)).unwrap().len(), 4);

        assert!(!overlay.toggle());
        assert!(!overlay.displays().is_visible(overlay.ids().settings));
    }
}
