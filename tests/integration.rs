use chrono::NaiveTime;
use horologe::{
    decompose, render, ClockConfiguration, ClockKind, ConfigStore, Decomposer, FrameInput,
    Grouping, JsonStore, Mode, Overlay, Ratio, UnitSystem,
};
use proptest::prelude::*;
use qtty::Seconds;

const KERBIN_DAY: f64 = 24.0 * 24.0 * 12.0;

#[test]
fn absolute_zero_is_first_day_of_first_year() {
    let ymd = decompose(0.0, &UnitSystem::EARTH, 0.0, Grouping::YearMonthDay, Mode::Absolute)
        .unwrap();
    assert_eq!((ymd.years, ymd.months, ymd.days), (1, Some(1), 1));
    assert_eq!(ymd.to_string(), "01:01:01 00:00:00");

    let yd = decompose(
        0.0,
        &UnitSystem::EARTH,
        0.0,
        Grouping::YearDay {
            days_per_year: 365.25,
        },
        Mode::Absolute,
    )
    .unwrap();
    assert_eq!(yd.to_string(), "01:01 00:00:00");
}

#[test]
fn elapsed_zero_renders_bare_clock() {
    let b = decompose(0.0, &UnitSystem::KERBIN, 0.0, Grouping::YearMonthDay, Mode::Elapsed)
        .unwrap();
    assert_eq!(b.to_string(), "00:00:00");
}

#[test]
fn kerbin_defaults_one_day() {
    let b = decompose(
        KERBIN_DAY,
        &UnitSystem::KERBIN,
        0.0,
        Grouping::YearMonthDay,
        Mode::Absolute,
    )
    .unwrap();
    assert_eq!(
        (b.years, b.months, b.days, b.time_of_day()),
        (1, Some(1), 2, (0, 0, 0))
    );
}

#[test]
fn earth_year_rolls_over_within_a_day_of_365_25() {
    let earth = Decomposer::new(UnitSystem::EARTH, Grouping::YearMonthDay).unwrap();
    let at_year = earth.absolute(31_557_600.0, 0.0);
    assert_eq!(at_year.years, 1);
    assert_eq!(at_year.months, Some(12));

    let next_day = earth.absolute(31_557_600.0 + 86_400.0, 0.0);
    assert_eq!(next_day.years, 2);
    assert_eq!(next_day.months, Some(1));
    assert!(next_day.days <= 2);
}

#[test]
fn one_day_epoch_offset_shifts_day_only() {
    for units in [UnitSystem::EARTH, UnitSystem::KERBIN] {
        let d = Decomposer::new(units, Grouping::YearMonthDay).unwrap();
        let t = units.seconds_per_day() * 0.5 + 17.0;
        let a = d.absolute(t, 0.0);
        let b = d.absolute(t, units.seconds_per_day());
        assert_eq!(b.days, a.days + 1);
        assert_eq!(b.time_of_day(), a.time_of_day());
        assert_eq!((b.years, b.months), (a.years, a.months));
    }
}

#[test]
fn earth_and_planet_are_independent() {
    let mut cfg = ClockConfiguration::default();
    let input = FrameInput {
        universal_time: Seconds::new(100_000.0),
        mission_elapsed: None,
        wall_clock: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    };
    let before = render(&cfg, &input).unwrap();
    cfg.set_planet_ratio(Ratio::HoursPerDay, 6.0).unwrap();
    let after = render(&cfg, &input).unwrap();

    let line = |lines: &[horologe::ClockLine], kind| {
        lines
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.text.clone())
            .unwrap()
    };
    assert_eq!(line(&before, ClockKind::Earth), line(&after, ClockKind::Earth));
    assert_ne!(line(&before, ClockKind::Planet), line(&after, ClockKind::Planet));
}

#[test]
fn settings_survive_a_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut overlay = Overlay::default();
    overlay.config.show_months = false;
    overlay.config.visibility.set_shown(ClockKind::Universal, false);
    overlay
        .config
        .set_planet_ratio_text(Ratio::SecondsPerMinute, "36")
        .unwrap();

    let mut store = JsonStore::new();
    overlay.save(&mut store);
    store.save_file(&path).unwrap();

    let mut restored = Overlay::default();
    let report = restored.load(&JsonStore::load_file(&path).unwrap());
    assert_eq!(report.kept, 0);
    assert_eq!(restored.config, overlay.config);
}

#[test]
fn legacy_string_values_load() {
    let mut store = JsonStore::new();
    store.set_bool("showingKerbinTime", false);
    let mut map = store.into_map();
    map.insert("kerbinHoursPerDay".into(), serde_json::json!("6"));
    map.insert("debug".into(), serde_json::json!("True"));
    let store = JsonStore::from_map(map);

    let mut cfg = ClockConfiguration::default();
    cfg.load(&store);
    assert!(!cfg.visibility.planet);
    assert!(cfg.debug);
    assert_eq!(cfg.planet().hours_per_day(), 6.0);
}

fn ratio() -> impl Strategy<Value = f64> {
    0.5f64..100.0
}

proptest! {
    #[test]
    fn recompose_reproduces_truncated_input(
        spm in ratio(),
        mph in ratio(),
        hpd in ratio(),
        dpm in ratio(),
        mpy in ratio(),
        t in 0.0f64..1.0e12,
        absolute in any::<bool>(),
    ) {
        let units = UnitSystem::new(spm, mph, hpd).unwrap().with_months(dpm, mpy).unwrap();
        let mode = if absolute { Mode::Absolute } else { Mode::Elapsed };
        for grouping in [Grouping::YearMonthDay, Grouping::YearDay { days_per_year: dpm * mpy }] {
            let d = Decomposer::new(units, grouping).unwrap();
            let b = d.decompose(t, mode);
            prop_assert_eq!(d.recompose(&b), t.trunc() as i64);
        }
    }

    #[test]
    fn show_months_never_changes_time_of_day(t in 0.0f64..1.0e10) {
        let mut cfg = ClockConfiguration::default();
        let with_months = horologe::planet_time(&cfg, t).unwrap();
        cfg.show_months = false;
        let without = horologe::planet_time(&cfg, t).unwrap();
        prop_assert_eq!(with_months.time_of_day(), without.time_of_day());
        prop_assert!(without.months.is_none());

        let earth_ymd = horologe::earth_time(&ClockConfiguration::default(), t).unwrap();
        let earth_yd = horologe::earth_time(&cfg, t).unwrap();
        prop_assert_eq!(earth_ymd.time_of_day(), earth_yd.time_of_day());
    }
}
