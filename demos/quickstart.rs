use chrono::Local;
use horologe::{FrameInput, Overlay, PlanetPreset};
use qtty::Seconds;

fn main() -> horologe::Result<()> {
    let mut overlay = Overlay::default();
    overlay.set_visible(true);
    overlay.config.debug = true;

    for ut in [0.0, 21_650.0, 1_234_567.0, 31_557_600.0] {
        let frame = FrameInput {
            universal_time: Seconds::new(ut),
            mission_elapsed: Some(Seconds::new(ut / 2.0)),
            wall_clock: Local::now().time(),
        };
        for line in overlay.frame(&frame)? {
            println!("{line}");
        }
        println!();
    }

    overlay.config.apply_preset(PlanetPreset::KerbinSidereal);
    overlay.config.show_months = false;
    let frame = FrameInput {
        universal_time: Seconds::new(1_234_567.0),
        mission_elapsed: None,
        wall_clock: Local::now().time(),
    };
    println!("{} preset, year/day:", PlanetPreset::KerbinSidereal);
    for line in overlay.frame(&frame)? {
        println!("{line}");
    }
    Ok(())
}
