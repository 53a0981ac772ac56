//! Example: find when a toy moon hides a star, and when its elevation peaks.
//!
//! Run with: `cargo run --example occultation_window`

use std::sync::atomic::AtomicBool;

use gfsearch::search::{
    run_binary_search, run_numeric_search, FlagInterrupt, GfConstraint, ProgressReporter,
    ScalarWithRate, SearchConfig,
};
use gfsearch::window::{Interval, IntervalSet};
use gfsearch::GfResult;
use qtty::{Quantity, Second};

type Time = Quantity<Second>;

/// Orbital period of the toy moon, in seconds.
const PERIOD: f64 = 5400.0;

/// Prints progress for each scanned confinement interval.
struct PrintReporter;

impl ProgressReporter<Second> for PrintReporter {
    fn initialize(&mut self, bounds: Interval<Second>, begin_message: &str, _: &str) {
        println!("  {} over {}", begin_message, bounds);
    }

    fn update(&mut self, start: Time, end: Time, current: Time) {
        let percent = 100.0 * (current - start).value() / (end - start).value().max(1.0);
        println!("  ... {:5.1}%", percent);
    }

    fn finalize(&mut self) {
        println!("  ... done");
    }
}

fn phase(t: Time) -> f64 {
    2.0 * std::f64::consts::PI * t.value() / PERIOD
}

/// Angular separation between moon and star, in degrees.
fn separation(t: Time) -> f64 {
    40.0 * (1.0 - phase(t).cos())
}

fn main() -> GfResult<()> {
    println!("=== Occultation Window Example ===\n");

    // Two observing nights, one orbit apart.
    let confinement = IntervalSet::from_pairs(&[(0.0, 7200.0), (10800.0, 18000.0)])?;
    println!("Confinement window: {}", confinement);
    println!("Total observing time: {:.0} s\n", confinement.measure().value());

    // Occulted while separation is below 5 degrees.
    println!("--- Binary state search ---");
    let mut occulted = |t: Time| separation(t) < 5.0;
    let mut config = SearchConfig::new(Time::new(60.0))
        .with_tolerance(Time::new(1e-3))
        .with_reporter(PrintReporter);
    let outcome = run_binary_search(&confinement, &mut config, &mut occulted, 16)?;
    for interval in outcome.window() {
        println!(
            "Occultation {} (duration: {:.1}s)",
            interval,
            interval.duration().value()
        );
    }

    // Peak separation, as a numeric search with an explicit rate.
    println!("\n--- Numeric search: absolute maximum ---");
    let mut moon = ScalarWithRate::new(separation, |t: Time| phase(t).sin());
    let mut config = SearchConfig::new(Time::new(60.0)).with_tolerance(Time::new(1e-3));
    let peaks = run_numeric_search(
        &confinement,
        &GfConstraint::absolute_maximum(),
        &mut config,
        &mut moon,
        16,
    )?;
    for peak in peaks.window() {
        println!(
            "Peak separation {:.3} deg at t = {:.3} s",
            separation(peak.start()),
            peak.start().value()
        );
    }

    // Same search, but interrupted up front.
    println!("\n--- Interrupted search ---");
    let stop = AtomicBool::new(true);
    let mut config =
        SearchConfig::new(Time::new(60.0)).with_interrupt(FlagInterrupt::new(&stop));
    let outcome = run_binary_search(&confinement, &mut config, &mut occulted, 16)?;
    println!(
        "Status: {:?}, {} interval(s) before the interrupt",
        outcome.status(),
        outcome.window().interval_count()
    );
    config.clear_interrupt();

    Ok(())
}
