//! Shake Sensing Engine
//!
//! Demo binary: runs the detector against a synthetic accelerometer stream
//! containing a few shake bursts and logs every gesture. Set `RUST_LOG=debug`
//! to see per-transition deviation values.
//!
//! This is the entry point for standalone binaries. For library use, see lib.rs.

use std::time::Duration;

use shake_sensing::{ShakeCallbacks, ShakeConfig, ShakeDetector, ShakeError, SyntheticShake};

fn main() {
    env_logger::init();

    println!("Shake Sensing Engine v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ShakeError> {
    let source = SyntheticShake {
        bursts: 3,
        ..SyntheticShake::default()
    }
    .into_source();

    let config = ShakeConfig {
        haptic_pulse: Duration::from_millis(200),
        ..ShakeConfig::default()
    };

    let callbacks = ShakeCallbacks::new()
        .on_action_start(|| log::info!("Shake started"))
        .on_action_end(|| log::info!("Shake ended"));

    let mut detector = ShakeDetector::new(source, config, callbacks)?;
    detector.start()?;

    // The synthetic recording ends with a disconnect, which is the normal
    // way this demo finishes.
    match detector.join() {
        Ok(_) | Err(ShakeError::SensorUnavailable(_)) => {}
        Err(e) => return Err(e),
    }

    if let Some(summary) = detector.summary() {
        println!(
            "Processed {} ticks, {} transitions, final state {:?}",
            summary.ticks, summary.transitions, summary.final_state
        );
        println!("Recent deviations: {:?}", summary.deviation_history);
    }
    Ok(())
}
