/// Basic usage example: feed magnitudes through the tracker, then run the
/// threaded detector on a recorded stream.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shake_sensing::{
    ReplaySource, ShakeCallbacks, ShakeConfig, ShakeDetector, ShakeTracker, TrackerConfig,
};

fn main() {
    println!("=== Shake Sensing Engine: Basic Example ===\n");

    // Part 1: synchronous tracker, one magnitude per tick.
    let mut tracker = ShakeTracker::new(&TrackerConfig::default()).expect("default config is valid");

    let mut magnitudes = vec![26.0; 12];
    magnitudes.extend((0..12).map(|i| if i % 2 == 0 { 90.0 } else { 10.0 }));
    magnitudes.extend(vec![26.0; 12]);

    for (tick, magnitude) in magnitudes.iter().enumerate() {
        let outcome = tracker.process_magnitude(*magnitude).expect("finite sample");
        if let Some(transition) = outcome.transition {
            println!(
                "tick {:>2}: {} (stddev {:.1})",
                tick,
                transition.description(),
                outcome.stddev
            );
        }
    }

    // Part 2: background detector with callbacks.
    let shakes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&shakes);
    let callbacks = ShakeCallbacks::new()
        .on_action_start(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            println!("  -> shake!");
        })
        .on_action_end(|| println!("  -> still"));

    let config = ShakeConfig::default()
        .without_haptic()
        .with_tick_interval(Duration::from_millis(5));

    let mut detector = ShakeDetector::new(ReplaySource::from_magnitudes(&magnitudes), config, callbacks)
        .expect("detector");
    detector.start().expect("first start");
    let outcome = detector.join();

    println!("\n=== Summary ===");
    println!("Loop ended with: {:?}", outcome.err());
    println!("Shakes detected: {}", shakes.load(Ordering::SeqCst));
    println!("Final state: {:?}", detector.state());
}
