/// Stress testing for the shake tracker and sample window.
///
/// Long streams, pathological inputs and boundary-hugging signals that
/// would expose drift, event storms or buffer bookkeeping bugs.

#[cfg(test)]
mod stress_tests {
    use crate::error::ShakeError;
    use crate::tracker::{ShakeTracker, TrackerConfig};
    use crate::types::*;
    use crate::window::SampleWindow;

    // ============================================================================
    // CATEGORY 1: EXTREME DURATION
    // ============================================================================

    /// One hour at 20Hz with a shake every minute.
    #[test]
    fn stress_one_hour_periodic_shakes() {
        let mut tracker = ShakeTracker::new(&TrackerConfig::default()).unwrap();
        let mut starts = 0;
        let mut ends = 0;

        for tick in 0..72_000u32 {
            // 2 seconds of shaking at the start of every minute.
            let in_burst = tick % 1200 < 40;
            let magnitude = if in_burst {
                if tick % 2 == 0 { 120.0 } else { 20.0 }
            } else {
                26.0
            };
            match tracker.process_magnitude(magnitude).unwrap().transition {
                Some(Transition::Started) => starts += 1,
                Some(Transition::Ended) => ends += 1,
                None => {}
            }
        }

        assert_eq!(starts, 60);
        assert_eq!(ends, 60);
        assert_eq!(tracker.ticks(), 72_000);
        assert_eq!(tracker.window().len(), 10);
        assert_eq!(tracker.deviation_history().len(), 5);
    }

    /// Statistics stay exact after millions of evictions.
    #[test]
    fn stress_window_no_drift() {
        let mut window = SampleWindow::new(10).unwrap();
        for i in 0..1_000_000u32 {
            window.push((i % 997) as f32 * 0.5).unwrap();
        }
        for _ in 0..10 {
            window.push(42.0).unwrap();
        }
        assert!((window.mean().unwrap() - 42.0).abs() < 1e-4);
        assert!(window.stddev().unwrap() < 1e-4);
    }

    // ============================================================================
    // CATEGORY 2: BOUNDARY CHATTER
    // ============================================================================

    /// A signal sitting exactly on the threshold produces a single start.
    #[test]
    fn stress_steady_signal_on_threshold() {
        // Alternating 85/115 has population stddev exactly 15.
        let mut tracker = ShakeTracker::new(&TrackerConfig::default()).unwrap();
        let mut transitions = Vec::new();
        for i in 0..10_000 {
            let m = if i % 2 == 0 { 85.0 } else { 115.0 };
            if let Some(t) = tracker.process_magnitude(m).unwrap().transition {
                transitions.push(t);
            }
        }
        assert_eq!(transitions, vec![Transition::Started]);
        assert_eq!(tracker.state(), DetectorState::Active);
    }

    /// Transitions always alternate, whatever the input.
    #[test]
    fn stress_transitions_alternate() {
        let mut tracker = ShakeTracker::new(&TrackerConfig {
            deviation_threshold: 10.0,
            buf_size: 4,
            history_size: 5,
        })
        .unwrap();

        // Deterministic pseudo-random magnitudes (LCG).
        let mut seed: u32 = 0x2545_f491;
        let mut last = None;
        let mut count = 0u64;
        for _ in 0..50_000 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let magnitude = (seed >> 8) as f32 / (1u32 << 24) as f32 * 60.0;
            let outcome = tracker.process_magnitude(magnitude).unwrap();
            if let Some(t) = outcome.transition {
                if let Some(prev) = last {
                    assert_ne!(prev, t, "transitions must alternate");
                }
                last = Some(t);
                count += 1;
                assert_eq!(outcome.state, t.target());
            }
        }
        assert_eq!(count, tracker.transitions());
        assert!(count > 0);
    }

    // ============================================================================
    // CATEGORY 3: PATHOLOGICAL INPUT
    // ============================================================================

    /// Interleaved garbage never corrupts the window.
    #[test]
    fn stress_interleaved_non_finite() {
        let mut tracker = ShakeTracker::new(&TrackerConfig::default()).unwrap();
        let mut rejected = 0;
        for i in 0..10_000 {
            let m = match i % 7 {
                0 => f32::NAN,
                3 => f32::INFINITY,
                _ => 26.0,
            };
            match tracker.process_magnitude(m) {
                Ok(outcome) => assert!(outcome.stddev.is_finite()),
                Err(ShakeError::InvalidSample(_)) => rejected += 1,
                Err(e) => panic!("unexpected error {e}"),
            }
        }
        assert_eq!(rejected + tracker.ticks(), 10_000);
        assert_eq!(tracker.transitions(), 0);
        assert!(tracker.window().iter().all(|v| v == 26.0));
    }

    /// Huge finite axis values overflow to an infinite magnitude and are rejected.
    #[test]
    fn stress_overflowing_magnitude_rejected() {
        let mut tracker = ShakeTracker::new(&TrackerConfig::default()).unwrap();
        let sample = AccelSample::new(f32::MAX, f32::MAX, 0.0);
        assert!(matches!(
            tracker.process_sample(&sample),
            Err(ShakeError::InvalidSample(_))
        ));
        assert!(tracker.window().is_empty());
    }

    /// Large window sizes behave the same as small ones.
    #[test]
    fn stress_large_window() {
        let mut tracker = ShakeTracker::new(&TrackerConfig {
            deviation_threshold: 15.0,
            buf_size: 5_000,
            history_size: 1_000,
        })
        .unwrap();
        for i in 0..4_999 {
            let m = if i % 2 == 0 { 0.0 } else { 100.0 };
            assert!(tracker.process_magnitude(m).unwrap().transition.is_none());
        }
        let outcome = tracker.process_magnitude(100.0).unwrap();
        assert!(outcome.window_full);
        assert_eq!(outcome.transition, Some(Transition::Started));
        assert_eq!(tracker.deviation_history().len(), 1_000);
    }
}
