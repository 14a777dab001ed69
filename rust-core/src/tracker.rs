//! Per-tick shake evaluation.
//!
//! [`ShakeTracker`] is the synchronous core of the detector: it turns one
//! accelerometer reading into a magnitude, feeds the sample window, measures
//! the window's standard deviation and advances the Idle/Active machine.
//!
//! The machine is edge-triggered. A [`Transition`] is reported only on the
//! tick where the condition flips, never on ticks that merely confirm the
//! current state:
//!
//! ```text
//!   condition = window full && stddev >= deviation_threshold
//!
//!   Idle   --condition-->   Active   (Transition::Started)
//!   Active --!condition-->  Idle     (Transition::Ended)
//! ```
//!
//! The tracker never calls user code. Dispatching callbacks on the returned
//! transition is the job of the sampling loop in `detector.rs`.

use crate::error::{Result, ShakeError};
use crate::types::{AccelSample, DetectorState, Transition};
use crate::window::SampleWindow;

/// Detection parameters.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Standard deviation of the magnitude at or above which a shake is
    /// in progress. Zero or negative values make every full window Active.
    pub deviation_threshold: f32,

    /// Number of recent magnitudes the deviation is computed over.
    /// A window of 1 always has zero deviation.
    pub buf_size: usize,

    /// Number of recent deviation values kept for inspection.
    pub history_size: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            deviation_threshold: 15.0,
            buf_size: 10,    // 500ms at 20Hz
            history_size: 5,
        }
    }
}

/// What a single tick measured and decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    /// Magnitude of the reading that was pushed.
    pub magnitude: f32,
    /// Population standard deviation of the window after the push.
    pub stddev: f32,
    /// Whether the window was full (and the threshold therefore evaluated).
    pub window_full: bool,
    /// Edge crossed on this tick, if any.
    pub transition: Option<Transition>,
    /// State after this tick.
    pub state: DetectorState,
}

/// Sliding-window deviation tracker with an edge-triggered state machine.
#[derive(Debug, Clone)]
pub struct ShakeTracker {
    deviation_threshold: f32,
    window: SampleWindow,
    // Recorded every tick, never consulted by the transition rule.
    deviation_history: SampleWindow,
    state: DetectorState,
    ticks: u64,
    transitions: u64,
}

impl ShakeTracker {
    /// Create a tracker in the Idle state with empty buffers.
    ///
    /// Fails with `InvalidConfig` if either buffer size is zero or the
    /// threshold is not a finite number.
    pub fn new(config: &TrackerConfig) -> Result<Self> {
        if !config.deviation_threshold.is_finite() {
            return Err(ShakeError::InvalidConfig(format!(
                "deviation threshold must be finite, got {}",
                config.deviation_threshold
            )));
        }
        Ok(Self {
            deviation_threshold: config.deviation_threshold,
            window: SampleWindow::new(config.buf_size)?,
            deviation_history: SampleWindow::new(config.history_size)?,
            state: DetectorState::Idle,
            ticks: 0,
            transitions: 0,
        })
    }

    /// Process one accelerometer reading.
    ///
    /// A non-finite magnitude is rejected with `InvalidSample` before any
    /// state is touched, so the caller may simply skip the tick.
    pub fn process_sample(&mut self, sample: &AccelSample) -> Result<TickOutcome> {
        self.process_magnitude(sample.magnitude())
    }

    /// Process a precomputed magnitude.
    pub fn process_magnitude(&mut self, magnitude: f32) -> Result<TickOutcome> {
        self.window.push(magnitude)?;
        self.ticks += 1;

        let stddev = self.window.stddev()?;
        self.deviation_history.push(stddev)?;

        let window_full = self.window.is_full();
        let shaking = window_full && stddev >= self.deviation_threshold;

        let transition = match (self.state, shaking) {
            (DetectorState::Idle, true) => Some(Transition::Started),
            (DetectorState::Active, false) => Some(Transition::Ended),
            _ => None,
        };

        if let Some(edge) = transition {
            self.state = edge.target();
            self.transitions += 1;
        }

        Ok(TickOutcome {
            magnitude,
            stddev,
            window_full,
            transition,
            state: self.state,
        })
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn deviation_threshold(&self) -> f32 {
        self.deviation_threshold
    }

    /// The magnitude window.
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Recent standard deviations, oldest first. Informational only.
    pub fn deviation_history(&self) -> &SampleWindow {
        &self.deviation_history
    }

    /// Number of samples accepted so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Number of state transitions so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}

// ============================================================================
// TESTS
// ============================================================================
