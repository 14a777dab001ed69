//! Threaded shake detector.
//!
//! [`ShakeDetector`] owns a [`SensorSource`] and runs the sampling loop on a
//! dedicated thread. Each tick reads one sample, advances the
//! [`ShakeTracker`] and, when the state flips, calls the matching callback.
//!
//! # Callback contract
//!
//! Callbacks run synchronously on the sampling thread at the moment of the
//! transition. The next tick does not start until the callback returns, so
//! a slow callback delays sampling. Hand long work off to another thread or
//! channel.
//!
//! # Lifecycle
//!
//! ```text
//!   new() --start()--> running --stop() / sensor failure--> finished --join()
//! ```
//!
//! `stop()` is cooperative and takes effect at the next tick boundary. A
//! `SensorUnavailable` from the source ends the loop on that tick; `join()`
//! then returns the error while the last tracker state stays readable.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::error::{Result, ShakeError};
use crate::sensor::SensorSource;
use crate::tracker::{ShakeTracker, TrackerConfig};
use crate::types::{DetectorState, Transition};

/// Detector configuration. Immutable once the detector is built.
#[derive(Debug, Clone)]
pub struct ShakeConfig {
    /// Window and threshold parameters.
    pub tracker: TrackerConfig,

    /// Pulse the source's haptics once at construction as a "connected"
    /// acknowledgment.
    pub init_haptic: bool,

    /// Length of the construction-time haptic pulse.
    pub haptic_pulse: Duration,

    /// Delay between ticks.
    pub tick_interval: Duration,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            init_haptic: true,
            haptic_pulse: Duration::from_secs(1),
            tick_interval: Duration::from_millis(50),
        }
    }
}

impl ShakeConfig {
    pub fn with_threshold(mut self, deviation_threshold: f32) -> Self {
        self.tracker.deviation_threshold = deviation_threshold;
        self
    }

    pub fn with_buf_size(mut self, buf_size: usize) -> Self {
        self.tracker.buf_size = buf_size;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn without_haptic(mut self) -> Self {
        self.init_haptic = false;
        self
    }
}

/// A transition callback. Runs on the sampling thread.
pub type Callback = Box<dyn FnMut() + Send + 'static>;

/// The two optional notifications. Absent callbacks are no-ops.
#[derive(Default)]
pub struct ShakeCallbacks {
    pub on_action_start: Option<Callback>,
    pub on_action_end: Option<Callback>,
}

impl ShakeCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called on every Idle → Active transition.
    pub fn on_action_start<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_action_start = Some(Box::new(f));
        self
    }

    /// Called on every Active → Idle transition.
    pub fn on_action_end<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_action_end = Some(Box::new(f));
        self
    }

    fn fire(&mut self, transition: Transition) {
        let callback = match transition {
            Transition::Started => self.on_action_start.as_mut(),
            Transition::Ended => self.on_action_end.as_mut(),
        };
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl std::fmt::Debug for ShakeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShakeCallbacks")
            .field("on_action_start", &self.on_action_start.is_some())
            .field("on_action_end", &self.on_action_end.is_some())
            .finish()
    }
}

/// Statistics of a finished sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Samples accepted into the window.
    pub ticks: u64,
    /// Ticks skipped because the reading was not finite.
    pub skipped_samples: u64,
    /// State transitions (start + end callbacks dispatched).
    pub transitions: u64,
    /// State when the loop ended.
    pub final_state: DetectorState,
    /// Deviation history at exit, oldest first.
    pub deviation_history: Vec<f32>,
    /// True if the loop ended because `stop()` was called.
    pub stopped_by_request: bool,
}

/// Cloneable handle that stops a running detector from any thread,
/// including from inside a callback.
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// What the sampling thread hands back when it exits.
struct LoopExit<S> {
    source: S,
    summary: RunSummary,
    error: Option<ShakeError>,
}

/// Everything the sampling thread owns.
struct SamplingLoop<S> {
    source: S,
    tracker: ShakeTracker,
    callbacks: ShakeCallbacks,
    tick_interval: Duration,
    stop_flag: Arc<AtomicBool>,
    shared_state: Arc<AtomicU8>,
}

impl<S: SensorSource> SamplingLoop<S> {
    fn run(mut self) -> LoopExit<S> {
        log::info!(
            "Shake sampling started: threshold={}, window={}, tick={:?}",
            self.tracker.deviation_threshold(),
            self.tracker.window().capacity(),
            self.tick_interval
        );

        let mut skipped_samples = 0u64;
        let mut stopped_by_request = false;
        let mut error = None;

        loop {
            if self.stop_flag.load(Ordering::Acquire) {
                stopped_by_request = true;
                break;
            }

            let tick = self
                .source
                .read()
                .and_then(|sample| self.tracker.process_sample(&sample));

            match tick {
                Ok(outcome) => {
                    if let Some(transition) = outcome.transition {
                        self.shared_state
                            .store(outcome.state.as_u8(), Ordering::Release);
                        log::debug!(
                            "{} at tick {} (stddev {:.2})",
                            transition.description(),
                            self.tracker.ticks(),
                            outcome.stddev
                        );
                        self.callbacks.fire(transition);
                    }
                }
                Err(ShakeError::InvalidSample(value)) => {
                    skipped_samples += 1;
                    log::warn!("Skipping non-finite sample ({})", value);
                }
                Err(e) => {
                    log::error!("Shake sampling aborted: {}", e);
                    error = Some(e);
                    break;
                }
            }

            thread::sleep(self.tick_interval);
        }

        let summary = RunSummary {
            ticks: self.tracker.ticks(),
            skipped_samples,
            transitions: self.tracker.transitions(),
            final_state: self.tracker.state(),
            deviation_history: self.tracker.deviation_history().to_vec(),
            stopped_by_request,
        };

        log::info!(
            "Shake sampling finished after {} ticks ({} transitions)",
            summary.ticks,
            summary.transitions
        );

        LoopExit {
            source: self.source,
            summary,
            error,
        }
    }
}

/// Shake gesture detector driving a sensor source from a background thread.
pub struct ShakeDetector<S: SensorSource + 'static> {
    config: ShakeConfig,
    source: Option<S>,
    tracker: Option<ShakeTracker>,
    callbacks: Option<ShakeCallbacks>,
    stop_flag: Arc<AtomicBool>,
    shared_state: Arc<AtomicU8>,
    handle: Option<JoinHandle<LoopExit<S>>>,
    started: bool,
    summary: Option<RunSummary>,
    last_error: Option<ShakeError>,
}

impl<S: SensorSource + 'static> ShakeDetector<S> {
    /// Build a detector around `source`.
    ///
    /// Validates the configuration and, if `init_haptic` is set, pulses the
    /// source's haptics for `haptic_pulse` before returning.
    pub fn new(mut source: S, config: ShakeConfig, callbacks: ShakeCallbacks) -> Result<Self> {
        let tracker = ShakeTracker::new(&config.tracker)?;

        if config.init_haptic {
            source.set_haptic(true)?;
            thread::sleep(config.haptic_pulse);
            source.set_haptic(false)?;
        }

        Ok(Self {
            config,
            source: Some(source),
            tracker: Some(tracker),
            callbacks: Some(callbacks),
            stop_flag: Arc::new(AtomicBool::new(false)),
            shared_state: Arc::new(AtomicU8::new(DetectorState::Idle.as_u8())),
            handle: None,
            started: false,
            summary: None,
            last_error: None,
        })
    }

    /// Spawn the sampling thread. Returns immediately.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Err(ShakeError::AlreadyStarted);
        }
        let (source, tracker, callbacks) =
            match (self.source.take(), self.tracker.take(), self.callbacks.take()) {
                (Some(source), Some(tracker), Some(callbacks)) => (source, tracker, callbacks),
                _ => return Err(ShakeError::AlreadyStarted),
            };
        self.started = true;

        let sampling = SamplingLoop {
            source,
            tracker,
            callbacks,
            tick_interval: self.config.tick_interval,
            stop_flag: Arc::clone(&self.stop_flag),
            shared_state: Arc::clone(&self.shared_state),
        };

        let handle = thread::Builder::new()
            .name("shake-sampler".to_string())
            .spawn(move || sampling.run())
            .map_err(|e| ShakeError::ThreadSpawn(e.to_string()))?;
        self.handle = Some(handle);
        Ok(())
    }

    /// Ask the loop to end at the next tick boundary. Idempotent.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Release);
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop_flag),
        }
    }

    /// Block until the loop has ended.
    ///
    /// Returns the run summary, or the error that ended the loop. The
    /// outcome is kept, so calling `join` again returns the same result.
    pub fn join(&mut self) -> Result<RunSummary> {
        if !self.started {
            return Err(ShakeError::NotStarted);
        }
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(exit) => {
                    self.source = Some(exit.source);
                    self.summary = Some(exit.summary);
                    self.last_error = exit.error;
                }
                Err(_) => {
                    log::error!("Shake sampling thread panicked");
                    self.last_error = Some(ShakeError::WorkerPanicked);
                }
            }
        }
        if let Some(e) = &self.last_error {
            return Err(e.clone());
        }
        self.summary.clone().ok_or(ShakeError::WorkerPanicked)
    }

    /// Current state of the machine, as last published by the loop.
    pub fn state(&self) -> DetectorState {
        DetectorState::from_u8(self.shared_state.load(Ordering::Acquire))
    }

    /// True while the sampling thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Error that ended the loop, available after `join`.
    pub fn last_error(&self) -> Option<&ShakeError> {
        self.last_error.as_ref()
    }

    /// Summary of the finished run, available after `join` (also when the
    /// loop ended with an error).
    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// The sensor source, while it is not lent to the sampling thread.
    pub fn source(&self) -> Option<&S> {
        self.source.as_ref()
    }

    pub fn config(&self) -> &ShakeConfig {
        &self.config
    }
}

impl<S: SensorSource + 'static> Drop for ShakeDetector<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.stop();
            let _ = handle.join();
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
