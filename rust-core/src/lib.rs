//! Shake Sensing Engine Library
//!
//! Detects a "shake" gesture in a live 3-axis accelerometer stream and
//! reports it as a pair of edge-triggered notifications: one when the
//! gesture starts and one when it ends.
//!
//! # Detection
//!
//! Every tick the acceleration magnitude is pushed into a fixed-size
//! [`SampleWindow`]. Once the window is full, its population standard
//! deviation is compared against a threshold. The gesture is in progress
//! while the deviation is at or above the threshold; callbacks fire only
//! when that condition flips.
//!
//! # Layers
//!
//! - [`window`]: ring buffer with mean / standard deviation.
//! - [`tracker`]: synchronous per-tick state machine, no threads, no callbacks.
//! - [`detector`]: background sampling thread, callbacks, start/stop/join.
//! - [`sensor`]: the device interface plus replay and synthetic sources.
//!
//! # Example
//!
//! ```no_run
//! use shake_sensing::{ShakeCallbacks, ShakeConfig, ShakeDetector, SyntheticShake};
//!
//! let callbacks = ShakeCallbacks::new()
//!     .on_action_start(|| println!("shake started"))
//!     .on_action_end(|| println!("shake ended"));
//!
//! let source = SyntheticShake::default().into_source();
//! let mut detector = ShakeDetector::new(source, ShakeConfig::default(), callbacks)?;
//! detector.start()?;
//! let _ = detector.join();
//! # Ok::<(), shake_sensing::ShakeError>(())
//! ```

pub mod detector;
pub mod error;
pub mod sensor;
pub mod tracker;
pub mod types;
pub mod window;

#[cfg(test)]
mod stress_tests;

// Re-export commonly used types
pub use detector::{Callback, RunSummary, ShakeCallbacks, ShakeConfig, ShakeDetector, StopHandle};
pub use error::{Result, ShakeError};
pub use sensor::{ReplaySource, SensorSource, SyntheticShake};
pub use tracker::{ShakeTracker, TickOutcome, TrackerConfig};
pub use types::{AccelSample, DetectorState, Transition};
pub use window::SampleWindow;
