//! Error taxonomy for the shake sensing core.
//!
//! Errors fall into three groups:
//! - Local, recoverable: [`ShakeError::InvalidSample`] (the loop skips the tick).
//! - API misuse: [`ShakeError::AlreadyStarted`], [`ShakeError::NotStarted`],
//!   [`ShakeError::InvalidConfig`].
//! - Fatal to the sampling loop: [`ShakeError::SensorUnavailable`],
//!   [`ShakeError::EmptyWindow`] and [`ShakeError::WorkerPanicked`].

use thiserror::Error;

/// Errors that can occur while sampling or evaluating the motion stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShakeError {
    /// A sample (or derived magnitude) was NaN or infinite.
    #[error("Invalid sample: {0} is not a finite value")]
    InvalidSample(f32),

    /// Statistics were requested from a window holding no samples.
    #[error("Sample window is empty")]
    EmptyWindow,

    /// The sensor source disconnected or could not produce a reading.
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// `start()` was called on a detector that is already running or has run.
    #[error("Detector already started")]
    AlreadyStarted,

    /// `join()` was called before `start()`.
    #[error("Detector not started")]
    NotStarted,

    /// Construction parameters cannot describe a working detector.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The sampling thread could not be spawned.
    #[error("Failed to spawn sampling thread: {0}")]
    ThreadSpawn(String),

    /// The sampling thread panicked (usually inside a user callback).
    #[error("Sampling thread panicked")]
    WorkerPanicked,
}

impl ShakeError {
    /// Whether this error terminates the sampling loop.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShakeError::SensorUnavailable(_) | ShakeError::EmptyWindow | ShakeError::WorkerPanicked
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShakeError>;
