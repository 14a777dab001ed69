//! Sensor source abstraction.
//!
//! The detector pulls one 3-axis reading per tick from a [`SensorSource`].
//! Connecting to the physical device and enabling its motion reports happen
//! before a source is handed to the detector; the trait only covers what the
//! sampling loop needs.
//!
//! [`ReplaySource`] plays back a prerecorded stream and [`SyntheticShake`]
//! generates one, so the detector can be driven without hardware.

use crate::error::{Result, ShakeError};
use crate::types::AccelSample;

/// A device that produces accelerometer readings.
///
/// `read` may block until the device has a new report. Returning
/// `SensorUnavailable` ends the sampling loop.
pub trait SensorSource: Send {
    /// Read the current accelerometer sample.
    fn read(&mut self) -> Result<AccelSample>;

    /// Turn haptic feedback on or off. Sources without haptics ignore this.
    fn set_haptic(&mut self, _on: bool) -> Result<()> {
        Ok(())
    }
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn read(&mut self) -> Result<AccelSample> {
        (**self).read()
    }

    fn set_haptic(&mut self, on: bool) -> Result<()> {
        (**self).set_haptic(on)
    }
}

/// Replays a fixed sequence of readings, then reports a disconnect.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    samples: Vec<AccelSample>,
    position: usize,
    /// Read index at which the source reports a disconnect, if earlier than
    /// the end of the recording.
    disconnect_at: Option<usize>,
    haptic_log: Vec<bool>,
}

impl ReplaySource {
    pub fn new(samples: Vec<AccelSample>) -> Self {
        Self {
            samples,
            position: 0,
            disconnect_at: None,
            haptic_log: Vec::new(),
        }
    }

    /// Build a source from precomputed magnitudes, one per reading (all on
    /// the x axis).
    pub fn from_magnitudes(magnitudes: &[f32]) -> Self {
        Self::new(
            magnitudes
                .iter()
                .map(|&m| AccelSample::new(m, 0.0, 0.0))
                .collect(),
        )
    }

    /// Report `SensorUnavailable` on the read with this zero-based index.
    pub fn disconnect_at(mut self, read_index: usize) -> Self {
        self.disconnect_at = Some(read_index);
        self
    }

    /// Number of successful reads so far.
    pub fn reads(&self) -> usize {
        self.position
    }

    /// Every `set_haptic` call, in order.
    pub fn haptic_log(&self) -> &[bool] {
        &self.haptic_log
    }
}

impl SensorSource for ReplaySource {
    fn read(&mut self) -> Result<AccelSample> {
        if self.disconnect_at == Some(self.position) {
            return Err(ShakeError::SensorUnavailable(format!(
                "device disconnected after {} readings",
                self.position
            )));
        }
        let sample = self.samples.get(self.position).copied().ok_or_else(|| {
            ShakeError::SensorUnavailable(format!(
                "recording exhausted after {} readings",
                self.position
            ))
        })?;
        self.position += 1;
        Ok(sample)
    }

    fn set_haptic(&mut self, on: bool) -> Result<()> {
        self.haptic_log.push(on);
        Ok(())
    }
}

/// Deterministic accelerometer stream: a device at rest with shake bursts.
///
/// At rest every reading is the gravity vector. During a burst the reading
/// swings `amplitude` above and below gravity along the gravity axis, so
/// the magnitude alternates between `|g| + amplitude` and
/// `||g| - amplitude|`.
#[derive(Debug, Clone)]
pub struct SyntheticShake {
    /// Gravity reading at rest, in sensor units.
    pub gravity: [f32; 3],
    /// Peak excursion along the gravity axis during a burst.
    pub amplitude: f32,
    /// Readings at rest before the first burst and between bursts.
    pub rest_len: usize,
    /// Readings per burst.
    pub burst_len: usize,
    /// Number of bursts.
    pub bursts: usize,
}

impl Default for SyntheticShake {
    fn default() -> Self {
        Self {
            gravity: [0.0, 0.0, 25.0], // raw 1g on a typical controller
            amplitude: 60.0,
            rest_len: 20,
            burst_len: 20,
            bursts: 1,
        }
    }
}

impl SyntheticShake {
    /// Generate the full stream, ending with a rest period.
    pub fn generate(&self) -> Vec<AccelSample> {
        let mut samples =
            Vec::with_capacity(self.rest_len * (self.bursts + 1) + self.burst_len * self.bursts);
        let rest = AccelSample::from(self.gravity);
        let axis = self.swing_axis();

        for _ in 0..self.bursts {
            samples.extend(std::iter::repeat(rest).take(self.rest_len));
            for i in 0..self.burst_len {
                let offset = if i % 2 == 0 { self.amplitude } else { -self.amplitude };
                samples.push(AccelSample::new(
                    self.gravity[0] + offset * axis[0],
                    self.gravity[1] + offset * axis[1],
                    self.gravity[2] + offset * axis[2],
                ));
            }
        }
        samples.extend(std::iter::repeat(rest).take(self.rest_len));
        samples
    }

    /// Unit vector along gravity; x axis if gravity is zero.
    fn swing_axis(&self) -> [f32; 3] {
        let g = AccelSample::from(self.gravity).magnitude();
        if g < f32::EPSILON {
            return [1.0, 0.0, 0.0];
        }
        [self.gravity[0] / g, self.gravity[1] / g, self.gravity[2] / g]
    }

    /// Wrap the generated stream in a [`ReplaySource`].
    pub fn into_source(self) -> ReplaySource {
        ReplaySource::new(self.generate())
    }
}
