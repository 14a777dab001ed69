//! Core data types for the shake sensing engine.
//!
//! A reading enters as an [`AccelSample`], is reduced to a scalar magnitude,
//! and drives a two-state [`DetectorState`] machine whose edges are reported
//! as [`Transition`]s.

/// A single raw 3-axis accelerometer reading.
///
/// Units are whatever the sensor reports (raw counts for most game
/// controllers, m/s² for phones). The engine only looks at the spread of the
/// magnitude over time, so no calibration is assumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    /// Accelerometer reading [x, y, z].
    pub accel: [f32; 3],
}

impl AccelSample {
    /// Creates a sample from its three axes.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { accel: [x, y, z] }
    }

    /// Euclidean norm of the three axes.
    pub fn magnitude(&self) -> f32 {
        let x2 = self.accel[0] * self.accel[0];
        let y2 = self.accel[1] * self.accel[1];
        let z2 = self.accel[2] * self.accel[2];
        (x2 + y2 + z2).sqrt()
    }

    /// True if every axis is a finite number.
    pub fn is_finite(&self) -> bool {
        self.accel.iter().all(|v| v.is_finite())
    }
}

impl From<[f32; 3]> for AccelSample {
    fn from(accel: [f32; 3]) -> Self {
        Self { accel }
    }
}

impl From<(f32, f32, f32)> for AccelSample {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

/// State of the shake gesture machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectorState {
    /// No gesture in progress. Initial state.
    #[default]
    Idle,
    /// A shake is in progress: the window is full and its deviation is at
    /// or above the threshold.
    Active,
}

impl DetectorState {
    /// Compact encoding used to mirror the state across threads.
    pub(crate) fn as_u8(self) -> u8 {
        match self {
            DetectorState::Idle => 0,
            DetectorState::Active => 1,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            1 => DetectorState::Active,
            _ => DetectorState::Idle,
        }
    }

    pub fn is_active(self) -> bool {
        self == DetectorState::Active
    }
}

/// An edge of the state machine. Emitted at most once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Idle → Active. Triggers `on_action_start`.
    Started,
    /// Active → Idle. Triggers `on_action_end`.
    Ended,
}

impl Transition {
    /// State the machine is in after this transition.
    pub fn target(self) -> DetectorState {
        match self {
            Transition::Started => DetectorState::Active,
            Transition::Ended => DetectorState::Idle,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Transition::Started => "shake started",
            Transition::Ended => "shake ended",
        }
    }
}
