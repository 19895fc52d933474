//! Volume fraction
//!
//! The sink receives a plain linear fraction; clamping happens here so the
//! stored value can never leave [0, 1].

use serde::{Deserialize, Serialize};

/// Default session volume (a third of full scale)
pub const DEFAULT_VOLUME: f32 = 1.0 / 3.0;

/// Volume fraction, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Volume(f32);

impl Volume {
    /// Silence
    pub const MIN: Self = Self(0.0);

    /// Full scale
    pub const MAX: Self = Self(1.0);

    /// Clamp a fraction into range
    ///
    /// Returns `None` for NaN or infinite input.
    pub fn new(fraction: f32) -> Option<Self> {
        fraction
            .is_finite()
            .then(|| Self(fraction.clamp(0.0, 1.0)))
    }

    /// Fraction in [0, 1]
    pub fn get(self) -> f32 {
        self.0
    }

    /// Percentage for display (0-100)
    pub fn percent(self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

impl TryFrom<f32> for Volume {
    type Error = String;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("volume must be finite, got {value}"))
    }
}

impl From<Volume> for f32 {
    fn from(volume: Volume) -> Self {
        volume.0
    }
}
