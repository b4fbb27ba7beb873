//! The single transverse point load acting on the beam.

use serde::{Deserialize, Serialize};

/// Sense in which the load acts on the beam.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    /// Load pushes the beam towards the bottom fibre.
    #[default]
    Downward,
    /// Load pushes the beam towards the top fibre.
    Upward,
}

impl LoadDirection {
    /// The opposite direction.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Downward => Self::Upward,
            Self::Upward => Self::Downward,
        }
    }
}

/// Whether a fibre is stretched or squeezed by the bending moment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fiber {
    /// The fibre is stretched.
    Tension,
    /// The fibre is squeezed.
    Compression,
}

/// Concentrated transverse load.
///
/// `magnitude` is in newtons and may be negative; its absolute value scales the
/// stress and a negative sign reverses the direction it acts in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Distance from the fixed root to the point of application in millimetres.
    pub position_x: f64,
    /// Load magnitude in newtons.
    pub magnitude: f64,
    /// Nominal direction of the load.
    #[serde(default)]
    pub direction: LoadDirection,
}

impl Default for Load {
    fn default() -> Self {
        Self::downward(180.0, 1_500.0)
    }
}

impl Load {
    /// Create a load with explicit direction.
    #[must_use]
    pub const fn new(position_x: f64, magnitude: f64, direction: LoadDirection) -> Self {
        Self {
            position_x,
            magnitude,
            direction,
        }
    }

    /// Create a downward load.
    #[must_use]
    pub const fn downward(position_x: f64, magnitude: f64) -> Self {
        Self::new(position_x, magnitude, LoadDirection::Downward)
    }

    /// Create an upward load.
    #[must_use]
    pub const fn upward(position_x: f64, magnitude: f64) -> Self {
        Self::new(position_x, magnitude, LoadDirection::Upward)
    }

    /// Direction the load actually acts in once the sign of the magnitude is applied.
    #[must_use]
    pub fn effective_direction(&self) -> LoadDirection {
        if self.magnitude < 0.0 {
            self.direction.reversed()
        } else {
            self.direction
        }
    }

    /// Bending moment about a section at `x` in N·mm.
    ///
    /// Only the magnitude of the lever arm is used; callers decide whether the
    /// section carries moment at all.
    #[must_use]
    pub fn moment_at(&self, x: f64) -> f64 {
        self.magnitude.abs() * (self.position_x - x).abs()
    }

    /// Classify the fibre at height `y` given the local neutral axis.
    ///
    /// A downward load on a cantilever hogs the beam, stretching fibres above the
    /// neutral axis.
    #[must_use]
    pub fn fiber_at(&self, y: f64, neutral_axis: f64) -> Fiber {
        let above = y > neutral_axis;
        match (self.effective_direction(), above) {
            (LoadDirection::Downward, true) | (LoadDirection::Upward, false) => Fiber::Tension,
            (LoadDirection::Downward, false) | (LoadDirection::Upward, true) => Fiber::Compression,
        }
    }
}
