//! Calibration constants for the corner correction and the worst-case scan.
//!
//! The closed-form bending stress is exact for a prismatic beam but
//! underestimates the peak at a stepped re-entrant corner. The correction here is
//! an empirical stand-in for a proper stress concentration chart, so its
//! constants live in one place and can be replaced without touching the
//! evaluator.

use serde::{Deserialize, Serialize};

use crate::errors::CalibrationError;

/// Multiplier applied to the nominal stress as a function of distance to the corner.
///
/// Implementations must return a value of at least `1.0` for every finite,
/// non-negative distance, so the corrected stress never drops below the
/// nominal one.
pub trait StressConcentration {
    /// Correction factor at `distance` millimetres from the corner.
    fn factor_at(&self, distance: f64) -> f64;

    /// Distance beyond which the factor is exactly `1.0`.
    fn influence_radius(&self) -> f64;
}

/// Concentration factor decaying linearly from its peak at the corner to one at
/// the influence radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLinearDecay")]
pub struct LinearDecay {
    /// Peak factor at the corner.
    factor: f64,
    /// Distance in millimetres at which the correction vanishes.
    radius: f64,
}

/// Unvalidated form of [`LinearDecay`] used during deserialization.
#[derive(Deserialize)]
struct RawLinearDecay {
    /// Peak factor at the corner.
    factor: f64,
    /// Influence radius in millimetres.
    radius: f64,
}

impl TryFrom<RawLinearDecay> for LinearDecay {
    type Error = CalibrationError;

    fn try_from(value: RawLinearDecay) -> Result<Self, Self::Error> {
        Self::new(value.factor, value.radius)
    }
}

impl Default for LinearDecay {
    /// A factor of 2 for a sharp re-entrant corner fading out over 15 mm.
    fn default() -> Self {
        Self {
            factor: 2.0,
            radius: 15.0,
        }
    }
}

impl LinearDecay {
    /// Create a linear decay model.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::FactorBelowOne`] when `factor` is below one or not
    /// finite and [`CalibrationError::NonPositiveRadius`] when `radius` is not
    /// strictly positive.
    pub fn new(factor: f64, radius: f64) -> Result<Self, CalibrationError> {
        if !(factor.is_finite() && factor >= 1.0) {
            return Err(CalibrationError::FactorBelowOne(factor));
        }
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CalibrationError::NonPositiveRadius(radius));
        }
        Ok(Self { factor, radius })
    }

    /// Peak factor at the corner.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Radius of the influence disk in millimetres.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl StressConcentration for LinearDecay {
    fn factor_at(&self, distance: f64) -> f64 {
        if distance < self.radius {
            let decay = (1.0 - distance / self.radius).max(0.0);
            1.0 + (self.factor - 1.0) * decay
        } else {
            1.0
        }
    }

    fn influence_radius(&self) -> f64 {
        self.radius
    }
}

/// Concentration factor interpolated from a table of `(distance, factor)` pairs.
///
/// Between entries the factor is interpolated linearly. Before the first entry
/// the first factor applies; past the last entry the factor is one, so the
/// last distance is the influence radius. This is the shape of data read off a
/// published Kt chart or fitted to finite element results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(f64, f64)>", into = "Vec<(f64, f64)>")]
pub struct TabulatedDecay {
    /// Sorted `(distance, factor)` entries.
    entries: Vec<(f64, f64)>,
}

impl TabulatedDecay {
    /// Build a table from `(distance, factor)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::EmptyTable`] for an empty table,
    /// [`CalibrationError::UnorderedTable`] when distances are negative or not
    /// strictly increasing, and [`CalibrationError::FactorBelowOne`] when any
    /// factor is below one.
    ///
    /// # Examples
    /// ```
    /// use taperbeam::{StressConcentration, TabulatedDecay};
    ///
    /// let table = TabulatedDecay::new(vec![(0.0, 2.4), (5.0, 1.5), (12.0, 1.0)]).expect("valid");
    /// assert!((table.factor_at(2.5) - 1.95).abs() < 1.0e-12);
    /// assert_eq!(table.factor_at(20.0), 1.0);
    /// ```
    pub fn new(entries: Vec<(f64, f64)>) -> Result<Self, CalibrationError> {
        if entries.is_empty() {
            return Err(CalibrationError::EmptyTable);
        }
        let mut previous = None;
        for (index, &(distance, factor)) in entries.iter().enumerate() {
            let ordered = previous.map_or(true, |last| distance > last);
            if !(distance.is_finite() && distance >= 0.0 && ordered) {
                return Err(CalibrationError::UnorderedTable(index));
            }
            if !(factor.is_finite() && factor >= 1.0) {
                return Err(CalibrationError::FactorBelowOne(factor));
            }
            previous = Some(distance);
        }
        Ok(Self { entries })
    }

    /// The table entries.
    #[must_use]
    pub fn entries(&self) -> &[(f64, f64)] {
        &self.entries
    }
}

impl TryFrom<Vec<(f64, f64)>> for TabulatedDecay {
    type Error = CalibrationError;

    fn try_from(value: Vec<(f64, f64)>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TabulatedDecay> for Vec<(f64, f64)> {
    fn from(value: TabulatedDecay) -> Self {
        value.entries
    }
}

impl StressConcentration for TabulatedDecay {
    fn factor_at(&self, distance: f64) -> f64 {
        let Some(&(first_distance, first_factor)) = self.entries.first() else {
            return 1.0;
        };
        if distance <= first_distance {
            return first_factor;
        }
        for window in self.entries.windows(2) {
            let (d0, f0) = window[0];
            let (d1, f1) = window[1];
            if distance <= d1 {
                return f0 + (f1 - f0) * (distance - d0) / (d1 - d0);
            }
        }
        1.0
    }

    fn influence_radius(&self) -> f64 {
        self.entries.last().map_or(0.0, |&(distance, _)| distance)
    }
}

/// Either concentration model, selectable from a scenario file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ConcentrationModel {
    /// Linear decay from a peak factor.
    Linear(LinearDecay),
    /// Piecewise-linear table.
    Tabulated {
        /// `(distance, factor)` pairs.
        table: TabulatedDecay,
    },
}

impl Default for ConcentrationModel {
    fn default() -> Self {
        Self::Linear(LinearDecay::default())
    }
}

impl StressConcentration for ConcentrationModel {
    fn factor_at(&self, distance: f64) -> f64 {
        match self {
            Self::Linear(model) => model.factor_at(distance),
            Self::Tabulated { table } => table.factor_at(distance),
        }
    }

    fn influence_radius(&self) -> f64 {
        match self {
            Self::Linear(model) => model.influence_radius(),
            Self::Tabulated { table } => table.influence_radius(),
        }
    }
}

/// Regular grid of offsets around the corner searched for the worst-case stress.
///
/// Coarser or finer grids change the reported maximum, so the defaults
/// (±10 mm in 2 mm steps, 11 × 11 points) are part of the calibration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScanGrid")]
pub struct ScanGrid {
    /// Largest offset from the corner along each axis in millimetres.
    half_width: f64,
    /// Spacing between grid points in millimetres.
    step: f64,
}

/// Unvalidated form of [`ScanGrid`] used during deserialization.
#[derive(Deserialize)]
struct RawScanGrid {
    /// Largest offset from the corner.
    half_width: f64,
    /// Spacing between grid points.
    step: f64,
}

/// Largest number of offsets a [`ScanGrid`] may place along one axis.
pub const MAX_SCAN_POINTS_PER_AXIS: usize = 10_000;

impl TryFrom<RawScanGrid> for ScanGrid {
    type Error = CalibrationError;

    fn try_from(value: RawScanGrid) -> Result<Self, Self::Error> {
        Self::new(value.half_width, value.step)
    }
}

impl Default for ScanGrid {
    fn default() -> Self {
        Self {
            half_width: 10.0,
            step: 2.0,
        }
    }
}

impl ScanGrid {
    /// Create a scan grid.
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::InvalidHalfWidth`] when `half_width` is negative
    /// or not finite, [`CalibrationError::NonPositiveStep`] when `step` is not
    /// strictly positive, and [`CalibrationError::ScanTooDense`] when an axis
    /// would carry more than [`MAX_SCAN_POINTS_PER_AXIS`] offsets.
    pub fn new(half_width: f64, step: f64) -> Result<Self, CalibrationError> {
        if !(half_width.is_finite() && half_width >= 0.0) {
            return Err(CalibrationError::InvalidHalfWidth(half_width));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(CalibrationError::NonPositiveStep(step));
        }
        if 2.0 * half_width / step + 1.0 > MAX_SCAN_POINTS_PER_AXIS as f64 {
            return Err(CalibrationError::ScanTooDense {
                half_width,
                step,
                limit: MAX_SCAN_POINTS_PER_AXIS,
            });
        }
        Ok(Self { half_width, step })
    }

    /// Largest offset along each axis.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Grid spacing.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Offsets along one axis, ascending from `-half_width`.
    ///
    /// Offsets are generated from an integer index so that the default grid hits
    /// `-10, -8, …, 10` exactly.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + Clone {
        // Small tolerance so that 2 * half_width / step landing a hair below an
        // integer still includes the last offset.
        let count = (2.0 * self.half_width / self.step + 1.0e-9).floor() as usize + 1;
        let half_width = self.half_width;
        let step = self.step;
        (0..count).map(move |index| -half_width + index as f64 * step)
    }

    /// Total number of candidate points on the grid.
    #[must_use]
    pub fn len(&self) -> usize {
        let per_axis = self.offsets().count();
        per_axis * per_axis
    }

    /// Whether the grid has no points.
    ///
    /// Always `false`: a grid holds at least the corner itself, and
    /// construction bounds the count so it cannot overflow.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Full set of constants injected into the evaluator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Corner stress concentration model.
    #[serde(default)]
    pub concentration: ConcentrationModel,
    /// Worst-case scan grid.
    #[serde(default)]
    pub scan: ScanGrid,
}
