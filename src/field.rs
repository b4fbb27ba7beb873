//! Dense raster of the stress field over the beam footprint.

use ndarray::Array2;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::calibration::StressConcentration;
use crate::errors::FieldError;
use crate::geometry::Point;
use crate::load::Load;
use crate::stress::StressEvaluator;

/// Stress sampled on a regular grid covering `[0, total_length] × [0, total_height]`.
///
/// Row `i` holds the samples at `y = i · step` and column `j` the samples at
/// `x = j · step`. Cells outside the material, or downstream of the load, hold
/// zero.
#[derive(Clone, Debug, PartialEq)]
pub struct StressField {
    /// Grid spacing in millimetres.
    step: f64,
    /// Stress in MPa indexed by `(row, column)`.
    values: Array2<f64>,
}

/// Largest number of samples a [`StressField`] may place along one axis.
pub const MAX_SAMPLES_PER_AXIS: usize = 10_000;

/// Largest sample of a [`StressField`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FieldPeak {
    /// Position of the sample.
    pub location: Point,
    /// Stress at the sample in MPa.
    pub stress: f64,
}

impl StressField {
    /// Sample `evaluator` under `load` every `step` millimetres.
    ///
    /// Rows are evaluated in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::NonPositiveStep`] when `step` is not strictly
    /// positive and finite, and [`FieldError::TooManySamples`] when either axis
    /// would carry more than [`MAX_SAMPLES_PER_AXIS`] samples.
    ///
    /// # Panics
    ///
    /// Does not panic in practice: every row yields exactly one sample per
    /// column, so the collected samples always fill the grid shape.
    ///
    /// # Examples
    /// ```
    /// use taperbeam::{Load, Profile, ProfileDimensions, StressEvaluator, StressField};
    ///
    /// let profile = Profile::new(ProfileDimensions::default()).expect("valid profile");
    /// let evaluator = StressEvaluator::new(&profile);
    /// let field = StressField::sample(&evaluator, &Load::default(), 10.0).expect("valid step");
    /// assert_eq!(field.shape(), (11, 26));
    /// ```
    pub fn sample<C>(
        evaluator: &StressEvaluator<'_, C>,
        load: &Load,
        step: f64,
    ) -> Result<Self, FieldError>
    where
        C: StressConcentration + Sync,
    {
        if !(step.is_finite() && step > 0.0) {
            return Err(FieldError::NonPositiveStep(step));
        }
        let profile = evaluator.profile();
        let extent = profile.total_length().max(profile.total_height());
        if extent / step + 1.0 > MAX_SAMPLES_PER_AXIS as f64 {
            return Err(FieldError::TooManySamples {
                extent,
                step,
                limit: MAX_SAMPLES_PER_AXIS,
            });
        }
        let columns = axis_len(profile.total_length(), step);
        let rows = axis_len(profile.total_height(), step);

        let values: Vec<f64> = (0..rows)
            .into_par_iter()
            .flat_map_iter(|row| {
                let y = row as f64 * step;
                (0..columns).map(move |column| evaluator.stress_at(column as f64 * step, y, load))
            })
            .collect();
        let values = Array2::from_shape_vec((rows, columns), values)
            .expect("sample count matches the grid shape");

        debug!(rows, columns, step, "stress field sampled");
        Ok(Self { step, values })
    }

    /// Grid spacing in millimetres.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of rows and columns.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// The raw samples indexed by `(row, column)`.
    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Position of the cell at `(row, column)`.
    #[must_use]
    pub fn position(&self, row: usize, column: usize) -> Point {
        Point::new(column as f64 * self.step, row as f64 * self.step)
    }

    /// Stress at `(row, column)`, `None` outside the grid.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get((row, column)).copied()
    }

    /// Largest sample, `None` when the whole field is unstressed.
    ///
    /// Ties resolve to the first cell in row-major order.
    #[must_use]
    pub fn peak(&self) -> Option<FieldPeak> {
        let mut peak: Option<FieldPeak> = None;
        for ((row, column), &stress) in self.values.indexed_iter() {
            if stress > peak.map_or(0.0, |best| best.stress) {
                peak = Some(FieldPeak {
                    location: self.position(row, column),
                    stress,
                });
            }
        }
        peak
    }

    /// Number of cells whose stress exceeds `threshold` MPa.
    #[must_use]
    pub fn count_above(&self, threshold: f64) -> usize {
        self.values.iter().filter(|&&stress| stress > threshold).count()
    }
}

/// Number of samples at `0, step, 2·step, …` not exceeding `extent`.
///
/// Callers bound `extent / step` first.
fn axis_len(extent: f64, step: f64) -> usize {
    (extent / step + 1.0e-9).floor() as usize + 1
}
