//! Error types produced while building profiles, calibrations and scenarios.

use std::path::PathBuf;

use thiserror::Error;

/// Error returned when a set of dimensions does not describe a usable beam profile.
///
/// The variants describe the reason the supplied value is rejected so callers can
/// present actionable feedback to users.
///
/// # Examples
///
/// ```
/// use taperbeam::{Profile, ProfileDimensions, ProfileError};
///
/// let dimensions = ProfileDimensions {
///     thickness: 0.0,
///     ..ProfileDimensions::default()
/// };
/// let error = Profile::new(dimensions).expect_err("zero thickness is rejected");
/// assert_eq!(
///     error,
///     ProfileError::NonPositiveDimension { field: "thickness", value: 0.0 }
/// );
/// ```
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ProfileError {
    /// Returned when a dimension is NaN or infinite.
    #[error("{field} must be finite (received {value})")]
    NonFiniteDimension {
        /// Name of the offending dimension.
        field: &'static str,
        /// Rejected value in millimetres.
        value: f64,
    },
    /// Returned when a length is negative.
    #[error("{field} must not be negative (received {value})")]
    NegativeDimension {
        /// Name of the offending dimension.
        field: &'static str,
        /// Rejected value in millimetres.
        value: f64,
    },
    /// Returned when a dimension that sets a section height or thickness is not strictly positive.
    #[error("{field} must be positive (received {value})")]
    NonPositiveDimension {
        /// Name of the offending dimension.
        field: &'static str,
        /// Rejected value in millimetres.
        value: f64,
    },
    /// Returned when the taper drop consumes the whole section height.
    #[error("taper drop {taper_drop} leaves no material below total height {total_height}")]
    TaperDropTooDeep {
        /// Full section height in millimetres.
        total_height: f64,
        /// Vertical drop at the start of the taper in millimetres.
        taper_drop: f64,
    },
    /// Returned when the full-height segment and the taper do not fit in the beam.
    #[error(
        "left width {left_width} plus taper length {taper_length} exceeds total length {total_length}"
    )]
    TaperBeyondLength {
        /// Length of the full-height segment in millimetres.
        left_width: f64,
        /// Length of the taper in millimetres.
        taper_length: f64,
        /// Overall beam length in millimetres.
        total_length: f64,
    },
}

/// Error returned when calibration constants would break the evaluator's guarantees.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum CalibrationError {
    /// Returned when a concentration factor would reduce stress.
    #[error("concentration factor must be at least 1 (received {0})")]
    FactorBelowOne(f64),
    /// Returned when the influence radius is not strictly positive.
    #[error("influence radius must be positive (received {0})")]
    NonPositiveRadius(f64),
    /// Returned when the scan half-width is negative or not finite.
    #[error("scan half-width must be finite and non-negative (received {0})")]
    InvalidHalfWidth(f64),
    /// Returned when the scan step is not strictly positive.
    #[error("scan step must be positive (received {0})")]
    NonPositiveStep(f64),
    /// Returned when the scan grid would hold more points per axis than allowed.
    #[error(
        "scan half-width {half_width} with step {step} exceeds {limit} points per axis"
    )]
    ScanTooDense {
        /// Requested half-width in millimetres.
        half_width: f64,
        /// Requested spacing in millimetres.
        step: f64,
        /// Largest accepted number of points per axis.
        limit: usize,
    },
    /// Returned when a concentration table has no entries.
    #[error("concentration table must contain at least one entry")]
    EmptyTable,
    /// Returned when concentration table distances are not strictly increasing.
    #[error("concentration table distances must be non-negative and strictly increasing (entry {0})")]
    UnorderedTable(usize),
}

/// Error returned when a stress field cannot be sampled at the requested spacing.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum FieldError {
    /// Returned when the raster step is not strictly positive and finite.
    #[error("field step must be positive (received {0})")]
    NonPositiveStep(f64),
    /// Returned when the raster would hold more samples per axis than allowed.
    #[error("field step {step} over {extent} mm exceeds {limit} samples per axis")]
    TooManySamples {
        /// Longest side of the beam footprint in millimetres.
        extent: f64,
        /// Requested spacing in millimetres.
        step: f64,
        /// Largest accepted number of samples per axis.
        limit: usize,
    },
}

/// Error returned when a scenario cannot be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the scenario file cannot be read.
    #[error("cannot read scenario file {path}: {source}")]
    Io {
        /// Location of the scenario file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the scenario cannot be converted from or to JSON.
    ///
    /// On reading this covers malformed JSON and schema mismatches. Profile and
    /// calibration validation failures surface here as well, because both are
    /// checked while deserializing.
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when the profile is rejected.
    #[error("invalid profile: {0}")]
    Profile(#[from] ProfileError),
    /// Returned when the load is applied outside the beam.
    #[error("load position {position_x} lies outside the beam [0, {total_length}]")]
    LoadOutsideBeam {
        /// Requested load position in millimetres.
        position_x: f64,
        /// Overall beam length in millimetres.
        total_length: f64,
    },
    /// Returned when the load magnitude is NaN or infinite.
    #[error("load magnitude must be finite (received {0})")]
    NonFiniteMagnitude(f64),
    /// Returned when the material yield strength is not strictly positive.
    #[error("yield strength must be positive (received {0})")]
    NonPositiveYieldStrength(f64),
}
