#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod calibration;
pub mod config;
pub mod errors;
pub mod field;
pub mod geometry;
pub mod load;
pub mod report;
pub mod stress;
pub mod summary;

pub use calibration::{
    Calibration, ConcentrationModel, LinearDecay, ScanGrid, StressConcentration, TabulatedDecay,
    MAX_SCAN_POINTS_PER_AXIS,
};
pub use config::Scenario;
pub use errors::{CalibrationError, ConfigError, FieldError, ProfileError};
pub use field::{FieldPeak, StressField, MAX_SAMPLES_PER_AXIS};
pub use geometry::{point, Point, Profile, ProfileDimensions};
pub use load::{Fiber, Load, LoadDirection};
pub use report::render_summary;
pub use stress::{CornerPeak, StressEvaluator, StressSample};
pub use summary::{CriticalPoint, Governing, Material, SafetyStatus, Summary};
