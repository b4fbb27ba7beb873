//! Scenario files: profile, load, material and calibration in one JSON document.
//!
//! ```json
//! {
//!   "profile": {
//!     "total_height": 100.0, "left_width": 52.0, "end_height": 47.0,
//!     "total_length": 250.0, "taper_drop": 20.0, "taper_length": 40.0,
//!     "thickness": 20.0
//!   },
//!   "load": { "position_x": 180.0, "magnitude": 1500.0, "direction": "downward" },
//!   "material": { "name": "HDPE", "yield_strength": 26.0, "modulus": 800.0 },
//!   "calibration": {
//!     "concentration": { "model": "linear", "factor": 2.0, "radius": 15.0 },
//!     "scan": { "half_width": 10.0, "step": 2.0 }
//!   }
//! }
//! ```
//!
//! Every section except `profile` may be omitted and falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calibration::Calibration;
use crate::errors::ConfigError;
use crate::geometry::{Profile, ProfileDimensions};
use crate::load::Load;
use crate::stress::StressEvaluator;
use crate::summary::Material;

/// A complete load case ready for evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Beam geometry, validated while parsing.
    pub profile: Profile,
    /// The point load.
    #[serde(default)]
    pub load: Load,
    /// Material used to judge the results.
    #[serde(default)]
    pub material: Material,
    /// Correction and scan constants.
    #[serde(default)]
    pub calibration: Calibration,
}

impl Default for Scenario {
    /// The reference beam under its reference load.
    fn default() -> Self {
        Self {
            profile: Profile::new(ProfileDimensions::default())
                .expect("reference dimensions satisfy the profile invariants"),
            load: Load::default(),
            material: Material::default(),
            calibration: Calibration::default(),
        }
    }
}

impl Scenario {
    /// Assemble a scenario from raw profile dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Profile`] when the dimensions are rejected and the
    /// variants listed on [`Scenario::validate`].
    pub fn new(
        dimensions: ProfileDimensions,
        load: Load,
        material: Material,
        calibration: Calibration,
    ) -> Result<Self, ConfigError> {
        let scenario = Self {
            profile: Profile::new(dimensions)?,
            load,
            material,
            calibration,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Parse and validate a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or invalid profile and
    /// calibration values, and the variants listed on [`Scenario::validate`].
    ///
    /// # Examples
    /// ```
    /// use taperbeam::Scenario;
    ///
    /// let scenario = Scenario::from_json(
    ///     r#"{"profile": {"total_height": 60.0, "left_width": 30.0, "end_height": 30.0,
    ///        "total_length": 120.0, "taper_drop": 10.0, "taper_length": 20.0,
    ///        "thickness": 10.0},
    ///        "load": {"position_x": 100.0, "magnitude": 200.0}}"#,
    /// )
    /// .expect("scenario is valid");
    /// assert_eq!(scenario.profile.corner().y, 50.0);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Read a scenario from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and the errors of
    /// [`Scenario::from_json`] otherwise.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&text)?;
        info!(path = %path.display(), "scenario loaded");
        Ok(scenario)
    }

    /// Serialize the scenario as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the relations between sections that parsing cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFiniteMagnitude`] for a NaN or infinite load,
    /// [`ConfigError::LoadOutsideBeam`] when the load is not applied within
    /// `[0, total_length]` and [`ConfigError::NonPositiveYieldStrength`] when the
    /// material has no usable strength.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.load.magnitude.is_finite() {
            return Err(ConfigError::NonFiniteMagnitude(self.load.magnitude));
        }
        let total_length = self.profile.total_length();
        let position_x = self.load.position_x;
        if !(0.0..=total_length).contains(&position_x) {
            return Err(ConfigError::LoadOutsideBeam {
                position_x,
                total_length,
            });
        }
        let yield_strength = self.material.yield_strength;
        if !(yield_strength.is_finite() && yield_strength > 0.0) {
            return Err(ConfigError::NonPositiveYieldStrength(yield_strength));
        }
        debug!(load = ?self.load, "scenario validated");
        Ok(())
    }

    /// Build an evaluator for this scenario's profile and calibration.
    #[must_use]
    pub fn evaluator(&self) -> StressEvaluator<'_> {
        StressEvaluator::with_calibration(&self.profile, &self.calibration)
    }
}
