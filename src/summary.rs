//! Headline stress figures and their comparison against the material strength.
//!
//! The evaluator knows nothing about materials. This layer takes its results at
//! the two critical locations of the profile and judges them against a yield
//! strength supplied by the caller:
//!
//! * point A, the worst-case stress found around the re-entrant corner;
//! * point B, the bottom fibre at the foot of the taper.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calibration::StressConcentration;
use crate::geometry::Point;
use crate::load::Load;
use crate::stress::StressEvaluator;

/// Fraction of the yield strength above which a stress is reported as marginal.
pub const MARGINAL_UTILISATION: f64 = 0.7;

/// Material strength data used to judge the computed stresses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Display name of the material.
    pub name: String,
    /// Yield strength in MPa.
    pub yield_strength: f64,
    /// Elastic modulus in MPa, reported for reference only.
    pub modulus: f64,
}

impl Default for Material {
    /// High-density polyethylene.
    fn default() -> Self {
        Self {
            name: "HDPE".to_owned(),
            yield_strength: 26.0,
            modulus: 800.0,
        }
    }
}

/// Verdict for a single stress figure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyStatus {
    /// Stress at or below 70 % of the yield strength.
    Safe,
    /// Stress above 70 % of the yield strength but not above it.
    Marginal,
    /// Stress above the yield strength.
    Overstressed,
}

impl SafetyStatus {
    /// Classify `stress` against `yield_strength`, both in MPa.
    #[must_use]
    pub fn classify(stress: f64, yield_strength: f64) -> Self {
        if stress > yield_strength {
            Self::Overstressed
        } else if stress > yield_strength * MARGINAL_UTILISATION {
            Self::Marginal
        } else {
            Self::Safe
        }
    }
}

/// Stress at one critical location with its verdict.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CriticalPoint {
    /// Where the stress was evaluated, `None` when the corner scan found no stress.
    pub location: Option<Point>,
    /// Stress in MPa.
    pub stress: f64,
    /// Yield strength divided by stress; infinite when unstressed.
    pub factor_of_safety: f64,
    /// Verdict against the yield strength.
    pub status: SafetyStatus,
}

impl CriticalPoint {
    /// Judge `stress` at `location` against `yield_strength`.
    #[must_use]
    pub fn new(location: Option<Point>, stress: f64, yield_strength: f64) -> Self {
        let factor_of_safety = if stress > 0.0 {
            yield_strength / stress
        } else {
            f64::INFINITY
        };
        Self {
            location,
            stress,
            factor_of_safety,
            status: SafetyStatus::classify(stress, yield_strength),
        }
    }
}

/// Which of the two critical points governs the design.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Governing {
    /// The corner region.
    Corner,
    /// The foot of the taper.
    TaperFoot,
}

/// The two headline stress figures for one load case.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Load the summary was computed for.
    pub load: Load,
    /// Material the stresses were judged against.
    pub material: Material,
    /// Point A, the worst stress near the corner.
    pub corner: CriticalPoint,
    /// Number of scan candidates evaluated around the corner.
    pub corner_candidates: usize,
    /// Point B, the bottom fibre at the taper foot.
    pub taper_foot: CriticalPoint,
}

impl Summary {
    /// Compute both headline figures.
    ///
    /// # Examples
    /// ```
    /// use taperbeam::{Governing, Load, Material, Profile, ProfileDimensions, StressEvaluator, Summary};
    ///
    /// let profile = Profile::new(ProfileDimensions::default()).expect("valid profile");
    /// let evaluator = StressEvaluator::new(&profile);
    /// let summary = Summary::evaluate(&evaluator, &Load::default(), &Material::default());
    /// assert_eq!(summary.governing(), Governing::TaperFoot);
    /// ```
    #[must_use]
    pub fn evaluate<C: StressConcentration>(
        evaluator: &StressEvaluator<'_, C>,
        load: &Load,
        material: &Material,
    ) -> Self {
        let peak = evaluator.scan_corner(load);
        let corner = CriticalPoint::new(peak.location, peak.stress, material.yield_strength);

        let foot = Point::new(evaluator.profile().taper_foot(), 0.0);
        let foot_stress = evaluator.stress_at(foot.x, foot.y, load);
        let taper_foot = CriticalPoint::new(Some(foot), foot_stress, material.yield_strength);

        debug!(
            corner = corner.stress,
            taper_foot = taper_foot.stress,
            yield_strength = material.yield_strength,
            "summary evaluated"
        );
        Self {
            load: *load,
            material: material.clone(),
            corner,
            corner_candidates: peak.evaluated,
            taper_foot,
        }
    }

    /// The critical point with the lower factor of safety; the corner wins ties.
    #[must_use]
    pub fn governing(&self) -> Governing {
        if self.taper_foot.factor_of_safety < self.corner.factor_of_safety {
            Governing::TaperFoot
        } else {
            Governing::Corner
        }
    }

    /// The worse of the two verdicts.
    #[must_use]
    pub fn status(&self) -> SafetyStatus {
        self.corner.status.max(self.taper_foot.status)
    }
}
