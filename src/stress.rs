//! Closed-form bending stress with a local correction at the re-entrant corner.
//!
//! The evaluator treats the beam as a cantilever fixed at `x = 0`. A single point
//! load produces a bending moment only between the root and the load, and the
//! nominal stress follows `σ = M·d / I` for the rectangular section at each
//! position. See <https://en.wikipedia.org/wiki/Euler%E2%80%93Bernoulli_beam_theory>.

use serde::Serialize;
use tracing::debug;

use crate::calibration::{Calibration, ConcentrationModel, ScanGrid, StressConcentration};
use crate::geometry::{Point, Profile};
use crate::load::{Fiber, Load};

/// Stress at a single point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StressSample {
    /// Stress magnitude in MPa, never negative.
    pub magnitude: f64,
    /// Whether the fibre is stretched or squeezed, `None` when unstressed.
    pub fiber: Option<Fiber>,
}

/// Result of the worst-case search around the corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CornerPeak {
    /// Largest stress found in MPa, zero when no candidate carried stress.
    pub stress: f64,
    /// Grid point where the largest stress was found.
    pub location: Option<Point>,
    /// Number of grid points that passed the bounds filter and were evaluated.
    pub evaluated: usize,
}

/// Bending stress evaluator for one profile.
///
/// Evaluation never fails: points off the cross-section and points downstream of
/// the load return zero, so a renderer can query any raster coordinate without
/// guards. The evaluator only borrows the profile and owns no mutable state, so
/// one instance can be shared across threads.
///
/// # Examples
/// ```
/// use taperbeam::{Load, Profile, ProfileDimensions, StressEvaluator};
///
/// let profile = Profile::new(ProfileDimensions::default()).expect("valid profile");
/// let evaluator = StressEvaluator::new(&profile);
/// let load = Load::downward(180.0, 1_500.0);
///
/// assert_eq!(evaluator.stress_at(200.0, 0.0, &load), 0.0);
/// assert!(evaluator.max_stress_near_corner(&load) >= evaluator.stress_at(52.0, 80.0, &load));
/// ```
#[derive(Clone, Debug)]
pub struct StressEvaluator<'a, C = ConcentrationModel> {
    /// Geometry being analysed.
    profile: &'a Profile,
    /// Corner correction model.
    concentration: C,
    /// Grid searched by the worst-case scan.
    scan: ScanGrid,
}

impl<'a> StressEvaluator<'a> {
    /// Create an evaluator with the default calibration.
    #[must_use]
    pub fn new(profile: &'a Profile) -> Self {
        Self::with_calibration(profile, &Calibration::default())
    }

    /// Create an evaluator using the supplied calibration constants.
    #[must_use]
    pub fn with_calibration(profile: &'a Profile, calibration: &Calibration) -> Self {
        Self::with_concentration(profile, calibration.concentration.clone(), calibration.scan)
    }
}

impl<'a, C: StressConcentration> StressEvaluator<'a, C> {
    /// Create an evaluator with an arbitrary concentration model.
    #[must_use]
    pub fn with_concentration(profile: &'a Profile, concentration: C, scan: ScanGrid) -> Self {
        Self {
            profile,
            concentration,
            scan,
        }
    }

    /// The profile being evaluated.
    #[must_use]
    pub fn profile(&self) -> &'a Profile {
        self.profile
    }

    /// The scan grid used by [`StressEvaluator::scan_corner`].
    #[must_use]
    pub fn scan_grid(&self) -> &ScanGrid {
        &self.scan
    }

    /// Nominal bending stress at `(x, y)` in MPa, without the corner correction.
    #[must_use]
    pub fn base_stress_at(&self, x: f64, y: f64, load: &Load) -> f64 {
        let height = self.profile.height_at(x);
        if x < 0.0 || y < 0.0 || y > height {
            return 0.0;
        }
        // No moment is carried downstream of the load.
        if x > load.position_x {
            return 0.0;
        }

        let moment = load.moment_at(x);
        let second_moment = self.profile.thickness() * height.powi(3) / 12.0;
        let distance_from_axis = (y - height / 2.0).abs();
        moment * distance_from_axis / second_moment
    }

    /// Bending stress at `(x, y)` in MPa including the corner correction.
    ///
    /// The correction is applied over a disk around the corner, on both sides of
    /// the step; only points off the section are excluded, by the containment
    /// check in [`StressEvaluator::base_stress_at`].
    #[must_use]
    pub fn stress_at(&self, x: f64, y: f64, load: &Load) -> f64 {
        let stress = self.base_stress_at(x, y, load);
        if stress == 0.0 {
            return 0.0;
        }
        let distance = Point::new(x, y).distance_to(self.profile.corner());
        stress * self.concentration.factor_at(distance)
    }

    /// Stress at `(x, y)` together with the fibre state.
    #[must_use]
    pub fn sample_at(&self, x: f64, y: f64, load: &Load) -> StressSample {
        let magnitude = self.stress_at(x, y, load);
        let fiber = if magnitude > 0.0 {
            Some(load.fiber_at(y, self.profile.neutral_axis_at(x)))
        } else {
            None
        };
        StressSample { magnitude, fiber }
    }

    /// Search the grid around the corner for the largest stress.
    ///
    /// Candidates left of the root, beyond the free end or below the bottom fibre
    /// are skipped. Candidates above the local section height are evaluated and
    /// contribute zero through [`StressEvaluator::stress_at`]. Offsets are visited
    /// in ascending order, `dx` outermost, and the first strict maximum is kept.
    #[must_use]
    pub fn scan_corner(&self, load: &Load) -> CornerPeak {
        let corner = self.profile.corner();
        let total_length = self.profile.total_length();
        let mut peak = CornerPeak {
            stress: 0.0,
            location: None,
            evaluated: 0,
        };

        for dx in self.scan.offsets() {
            for dy in self.scan.offsets() {
                let candidate = corner.offset(dx, dy);
                if candidate.x < 0.0 || candidate.x > total_length || candidate.y < 0.0 {
                    continue;
                }
                peak.evaluated += 1;
                let stress = self.stress_at(candidate.x, candidate.y, load);
                if stress > peak.stress {
                    peak.stress = stress;
                    peak.location = Some(candidate);
                }
            }
        }

        debug!(
            stress = peak.stress,
            evaluated = peak.evaluated,
            location = ?peak.location,
            "corner scan complete"
        );
        peak
    }

    /// Largest stress in MPa found around the corner.
    #[must_use]
    pub fn max_stress_near_corner(&self, load: &Load) -> f64 {
        self.scan_corner(load).stress
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::calibration::{LinearDecay, TabulatedDecay};
    use crate::geometry::ProfileDimensions;
    use crate::load::LoadDirection;

    fn reference() -> Profile {
        Profile::new(ProfileDimensions::default()).expect("reference profile is valid")
    }

    fn second_moment(height: f64) -> f64 {
        20.0 * height.powi(3) / 12.0
    }

    #[test]
    fn root_bottom_fibre_matches_closed_form() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);

        // Far from the corner, so no correction applies.
        let expected = 1_500.0 * 180.0 * 50.0 / second_moment(100.0);
        assert_relative_eq!(evaluator.stress_at(0.0, 0.0, &load), expected, max_relative = 1.0e-12);
        assert_relative_eq!(expected, 8.1, max_relative = 1.0e-12);
    }

    #[test]
    fn neutral_axis_is_unstressed() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);
        assert_eq!(evaluator.stress_at(10.0, 50.0, &load), 0.0);
        assert_eq!(evaluator.sample_at(10.0, 50.0, &load).fiber, None);
    }

    #[test]
    fn corner_point_receives_full_factor() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);

        let base = evaluator.base_stress_at(52.0, 80.0, &load);
        assert_relative_eq!(base, 1_500.0 * 128.0 * 30.0 / second_moment(100.0), max_relative = 1.0e-12);
        assert_relative_eq!(evaluator.stress_at(52.0, 80.0, &load), 2.0 * base, max_relative = 1.0e-12);
    }

    #[test]
    fn correction_fades_linearly_inside_radius() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);

        // 9 mm above and 12 mm left of the corner is 15 mm away: no correction.
        let edge = evaluator.stress_at(40.0, 89.0, &load);
        assert_eq!(edge, evaluator.base_stress_at(40.0, 89.0, &load));

        // 7.5 mm away gives half of the extra factor.
        let inside = evaluator.stress_at(47.5, 80.0 + 6.0, &load);
        let distance = point_distance(47.5, 86.0);
        let expected = evaluator.base_stress_at(47.5, 86.0, &load) * (1.0 + (1.0 - distance / 15.0));
        assert_relative_eq!(inside, expected, max_relative = 1.0e-12);
    }

    fn point_distance(x: f64, y: f64) -> f64 {
        ((x - 52.0).powi(2) + (y - 80.0).powi(2)).sqrt()
    }

    #[test]
    fn downstream_of_load_is_unstressed() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(120.0, 1_500.0);
        for y in [0.0, 10.0, 40.0, 47.0] {
            assert_eq!(evaluator.stress_at(120.5, y, &load), 0.0);
            assert_eq!(evaluator.stress_at(240.0, y, &load), 0.0);
        }
    }

    #[test]
    fn points_off_the_section_are_unstressed() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);
        assert_eq!(evaluator.stress_at(-1.0, 10.0, &load), 0.0);
        assert_eq!(evaluator.stress_at(10.0, -0.5, &load), 0.0);
        assert_eq!(evaluator.stress_at(10.0, 100.5, &load), 0.0);
        // Just past the corner the section is already shorter than the corner height.
        assert_eq!(evaluator.stress_at(54.0, 80.0, &load), 0.0);
    }

    #[test]
    fn negative_magnitude_gives_the_same_stress_with_flipped_fibres() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let down = Load::downward(180.0, 1_500.0);
        let reversed = Load::downward(180.0, -1_500.0);
        let up = Load::new(180.0, 1_500.0, LoadDirection::Upward);

        let top = evaluator.sample_at(10.0, 95.0, &down);
        assert_eq!(top.fiber, Some(Fiber::Tension));
        assert_eq!(evaluator.sample_at(10.0, 95.0, &reversed), StressSample {
            magnitude: top.magnitude,
            fiber: Some(Fiber::Compression),
        });
        assert_eq!(evaluator.sample_at(10.0, 95.0, &up).fiber, Some(Fiber::Compression));
        assert_eq!(evaluator.sample_at(10.0, 5.0, &down).fiber, Some(Fiber::Compression));
    }

    #[test]
    fn scan_includes_the_corner_itself() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);

        let peak = evaluator.scan_corner(&load);
        assert_eq!(peak.evaluated, 121);
        assert!(peak.stress >= evaluator.stress_at(52.0, 80.0, &load));
        let location = peak.location.expect("stressed candidate found");
        assert_relative_eq!(
            evaluator.stress_at(location.x, location.y, &load),
            peak.stress
        );
    }

    #[test]
    fn scan_peak_lies_in_the_taper_for_the_reference_beam() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(180.0, 1_500.0);

        let location = evaluator
            .scan_corner(&load)
            .location
            .expect("stressed candidate found");
        assert!(location.x > 52.0);
    }

    #[test]
    fn scan_skips_candidates_outside_the_beam() {
        let profile = Profile::new(ProfileDimensions {
            left_width: 4.0,
            total_length: 100.0,
            ..ProfileDimensions::default()
        })
        .expect("valid profile");
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(90.0, 1_000.0);

        // dx = -10, -8 and -6 land left of the root.
        assert_eq!(evaluator.scan_corner(&load).evaluated, 8 * 11);
    }

    #[test]
    fn scan_reports_zero_when_nothing_is_stressed() {
        let profile = reference();
        let evaluator = StressEvaluator::new(&profile);
        // The load sits left of every candidate.
        let load = Load::downward(20.0, 1_500.0);

        let peak = evaluator.scan_corner(&load);
        assert_eq!(peak.stress, 0.0);
        assert_eq!(peak.location, None);
    }

    #[test]
    fn custom_calibration_changes_the_correction() {
        let profile = reference();
        let load = Load::downward(180.0, 1_500.0);
        let strong = StressEvaluator::with_concentration(
            &profile,
            LinearDecay::new(3.0, 15.0).expect("valid model"),
            ScanGrid::default(),
        );
        let base = strong.base_stress_at(52.0, 80.0, &load);
        assert_relative_eq!(strong.stress_at(52.0, 80.0, &load), 3.0 * base, max_relative = 1.0e-12);

        let table = StressEvaluator::with_concentration(
            &profile,
            TabulatedDecay::new(vec![(0.0, 1.5), (5.0, 1.0)]).expect("valid table"),
            ScanGrid::new(0.0, 1.0).expect("valid grid"),
        );
        assert_relative_eq!(table.stress_at(52.0, 80.0, &load), 1.5 * base, max_relative = 1.0e-12);
        assert_eq!(table.scan_corner(&load).evaluated, 1);
    }
}
