//! Beam profile geometry: section height as a function of position.
//!
//! Coordinates are local to the beam. `x` runs from the fixed root towards the
//! free end and `y` is measured upwards from the bottom fibre. All lengths are in
//! millimetres.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::errors::ProfileError;

/// Position in the plane of the beam measured in millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance from the fixed root along the beam axis.
    pub x: f64,
    /// Height above the bottom fibre.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic point.
    #[must_use]
    pub fn to_point2(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        nalgebra::distance(&self.to_point2(), &other.to_point2())
    }

    /// Return the point shifted by the supplied offsets.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<Point2<f64>> for Point {
    fn from(value: Point2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Point2<f64> {
    fn from(value: Point) -> Self {
        value.to_point2()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use taperbeam::point;
///
/// let corner = point(52.0, 80.0);
/// assert_eq!(corner.y, 80.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Raw profile dimensions in millimetres, as supplied by a caller or a scenario file.
///
/// The defaults describe the reference L-shaped product: a 100 mm tall root
/// segment, a 20 mm drop into a 40 mm long taper and a 47 mm tall end segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileDimensions {
    /// Height of the full-height root segment.
    pub total_height: f64,
    /// Length of the full-height root segment.
    pub left_width: f64,
    /// Height of the reduced end segment.
    pub end_height: f64,
    /// Overall beam length.
    pub total_length: f64,
    /// Vertical drop at the start of the taper (`a`).
    pub taper_drop: f64,
    /// Horizontal length of the taper (`b`).
    pub taper_length: f64,
    /// Uniform out-of-plane thickness of the section.
    pub thickness: f64,
}

impl Default for ProfileDimensions {
    fn default() -> Self {
        Self {
            total_height: 100.0,
            left_width: 52.0,
            end_height: 47.0,
            total_length: 250.0,
            taper_drop: 20.0,
            taper_length: 40.0,
            thickness: 20.0,
        }
    }
}

/// Validated beam profile.
///
/// A [`Profile`] can only be obtained through [`Profile::new`], which checks the
/// structural invariants once so that every height query afterwards is cheap and
/// strictly positive inside the beam.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProfileDimensions", into = "ProfileDimensions")]
pub struct Profile {
    /// Dimensions that passed validation.
    dimensions: ProfileDimensions,
}

impl Profile {
    /// Validate `dimensions` and build a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when a dimension is not finite or negative, when a
    /// height or the thickness is zero, when the taper drop consumes the full
    /// height, or when the root segment and the taper do not fit in the beam.
    ///
    /// # Examples
    /// ```
    /// use taperbeam::{Profile, ProfileDimensions};
    ///
    /// let profile = Profile::new(ProfileDimensions::default()).expect("reference profile is valid");
    /// assert_eq!(profile.height_at(10.0), 100.0);
    /// ```
    pub fn new(dimensions: ProfileDimensions) -> Result<Self, ProfileError> {
        let ProfileDimensions {
            total_height,
            left_width,
            end_height,
            total_length,
            taper_drop,
            taper_length,
            thickness,
        } = dimensions;

        let fields = [
            ("total_height", total_height),
            ("left_width", left_width),
            ("end_height", end_height),
            ("total_length", total_length),
            ("taper_drop", taper_drop),
            ("taper_length", taper_length),
            ("thickness", thickness),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ProfileError::NonFiniteDimension { field, value });
            }
            if value < 0.0 {
                return Err(ProfileError::NegativeDimension { field, value });
            }
        }
        for (field, value) in [
            ("total_height", total_height),
            ("end_height", end_height),
            ("thickness", thickness),
        ] {
            if value <= 0.0 {
                return Err(ProfileError::NonPositiveDimension { field, value });
            }
        }
        if total_height - taper_drop <= 0.0 {
            return Err(ProfileError::TaperDropTooDeep {
                total_height,
                taper_drop,
            });
        }
        if left_width + taper_length > total_length {
            return Err(ProfileError::TaperBeyondLength {
                left_width,
                taper_length,
                total_length,
            });
        }
        Ok(Self { dimensions })
    }

    /// Return the validated dimensions.
    #[must_use]
    pub fn dimensions(&self) -> &ProfileDimensions {
        &self.dimensions
    }

    /// Overall beam length in millimetres.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.dimensions.total_length
    }

    /// Height of the root segment in millimetres.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.dimensions.total_height
    }

    /// Out-of-plane thickness in millimetres.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.dimensions.thickness
    }

    /// Section height at the start of the taper.
    #[must_use]
    pub fn taper_start_height(&self) -> f64 {
        self.dimensions.total_height - self.dimensions.taper_drop
    }

    /// Position where the taper meets the end segment (point B).
    #[must_use]
    pub fn taper_foot(&self) -> f64 {
        self.dimensions.left_width + self.dimensions.taper_length
    }

    /// The re-entrant corner where the root segment steps down into the taper.
    #[must_use]
    pub fn corner(&self) -> Point {
        Point::new(self.dimensions.left_width, self.taper_start_height())
    }

    /// Section height at `x`.
    ///
    /// The function is total: positions outside `[0, total_length]` follow the
    /// same piecewise rule. A zero-length taper never enters the interpolation
    /// branch, so the profile degenerates to a step without dividing by zero.
    ///
    /// # Examples
    /// ```
    /// use taperbeam::{Profile, ProfileDimensions};
    ///
    /// let profile = Profile::new(ProfileDimensions::default()).expect("valid");
    /// assert_eq!(profile.height_at(52.0), 100.0);
    /// assert_eq!(profile.height_at(72.0), 80.0 - 33.0 * 0.5);
    /// assert_eq!(profile.height_at(92.0), 47.0);
    /// ```
    #[must_use]
    pub fn height_at(&self, x: f64) -> f64 {
        let dims = &self.dimensions;
        if x <= dims.left_width {
            return dims.total_height;
        }

        let taper_end = dims.left_width + dims.taper_length;
        if x > dims.left_width && x < taper_end {
            let start_height = self.taper_start_height();
            let ratio = (x - dims.left_width) / dims.taper_length;
            return start_height - (start_height - dims.end_height) * ratio;
        }

        dims.end_height
    }

    /// Height of the neutral axis above the bottom fibre at `x`.
    #[must_use]
    pub fn neutral_axis_at(&self, x: f64) -> f64 {
        self.height_at(x) / 2.0
    }

    /// Second moment of area of the rectangular section at `x` in mm⁴.
    #[must_use]
    pub fn second_moment_at(&self, x: f64) -> f64 {
        self.dimensions.thickness * self.height_at(x).powi(3) / 12.0
    }

    /// Whether `(x, y)` lies on the material cross-section.
    ///
    /// Positions beyond the free end are not excluded, matching the evaluator's
    /// containment rule.
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && y <= self.height_at(x)
    }
}

impl TryFrom<ProfileDimensions> for Profile {
    type Error = ProfileError;

    fn try_from(value: ProfileDimensions) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Profile> for ProfileDimensions {
    fn from(value: Profile) -> Self {
        value.dimensions
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn reference() -> Profile {
        Profile::new(ProfileDimensions::default()).expect("reference profile is valid")
    }

    #[test]
    fn root_segment_has_full_height() {
        let profile = reference();
        assert_eq!(profile.height_at(0.0), 100.0);
        assert_eq!(profile.height_at(52.0), 100.0);
    }

    #[test]
    fn taper_interpolates_between_start_and_end_height() {
        let profile = reference();
        assert_relative_eq!(profile.height_at(62.0), 80.0 - 33.0 * 0.25, epsilon = 1.0e-12);
        assert_relative_eq!(profile.height_at(82.0), 80.0 - 33.0 * 0.75, epsilon = 1.0e-12);
    }

    #[test]
    fn end_segment_has_end_height() {
        let profile = reference();
        assert_eq!(profile.height_at(92.0), 47.0);
        assert_eq!(profile.height_at(250.0), 47.0);
    }

    #[test]
    fn height_is_continuous_at_taper_end() {
        let profile = reference();
        let before = profile.height_at(92.0 - 1.0e-9);
        assert_relative_eq!(before, 47.0, epsilon = 1.0e-6);
    }

    #[test]
    fn taper_start_approaches_taper_start_height() {
        // The step at the corner is the discontinuity the concentration model targets.
        let profile = reference();
        let after = profile.height_at(52.0 + 1.0e-9);
        assert_relative_eq!(after, 80.0, epsilon = 1.0e-6);
    }

    #[test]
    fn zero_length_taper_is_a_step() {
        let profile = Profile::new(ProfileDimensions {
            taper_length: 0.0,
            ..ProfileDimensions::default()
        })
        .expect("step profile is valid");
        assert_eq!(profile.height_at(52.0), 100.0);
        assert_eq!(profile.height_at(52.0 + 1.0e-12), 47.0);
        assert!(profile.height_at(53.0).is_finite());
    }

    #[test]
    fn out_of_range_positions_follow_the_same_rule() {
        let profile = reference();
        assert_eq!(profile.height_at(-10.0), 100.0);
        assert_eq!(profile.height_at(400.0), 47.0);
    }

    #[test]
    fn corner_and_foot_are_derived_from_dimensions() {
        let profile = reference();
        assert_eq!(profile.corner(), point(52.0, 80.0));
        assert_eq!(profile.taper_foot(), 92.0);
    }

    #[test]
    fn second_moment_matches_rectangle() {
        let profile = reference();
        assert_relative_eq!(
            profile.second_moment_at(0.0),
            20.0 * 100.0_f64.powi(3) / 12.0,
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn containment_excludes_points_above_section() {
        let profile = reference();
        assert!(profile.contains(100.0, 47.0));
        assert!(!profile.contains(100.0, 47.5));
        assert!(!profile.contains(-1.0, 10.0));
        assert!(!profile.contains(10.0, -1.0));
    }

    #[test]
    fn invalid_profiles_are_rejected() {
        let negative = Profile::new(ProfileDimensions {
            left_width: -1.0,
            ..ProfileDimensions::default()
        })
        .expect_err("negative width rejected");
        assert_eq!(
            negative,
            ProfileError::NegativeDimension {
                field: "left_width",
                value: -1.0
            }
        );

        let nan = Profile::new(ProfileDimensions {
            end_height: f64::NAN,
            ..ProfileDimensions::default()
        })
        .expect_err("NaN rejected");
        assert!(matches!(
            nan,
            ProfileError::NonFiniteDimension {
                field: "end_height",
                ..
            }
        ));

        let too_deep = Profile::new(ProfileDimensions {
            taper_drop: 100.0,
            ..ProfileDimensions::default()
        })
        .expect_err("drop through the section rejected");
        assert!(matches!(too_deep, ProfileError::TaperDropTooDeep { .. }));

        let too_long = Profile::new(ProfileDimensions {
            total_length: 80.0,
            ..ProfileDimensions::default()
        })
        .expect_err("taper beyond the beam rejected");
        assert!(matches!(too_long, ProfileError::TaperBeyondLength { .. }));
    }

    #[test]
    fn point_distance_uses_euclidean_norm() {
        assert_relative_eq!(point(0.0, 0.0).distance_to(point(3.0, 4.0)), 5.0);
        let algebraic: Point2<f64> = point(1.0, 2.0).into();
        assert_eq!(Point::from(algebraic), point(1.0, 2.0));
    }
}
