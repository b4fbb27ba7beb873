#![warn(clippy::pedantic)]

use proptest::prelude::*;
use taperbeam::{
    LinearDecay, Load, Profile, ProfileDimensions, StressConcentration, StressEvaluator,
};

prop_compose! {
    fn profiles()(
        total_height in 20.0..200.0f64,
        drop_fraction in 0.0..0.9f64,
        end_fraction in 0.1..1.0f64,
        left_width in 0.0..100.0f64,
        taper_length in 0.0..80.0f64,
        tail in 0.0..200.0f64,
        thickness in 1.0..50.0f64,
    ) -> Profile {
        Profile::new(ProfileDimensions {
            total_height,
            left_width,
            end_height: total_height * end_fraction,
            total_length: left_width + taper_length + tail,
            taper_drop: total_height * drop_fraction,
            taper_length,
            thickness,
        })
        .expect("generated dimensions are valid")
    }
}

proptest! {
    #[test]
    fn height_is_positive_and_bounded(profile in profiles(), t in -0.2..1.2f64) {
        let dims = *profile.dimensions();
        let x = t * dims.total_length;
        let height = profile.height_at(x);
        let lowest = dims.end_height.min(profile.taper_start_height());
        prop_assert!(height > 0.0);
        prop_assert!(height <= dims.total_height);
        prop_assert!(height >= lowest * (1.0 - 1.0e-12));
    }

    #[test]
    fn height_is_full_before_the_corner_and_reduced_after_the_taper(
        profile in profiles(),
        t in 0.0..1.0f64,
    ) {
        let dims = *profile.dimensions();
        prop_assert_eq!(profile.height_at(dims.left_width * t), dims.total_height);
        let beyond = profile.taper_foot() + (dims.total_length - profile.taper_foot()) * t;
        // With no taper the corner position itself still belongs to the root segment.
        if beyond > dims.left_width {
            prop_assert_eq!(profile.height_at(beyond), dims.end_height);
        }
    }

    #[test]
    fn stress_downstream_of_the_load_is_zero(
        profile in profiles(),
        load_t in 0.0..1.0f64,
        gap in 1.0e-6..50.0f64,
        y_t in 0.0..1.0f64,
        magnitude in -5_000.0..5_000.0f64,
    ) {
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(load_t * profile.total_length(), magnitude);
        let x = load.position_x + gap;
        let y = y_t * profile.height_at(x);
        prop_assert_eq!(evaluator.stress_at(x, y, &load), 0.0);
    }

    #[test]
    fn stress_off_the_section_is_zero(
        profile in profiles(),
        x_t in 0.0..1.0f64,
        above in 1.0e-6..100.0f64,
        below in 1.0e-6..100.0f64,
    ) {
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(profile.total_length(), 1_000.0);
        let x = x_t * profile.total_length();
        prop_assert_eq!(evaluator.stress_at(x, profile.height_at(x) + above, &load), 0.0);
        prop_assert_eq!(evaluator.stress_at(x, -below, &load), 0.0);
    }

    #[test]
    fn correction_never_reduces_stress(
        profile in profiles(),
        x_t in 0.0..1.0f64,
        y_t in 0.0..1.0f64,
    ) {
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(profile.total_length(), 1_000.0);
        let x = x_t * profile.total_length();
        let y = y_t * profile.height_at(x);
        let base = evaluator.base_stress_at(x, y, &load);
        let corrected = evaluator.stress_at(x, y, &load);
        prop_assert!(corrected >= base);

        let distance = ((x - profile.corner().x).powi(2) + (y - profile.corner().y).powi(2)).sqrt();
        if distance >= LinearDecay::default().influence_radius() + 1.0e-9 {
            prop_assert_eq!(corrected, base);
        }
    }

    #[test]
    fn stress_is_linear_in_magnitude(
        profile in profiles(),
        x_t in 0.0..1.0f64,
        y_t in 0.0..1.0f64,
        magnitude in 1.0..5_000.0f64,
        scale in 0.1..10.0f64,
    ) {
        let evaluator = StressEvaluator::new(&profile);
        let x = x_t * profile.total_length();
        let y = y_t * profile.height_at(x);
        let single = evaluator.stress_at(x, y, &Load::downward(profile.total_length(), magnitude));
        let scaled = evaluator.stress_at(x, y, &Load::downward(profile.total_length(), magnitude * scale));
        let flipped = evaluator.stress_at(x, y, &Load::upward(profile.total_length(), -magnitude));
        prop_assert!((scaled - single * scale).abs() <= 1.0e-9 * scaled.abs().max(1.0));
        prop_assert!((flipped - single).abs() <= 1.0e-12 * single.abs().max(1.0));
    }

    #[test]
    fn base_stress_grows_with_lever_arm(
        profile in profiles(),
        y_t in 0.0..1.0f64,
        x_t in 0.0..0.5f64,
        extra in 1.0..100.0f64,
    ) {
        let evaluator = StressEvaluator::new(&profile);
        let x = x_t * profile.total_length();
        let height = profile.height_at(x);
        let y = y_t * height;
        // Skip the neutral axis, where the stress is zero for every lever arm.
        prop_assume!((y - height / 2.0).abs() > 1.0e-6);
        let near = Load::downward(x + 1.0, 1_000.0);
        let far = Load::downward(x + 1.0 + extra, 1_000.0);
        prop_assert!(evaluator.base_stress_at(x, y, &far) > evaluator.base_stress_at(x, y, &near));
    }

    #[test]
    fn corner_scan_is_bit_identical_and_covers_the_corner(
        profile in profiles(),
        load_t in 0.0..1.0f64,
        magnitude in -5_000.0..5_000.0f64,
    ) {
        let evaluator = StressEvaluator::new(&profile);
        let load = Load::downward(load_t * profile.total_length(), magnitude);
        let first = evaluator.max_stress_near_corner(&load);
        let second = evaluator.max_stress_near_corner(&load);
        prop_assert_eq!(first.to_bits(), second.to_bits());

        let corner = profile.corner();
        prop_assert!(first >= evaluator.stress_at(corner.x, corner.y, &load));
    }
}
