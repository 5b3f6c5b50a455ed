//! Curve evaluation properties across every interpolation type

use glam::Quat;
use skinbound::curve::{Curve, Interpolation, SrtCurve};
use skinbound::math::{SRT_COMPONENTS, SRT_ROTATION_OFFSET, Srt};

fn keys() -> [(f32, Srt); 3] {
    [
        (
            0.0,
            Srt::new(
                glam::Vec3::new(1.0, 1.0, 1.0),
                Quat::IDENTITY,
                glam::Vec3::new(0.0, 0.0, 0.0),
            ),
        ),
        (
            0.3,
            Srt::new(
                glam::Vec3::new(2.0, 1.0, 0.5),
                Quat::from_rotation_y(1.2),
                glam::Vec3::new(3.0, -1.0, 4.0),
            ),
        ),
        (
            1.0,
            Srt::new(
                glam::Vec3::new(1.5, 1.0, 1.0),
                Quat::from_axis_angle(glam::Vec3::new(1.0, 1.0, 0.0).normalize(), 2.4),
                glam::Vec3::new(-2.0, 6.0, 0.0),
            ),
        ),
    ]
}

fn srt_curve(interpolation: Interpolation) -> SrtCurve {
    let keys = keys();
    let mut curve = SrtCurve::new(keys.len());
    let tangent = [0.5; SRT_COMPONENTS];
    for (i, (time, srt)) in keys.iter().enumerate() {
        curve.set_key_with_tangents(i, *time, srt, interpolation, &tangent, &tangent);
    }
    curve
}

#[test]
fn test_endpoints_reproduce_stored_values() {
    let keys = keys();
    for &interpolation in Interpolation::ALL {
        let curve = srt_curve(interpolation);
        assert_eq!(curve.evaluate(0.0), keys[0].1, "{interpolation} at 0");
        assert_eq!(curve.evaluate(1.0), keys[2].1, "{interpolation} at 1");
    }
}

#[test]
fn test_quaternion_range_is_unit_for_every_type() {
    for &interpolation in Interpolation::ALL {
        let curve = srt_curve(interpolation);
        for step in 0..=100 {
            let t = step as f32 / 100.0;
            let rotation = curve.evaluate(t).rotation;
            assert!(
                (rotation.length() - 1.0).abs() < 1e-5,
                "{interpolation} at {t}: |q| = {}",
                rotation.length()
            );
        }
    }
}

#[test]
fn test_unchanged_components_stay_exact() {
    // Scale y is 1.0 on every key, so it must never drift
    for &interpolation in Interpolation::ALL {
        let curve = srt_curve(interpolation);
        for step in 0..=20 {
            let srt = curve.evaluate(step as f32 / 20.0);
            assert_eq!(srt.scale.y, 1.0, "{interpolation}");
        }
    }
}

#[test]
fn test_linear_curve_midpoint() {
    let mut curve = Curve::new(2, 1);
    curve.set_point(0, 0.0, &[0.0], Interpolation::Linear);
    curve.set_point(1, 1.0, &[10.0], Interpolation::Linear);
    assert!((curve.sample(0.5)[0] - 5.0).abs() < 1e-5);
}

#[test]
fn test_quaternion_offset_matches_srt_layout() {
    let curve = srt_curve(Interpolation::Linear);
    assert_eq!(curve.curve().quaternion_offset(), Some(SRT_ROTATION_OFFSET));
    assert_eq!(curve.curve().component_count(), SRT_COMPONENTS);
}

#[test]
fn test_rotation_follows_slerp() {
    let curve = srt_curve(Interpolation::Linear);
    let keys = keys();
    // Halfway through the first segment
    let srt = curve.evaluate(0.15);
    let expected = keys[0].1.rotation.slerp(keys[1].1.rotation, 0.5);
    assert!(srt.rotation.angle_between(expected) < 1e-4);
}

#[test]
fn test_determine_index_is_monotonic() {
    let mut curve = Curve::new(6, 1);
    for (i, t) in [0.0, 0.1, 0.1, 0.4, 0.75, 1.0].into_iter().enumerate() {
        curve.set_point(i, t, &[i as f32], Interpolation::Linear);
    }
    let mut previous = 0;
    for step in 0..=200 {
        let t = step as f32 / 200.0;
        let index = curve.determine_index(t);
        assert!(index >= previous);
        assert!(index < curve.point_count() - 1);
        assert!(curve.point(index).time <= t);
        previous = index;
    }
}
