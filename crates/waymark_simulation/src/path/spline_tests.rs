//! Tests for SplinePath.

#[cfg(test)]
mod tests {
    use super::super::spline::*;
    use bevy::prelude::Vec3;

    fn assert_close(actual: Vec3, expected: Vec3, tolerance: f32) {
        assert!(
            actual.distance(expected) < tolerance,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn zigzag() -> SplinePath {
        SplinePath::new(vec![
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(4.0, 0.5, 1.0),
            Vec3::new(6.0, 0.5, -3.0),
            Vec3::new(10.0, 0.5, -2.0),
        ])
        .expect("valid path")
    }

    #[test]
    fn test_rejects_single_point() {
        let err = SplinePath::new(vec![Vec3::ZERO]).unwrap_err();
        assert_eq!(err, PathError::TooFewPoints(1));
    }

    #[test]
    fn test_rejects_non_finite_point() {
        let err = SplinePath::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]).unwrap_err();
        assert!(matches!(err, PathError::NonFinitePoint { index: 1, .. }));
    }

    #[test]
    fn test_passes_through_every_control_point() {
        let path = zigzag();
        let points = path.control_points().to_vec();
        let last = (points.len() - 1) as f32;

        for (i, point) in points.iter().enumerate() {
            assert_close(path.position_at(i as f32 / last), *point, 1e-4);
        }
    }

    #[test]
    fn test_endpoints_and_clamping() {
        let path = zigzag();
        assert_close(path.position_at(0.0), path.start(), 1e-5);
        assert_close(path.position_at(1.0), path.end(), 1e-4);
        // За пределами [0,1] — clamp к концам
        assert_close(path.position_at(-0.5), path.start(), 1e-5);
        assert_close(path.position_at(1.5), path.end(), 1e-4);
    }

    #[test]
    fn test_straight_line_tangent() {
        let path = SplinePath::new(vec![Vec3::ZERO, Vec3::new(0.0, 0.0, -10.0)]).unwrap();

        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let tangent = path.tangent_at(t).expect("tangent defined");
            assert_close(tangent, Vec3::NEG_Z, 1e-4);
        }

        // Середина прямой — середина отрезка
        assert_close(path.position_at(0.5), Vec3::new(0.0, 0.0, -5.0), 1e-3);
    }

    #[test]
    fn test_tangent_continuous_across_knots() {
        let path = zigzag();
        let h = 1e-3;

        for knot in [1.0 / 3.0, 2.0 / 3.0] {
            let before = path.tangent_at(knot - h).unwrap();
            let after = path.tangent_at(knot + h).unwrap();
            assert!(
                before.dot(after) > 0.99,
                "tangent jumps at knot {}: {:?} vs {:?}",
                knot,
                before,
                after
            );
        }
    }

    #[test]
    fn test_position_continuous() {
        let path = zigzag();
        let mut previous = path.position_at(0.0);

        for i in 1..=1000 {
            let point = path.position_at(i as f32 / 1000.0);
            assert!(point.distance(previous) < 0.1, "jump at sample {}", i);
            previous = point;
        }
    }

    #[test]
    fn test_coincident_points_yield_no_tangent() {
        let a = Vec3::new(1.0, 0.5, 1.0);
        let b = Vec3::new(5.0, 0.5, 1.0);
        let path = SplinePath::new(vec![a, a, b]).unwrap();

        assert!(path.tangent_at(0.0).is_none());
        // Второй сегмент нормальный
        assert!(path.tangent_at(0.75).is_some());
    }

    #[test]
    fn test_prepends_current_position() {
        let current = Vec3::new(0.0, 0.5, 0.0);
        let waypoints = [Vec3::new(5.0, 0.5, 0.0), Vec3::new(8.0, 0.5, 3.0)];

        let path = SplinePath::from_current_position(current, &waypoints).unwrap();
        assert_eq!(path.control_points().len(), 3);
        assert_eq!(path.start(), current);
    }

    #[test]
    fn test_skips_prepend_when_already_at_first_waypoint() {
        let waypoints = [Vec3::new(5.0, 0.5, 0.0), Vec3::new(8.0, 0.5, 3.0)];
        let current = waypoints[0] + Vec3::splat(POINT_EPSILON * 0.5);

        let path = SplinePath::from_current_position(current, &waypoints).unwrap();
        assert_eq!(path.control_points(), &waypoints);
    }

    #[test]
    fn test_length_of_straight_line() {
        let path = SplinePath::new(vec![Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0)]).unwrap();
        assert!((path.length() - 5.0).abs() < 1e-3, "length = {}", path.length());
    }

    #[test]
    fn test_arc_length_parameterization_is_uniform() {
        // Короткий сегмент + длинный: segment-параметризация тратит половину t
        // на короткий, arc length — пропорционально длине
        let path = SplinePath::new(vec![
            Vec3::ZERO,
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ])
        .unwrap();

        let by_segment = path.sample(0.5, PathParameterization::Segment).position;
        let by_arc = path.sample(0.5, PathParameterization::ArcLength).position;

        assert!((by_segment.x - 1.0).abs() < 1e-3);
        assert!((by_arc.x - 5.0).abs() < 0.1, "arc midpoint = {:?}", by_arc);

        let end = path.sample(1.0, PathParameterization::ArcLength).position;
        assert_close(end, path.end(), 1e-3);
    }

    #[test]
    fn test_points_coincide_epsilon() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert!(points_coincide(a, a));
        assert!(points_coincide(a, a + Vec3::new(5e-7, -5e-7, 0.0)));
        assert!(!points_coincide(a, a + Vec3::new(0.0, 0.0, 1e-3)));
    }
}
