use glam::Vec3;
use crate::config::CameraSettings;
use crate::error::Error;
use crate::scene::BoundingBox;
use super::*;

/// 90° vertical fov, square aspect, near 1, far 100, at the origin looking -Z.
/// Side planes are then the 45° planes |x| = -z and |y| = -z.
fn create_test_frustum() -> Frustum {
    let settings = CameraSettings { fov: 90.0, aspect: 1.0, near: 1.0, far: 100.0 };
    Frustum::new(&settings).unwrap()
}

fn cube(center: Vec3, half: f32) -> BoundingBox {
    BoundingBox::from_center_half_extents(center, Vec3::splat(half))
}

fn assert_vec3_near(actual: Vec3, expected: Vec3, epsilon: f32) {
    assert!(
        (actual - expected).length() < epsilon,
        "expected {} to be within {} of {}", actual, epsilon, expected
    );
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_uses_default_pose() {
    let frustum = Frustum::new(&CameraSettings::default()).unwrap();

    assert_eq!(frustum.position(), Vec3::ZERO);
    assert_vec3_near(frustum.forward(), Vec3::NEG_Z, 1e-6);
    assert_vec3_near(frustum.up(), Vec3::Y, 1e-6);
    assert!(frustum.culling_enabled());
    assert!(frustum.matches_settings(&CameraSettings::default()));
}

#[test]
fn test_new_rejects_invalid_settings() {
    let settings = CameraSettings { near: 10.0, far: 5.0, ..CameraSettings::default() };
    assert!(matches!(Frustum::new(&settings), Err(Error::InvalidConfiguration(_))));
}

#[test]
fn test_internals_derived_values() {
    let frustum = create_test_frustum();

    assert!((frustum.tan_half_fov() - 1.0).abs() < 1e-5);
    let (near_w, near_h) = frustum.near_half_size();
    let (far_w, far_h) = frustum.far_half_size();
    assert!((near_w - 1.0).abs() < 1e-5);
    assert!((near_h - 1.0).abs() < 1e-5);
    assert!((far_w - 100.0).abs() < 1e-3);
    assert!((far_h - 100.0).abs() < 1e-3);
    assert_eq!(frustum.near_distance(), 1.0);
    assert_eq!(frustum.far_distance(), 100.0);
    assert_eq!(frustum.fov_degrees(), 90.0);
    assert_eq!(frustum.aspect(), 1.0);
}

#[test]
fn test_corner_positions() {
    let frustum = create_test_frustum();
    let corners = frustum.corners();

    assert_vec3_near(corners[CORNER_NTL], Vec3::new(-1.0, 1.0, -1.0), 1e-4);
    assert_vec3_near(corners[CORNER_NTR], Vec3::new(1.0, 1.0, -1.0), 1e-4);
    assert_vec3_near(corners[CORNER_NBL], Vec3::new(-1.0, -1.0, -1.0), 1e-4);
    assert_vec3_near(corners[CORNER_NBR], Vec3::new(1.0, -1.0, -1.0), 1e-4);
    assert_vec3_near(corners[CORNER_FTL], Vec3::new(-100.0, 100.0, -100.0), 1e-2);
    assert_vec3_near(corners[CORNER_FTR], Vec3::new(100.0, 100.0, -100.0), 1e-2);
    assert_vec3_near(corners[CORNER_FBL], Vec3::new(-100.0, -100.0, -100.0), 1e-2);
    assert_vec3_near(corners[CORNER_FBR], Vec3::new(100.0, -100.0, -100.0), 1e-2);
}

#[test]
fn test_aspect_widens_horizontal_extent() {
    let settings = CameraSettings { fov: 90.0, aspect: 2.0, near: 1.0, far: 100.0 };
    let frustum = Frustum::new(&settings).unwrap();

    assert_vec3_near(frustum.corners()[CORNER_NTR], Vec3::new(2.0, 1.0, -1.0), 1e-4);
    assert!(frustum.contains_point(Vec3::new(15.0, 0.0, -10.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 15.0, -10.0)));
}

// ============================================================================
// Plane orientation
// ============================================================================

#[test]
fn test_all_planes_face_inward() {
    let frustum = create_test_frustum();
    let interior = Vec3::new(0.0, 0.0, -50.0);

    for (i, plane) in frustum.planes().iter().enumerate() {
        assert!(plane.distance(interior) > 0.0, "plane {} should face the interior", i);
        assert!((plane.normal().length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_plane_normals_point_into_volume() {
    let frustum = create_test_frustum();

    assert_vec3_near(frustum.plane(PLANE_NEAR).unwrap().normal(), Vec3::NEG_Z, 1e-5);
    assert_vec3_near(frustum.plane(PLANE_FAR).unwrap().normal(), Vec3::Z, 1e-5);

    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert_vec3_near(frustum.plane(PLANE_TOP).unwrap().normal(), Vec3::new(0.0, -half, -half), 1e-4);
    assert_vec3_near(frustum.plane(PLANE_BOTTOM).unwrap().normal(), Vec3::new(0.0, half, -half), 1e-4);
    assert_vec3_near(frustum.plane(PLANE_LEFT).unwrap().normal(), Vec3::new(half, 0.0, -half), 1e-4);
    assert_vec3_near(frustum.plane(PLANE_RIGHT).unwrap().normal(), Vec3::new(-half, 0.0, -half), 1e-4);
    assert!(frustum.plane(6).is_none());
}

#[test]
fn test_tiny_near_distance_builds() {
    let settings = CameraSettings { fov: 60.0, aspect: 1.0, near: 0.0005, far: 100.0 };
    let frustum = Frustum::new(&settings).unwrap();

    assert_vec3_near(frustum.plane(PLANE_NEAR).unwrap().normal(), Vec3::NEG_Z, 1e-5);
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -1.0)));
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -0.001)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.0001)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 2.0, -1.0)));
}

#[test]
fn test_narrow_fov_builds() {
    let settings = CameraSettings { fov: 0.5, aspect: 1.0, near: 0.1, far: 100.0 };
    let frustum = Frustum::new(&settings).unwrap();

    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -50.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 1.0, -50.0)));
    assert!(!frustum.contains_point(Vec3::new(1.0, 0.0, -50.0)));
    for (i, plane) in frustum.planes().iter().enumerate() {
        assert!(plane.distance(Vec3::new(0.0, 0.0, -50.0)) > 0.0, "plane {} should face the interior", i);
    }
}

#[test]
fn test_corners_lie_on_their_face_planes() {
    let frustum = create_test_frustum();
    let corners = frustum.corners();
    let near = frustum.plane(PLANE_NEAR).unwrap();
    let far = frustum.plane(PLANE_FAR).unwrap();

    for i in [CORNER_NTL, CORNER_NTR, CORNER_NBL, CORNER_NBR] {
        assert!(near.distance(corners[i]).abs() < 1e-4);
    }
    for i in [CORNER_FTL, CORNER_FTR, CORNER_FBL, CORNER_FBR] {
        assert!(far.distance(corners[i]).abs() < 1e-2);
    }
}

#[test]
fn test_planes_face_inward_after_arbitrary_pose() {
    let mut frustum = create_test_frustum();
    frustum.set_pose(Vec3::new(3.0, -7.0, 12.0), Vec3::new(0.4, 0.2, 0.9), Vec3::new(0.1, 1.0, 0.0)).unwrap();

    let inside = frustum.position() + frustum.forward() * 20.0;
    for plane in frustum.planes() {
        assert!(plane.distance(inside) > 0.0);
    }
    assert!(!frustum.contains_point(frustum.position() - frustum.forward() * 5.0));
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_unit_cube_in_front_is_inside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -10.0), 0.5)), FrustumTest::Inside);
}

#[test]
fn test_cube_behind_camera_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, 10.0), 0.5)), FrustumTest::Outside);
}

#[test]
fn test_cube_beyond_far_plane_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -1000.0), 0.5)), FrustumTest::Outside);
}

#[test]
fn test_cube_far_to_the_side_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(50.0, 0.0, -10.0), 0.5)), FrustumTest::Outside);
}

#[test]
fn test_cube_straddling_near_plane_intersects() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -1.0), 0.25)), FrustumTest::Intersect);
}

#[test]
fn test_cube_straddling_side_plane_intersects() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(10.0, 0.0, -10.0), 0.5)), FrustumTest::Intersect);
}

#[test]
fn test_cube_straddling_far_plane_intersects() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -100.0), 2.0)), FrustumTest::Intersect);
}

#[test]
fn test_box_enclosing_frustum_intersects() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -50.0), 500.0)), FrustumTest::Intersect);
}

#[test]
fn test_points_outside_near_edge_are_conservatively_intersect() {
    let frustum = create_test_frustum();

    // Each point fails a different side plane, so no single plane rejects both
    let points = [Vec3::new(9.0, 11.0, -10.0), Vec3::new(11.0, 9.0, -10.0)];
    assert!(!frustum.contains_point(points[0]));
    assert!(!frustum.contains_point(points[1]));
    assert_eq!(frustum.classify_points(&points), FrustumTest::Intersect);
}

#[test]
fn test_outside_plane_wins_over_earlier_intersect() {
    let frustum = create_test_frustum();

    // Straddles the top plane (index 0) but is entirely beyond the far plane
    let points = [Vec3::new(0.0, 150.0, -120.0), Vec3::new(0.0, 0.0, -120.0)];
    assert_eq!(frustum.classify_points(&points), FrustumTest::Outside);
}

#[test]
fn test_empty_point_set_is_outside() {
    let frustum = create_test_frustum();
    assert_eq!(frustum.classify_points(&[]), FrustumTest::Outside);
}

#[test]
fn test_classification_follows_pose() {
    let mut frustum = create_test_frustum();
    frustum.set_pose(Vec3::new(5.0, 0.0, 0.0), Vec3::X, Vec3::Y).unwrap();

    assert_eq!(frustum.classify(&cube(Vec3::new(15.0, 0.0, 0.0), 0.5)), FrustumTest::Inside);
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -10.0), 0.5)), FrustumTest::Outside);
    assert_eq!(frustum.classify(&cube(Vec3::new(-5.0, 0.0, 0.0), 0.5)), FrustumTest::Outside);
}

#[test]
fn test_look_direction_need_not_be_normalized() {
    let mut a = create_test_frustum();
    let mut b = create_test_frustum();
    a.set_pose(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0), Vec3::Y).unwrap();
    b.set_pose(Vec3::ZERO, Vec3::new(10.0, 0.0, -10.0), Vec3::Y).unwrap();

    for (ca, cb) in a.corners().iter().zip(b.corners()) {
        assert_vec3_near(*ca, *cb, 1e-3);
    }
}

#[test]
fn test_up_vector_is_orthonormalized() {
    let mut frustum = create_test_frustum();
    frustum.set_pose(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 1.0, -0.5)).unwrap();

    assert_vec3_near(frustum.up(), Vec3::Y, 1e-5);
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -10.0), 0.5)), FrustumTest::Inside);
}

// ============================================================================
// Culling toggle
// ============================================================================

#[test]
fn test_disabled_culling_reports_inside() {
    let mut frustum = create_test_frustum();
    frustum.set_culling_enabled(false);

    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, 10.0), 0.5)), FrustumTest::Inside);
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -1000.0), 0.5)), FrustumTest::Inside);
}

#[test]
fn test_toggle_culling_returns_new_state() {
    let mut frustum = create_test_frustum();

    assert!(!frustum.toggle_culling());
    assert!(!frustum.culling_enabled());
    assert!(frustum.toggle_culling());
    assert!(frustum.culling_enabled());
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, 10.0), 0.5)), FrustumTest::Outside);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_set_internals_rejects_out_of_range_values() {
    let mut frustum = create_test_frustum();

    for (fov, aspect, near, far) in [
        (0.0, 1.0, 1.0, 100.0),
        (180.0, 1.0, 1.0, 100.0),
        (90.0, 0.0, 1.0, 100.0),
        (90.0, 1.0, 0.0, 100.0),
        (90.0, 1.0, 100.0, 100.0),
        (90.0, 1.0, 50.0, 10.0),
    ] {
        let result = frustum.set_internals(fov, aspect, near, far);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))),
            "({}, {}, {}, {}) should be rejected", fov, aspect, near, far);
    }
}

#[test]
fn test_failed_set_internals_leaves_frustum_unchanged() {
    let mut frustum = create_test_frustum();
    let before = *frustum.corners();

    assert!(frustum.set_internals(90.0, 1.0, -1.0, 100.0).is_err());
    assert_eq!(*frustum.corners(), before);
    assert_eq!(frustum.near_distance(), 1.0);
}

#[test]
fn test_set_internals_rebuilds_geometry() {
    let mut frustum = create_test_frustum();
    frustum.set_internals(90.0, 1.0, 1.0, 10.0).unwrap();

    assert_eq!(frustum.far_distance(), 10.0);
    assert_eq!(frustum.classify(&cube(Vec3::new(0.0, 0.0, -20.0), 0.5)), FrustumTest::Outside);
}

#[test]
fn test_set_pose_rejects_degenerate_vectors() {
    let mut frustum = create_test_frustum();

    assert!(matches!(frustum.set_pose(Vec3::ZERO, Vec3::ZERO, Vec3::Y), Err(Error::InvalidGeometry(_))));
    assert!(matches!(frustum.set_pose(Vec3::ZERO, Vec3::NEG_Z, Vec3::ZERO), Err(Error::InvalidGeometry(_))));
    assert!(matches!(frustum.set_pose(Vec3::ZERO, Vec3::Y, Vec3::Y), Err(Error::InvalidGeometry(_))));
    assert!(matches!(frustum.set_pose(Vec3::ZERO, Vec3::NEG_Y, Vec3::Y * 3.0), Err(Error::InvalidGeometry(_))));
}

#[test]
fn test_failed_set_pose_leaves_frustum_unchanged() {
    let mut frustum = create_test_frustum();
    let before = *frustum.corners();

    assert!(frustum.set_pose(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec3::Y).is_err());
    assert_eq!(*frustum.corners(), before);
    assert_eq!(frustum.position(), Vec3::ZERO);
}
