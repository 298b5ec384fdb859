use glam::{Mat4, Vec3};
use crate::error::Error;
use super::*;

// ============================================================================
// AABB
// ============================================================================

#[test]
fn test_aabb_from_points_extents() {
    let points = [
        Vec3::new(1.0, -2.0, 3.0),
        Vec3::new(-4.0, 5.0, 0.5),
        Vec3::new(2.0, 0.0, -6.0),
    ];
    let aabb = AABB::from_points(&points).unwrap();

    assert_eq!(aabb.min, Vec3::new(-4.0, -2.0, -6.0));
    assert_eq!(aabb.max, Vec3::new(2.0, 5.0, 3.0));
    assert_eq!(aabb.center(), Vec3::new(-1.0, 1.5, -1.5));
    assert_eq!(aabb.half_extents(), Vec3::new(3.0, 3.5, 4.5));
}

#[test]
fn test_aabb_single_point_is_degenerate_box() {
    let aabb = AABB::from_points(&[Vec3::new(7.0, 8.0, 9.0)]).unwrap();
    assert_eq!(aabb.min, aabb.max);
    assert_eq!(aabb.half_extents(), Vec3::ZERO);
}

#[test]
fn test_aabb_empty_points_rejected() {
    assert!(matches!(AABB::from_points(&[]), Err(Error::InvalidResource(_))));
}

// ============================================================================
// BoundingBox corners
// ============================================================================

#[test]
fn test_corner_order_and_values() {
    let bbox = BoundingBox::from_center_half_extents(Vec3::new(0.0, 0.0, -10.0), Vec3::splat(0.5));
    let corners = bbox.corners();

    assert_eq!(corners[0], Vec3::new(0.5, 0.5, -9.5));
    assert_eq!(corners[1], Vec3::new(0.5, 0.5, -10.5));
    assert_eq!(corners[2], Vec3::new(0.5, -0.5, -9.5));
    assert_eq!(corners[3], Vec3::new(0.5, -0.5, -10.5));
    assert_eq!(corners[4], Vec3::new(-0.5, 0.5, -9.5));
    assert_eq!(corners[5], Vec3::new(-0.5, 0.5, -10.5));
    assert_eq!(corners[6], Vec3::new(-0.5, -0.5, -9.5));
    assert_eq!(corners[7], Vec3::new(-0.5, -0.5, -10.5));
}

#[test]
fn test_corners_are_all_distinct_for_non_degenerate_box() {
    let bbox = BoundingBox::from_min_max(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
    let corners = bbox.corners();
    for i in 0..8 {
        for j in (i + 1)..8 {
            assert_ne!(corners[i], corners[j]);
        }
    }
}

#[test]
fn test_center_of_corners() {
    let bbox = BoundingBox::from_min_max(Vec3::new(2.0, 2.0, 2.0), Vec3::new(4.0, 6.0, 8.0));
    assert!((bbox.center() - Vec3::new(3.0, 4.0, 5.0)).length() < 1e-6);
}

// ============================================================================
// BoundingBox::translate
// ============================================================================

#[test]
fn test_translate_by_zero_is_bit_identical() {
    let original = BoundingBox::from_min_max(Vec3::new(-0.3, 1.7, -12.1), Vec3::new(0.9, 2.2, -3.3));
    let mut moved = original;
    moved.translate(Vec3::ZERO);

    for (a, b) in original.corners().iter().zip(moved.corners()) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.z.to_bits(), b.z.to_bits());
    }
}

#[test]
fn test_translate_moves_every_corner() {
    let mut bbox = BoundingBox::from_min_max(Vec3::ZERO, Vec3::ONE);
    let before = *bbox.corners();
    bbox.translate(Vec3::new(0.0, 0.0, -990.0));

    for (old, new) in before.iter().zip(bbox.corners()) {
        assert_eq!(*new - *old, Vec3::new(0.0, 0.0, -990.0));
    }
}

// ============================================================================
// BoundingBox::transformed
// ============================================================================

#[test]
fn test_transformed_identity() {
    let bbox = BoundingBox::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert_eq!(bbox.transformed(&Mat4::IDENTITY), bbox);
}

#[test]
fn test_transformed_translation_and_scale() {
    let bbox = BoundingBox::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
    let matrix = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0)) * Mat4::from_scale(Vec3::splat(2.0));
    let world = bbox.transformed(&matrix);

    assert_eq!(world.corners()[0], Vec3::new(2.0, 2.0, -8.0));
    assert_eq!(world.corners()[7], Vec3::new(-2.0, -2.0, -12.0));
}

#[test]
fn test_transformed_rotation_keeps_center() {
    let bbox = BoundingBox::from_center_half_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::splat(1.0));
    let world = bbox.transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2));

    // +X rotated a quarter turn about Y lands on -Z
    assert!((world.center() - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-4);
}
