//! Integration tests for drape-math.

use drape_math::{Aabb, Vec3};

// ─── Box/Box Intersection ─────────────────────────────────────

#[test]
fn boxes_overlapping() {
    let a = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
    let b = Aabb::new(Vec3::splat(1.0), Vec3::splat(3.0));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn boxes_touching_count_as_overlap() {
    // Closed-interval test: shared face is an intersection.
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
    assert!(a.intersects(&b));
}

#[test]
fn boxes_disjoint() {
    let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
    let b = Aabb::new(Vec3::splat(1.5), Vec3::splat(2.5));
    assert!(!a.intersects(&b));

    // Overlap on two axes only is not an intersection.
    let c = Aabb::new(Vec3::new(0.5, 0.5, 5.0), Vec3::new(0.7, 0.7, 6.0));
    assert!(!a.intersects(&c));
}

// ─── Box/Sphere Intersection ──────────────────────────────────

#[test]
fn sphere_center_inside_box() {
    let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(b.intersects_sphere(Vec3::ZERO, 0.01));
}

#[test]
fn sphere_near_face_and_corner() {
    let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));

    // Near a face: distance 0.5 from +X face.
    assert!(b.intersects_sphere(Vec3::new(1.5, 0.0, 0.0), 0.6));
    assert!(!b.intersects_sphere(Vec3::new(1.5, 0.0, 0.0), 0.4));

    // Near the (1,1,1) corner: distance sqrt(3)*0.5 ≈ 0.866.
    let corner = Vec3::splat(1.5);
    assert!(b.intersects_sphere(corner, 0.9));
    assert!(!b.intersects_sphere(corner, 0.8));
}

#[test]
fn sphere_tangent_counts_as_overlap() {
    let b = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    assert!(b.intersects_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0));
}

// ─── Containment / Center / Enclose ───────────────────────────

#[test]
fn fits_entirely_within() {
    let outer = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
    let inner = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
    assert!(inner.fits_entirely_within(&outer));
    assert!(!outer.fits_entirely_within(&inner));

    // Sharing a boundary still counts.
    let flush = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
    assert!(flush.fits_entirely_within(&outer));

    let poking_out = Aabb::new(Vec3::splat(9.0), Vec3::splat(11.0));
    assert!(!poking_out.fits_entirely_within(&outer));
}

#[test]
fn center_is_midpoint() {
    let b = Aabb::new(Vec3::new(-2.0, 0.0, 4.0), Vec3::new(2.0, 6.0, 8.0));
    assert_eq!(b.center(), Vec3::new(0.0, 3.0, 6.0));
}

#[test]
fn enclose_grows_to_union() {
    let mut acc = Aabb::empty();
    acc.enclose(&Aabb::new(Vec3::ZERO, Vec3::ONE));
    acc.enclose(&Aabb::new(Vec3::splat(-3.0), Vec3::splat(-2.0)));

    assert_eq!(acc.min, Vec3::splat(-3.0));
    assert_eq!(acc.max, Vec3::ONE);
}

#[test]
fn from_point_inflates_by_margin() {
    let b = Aabb::from_point(Vec3::new(1.0, 2.0, 3.0), 0.001);
    assert!((b.extent(0) - 0.002).abs() < 1e-7);
    assert_eq!(b.center(), Vec3::new(1.0, 2.0, 3.0));
}
