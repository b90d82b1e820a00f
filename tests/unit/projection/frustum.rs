use super::*;
use crate::screen::geometry::ScreenPlane;

const EPS: f64 = 1e-9;

fn default_corners() -> ScreenCorners {
    ScreenPlane::default().corners_world()
}

fn depth_at(m: &DMat4, z: f64) -> f64 {
    let clip = *m * DVec4::new(0.0, 0.0, z, 1.0);
    clip.z / clip.w
}

#[test]
fn basis_of_default_screen() {
    let b = ScreenBasis::from_corners(&default_corners());
    assert!((b.right - DVec3::Y).length() < EPS);
    assert!((b.up - DVec3::Z).length() < EPS);
    assert!((b.normal - -DVec3::X).length() < EPS);
}

#[test]
fn centered_eye_gives_symmetric_frustum() {
    let e = frustum_extents(DVec3::ZERO, &default_corners(), 20.0);
    assert!((e.distance - 100.0).abs() < EPS);
    assert!((e.left + e.right).abs() < EPS);
    assert!((e.bottom + e.top).abs() < EPS);
    assert!((e.right - 16.0).abs() < EPS);
    assert!((e.top - 9.0).abs() < EPS);
}

#[test]
fn horizontal_eye_shift_keeps_vertical_extent() {
    let corners = default_corners();
    let centered = frustum_extents(DVec3::ZERO, &corners, 20.0);
    for dy in [-60.0, -7.5, 3.2, 45.0] {
        let shifted = frustum_extents(DVec3::new(0.0, dy, 0.0), &corners, 20.0);
        assert!((shifted.top - centered.top).abs() < EPS);
        assert!((shifted.bottom - centered.bottom).abs() < EPS);
        let expected_shift = -dy * 20.0 / 100.0;
        assert!((shifted.left - (centered.left + expected_shift)).abs() < EPS);
        assert!((shifted.right - (centered.right + expected_shift)).abs() < EPS);
    }
}

#[test]
fn near_screen_eye_uses_clamped_distance() {
    let corners = default_corners();
    let close = frustum_extents(DVec3::new(99.0, 12.0, -4.0), &corners, 20.0);
    let at_min = frustum_extents(DVec3::new(90.0, 12.0, -4.0), &corners, 20.0);
    assert_eq!(close.distance, MIN_SCREEN_DISTANCE);
    assert!((close.left - at_min.left).abs() < EPS);
    assert!((close.right - at_min.right).abs() < EPS);
    assert!((close.bottom - at_min.bottom).abs() < EPS);
    assert!((close.top - at_min.top).abs() < EPS);
}

#[test]
fn eye_on_screen_plane_stays_finite() {
    let (e, m) = project(
        DVec3::new(100.0, 0.0, 0.0),
        &default_corners(),
        &ProjectionParams::default(),
    );
    assert_eq!(e.distance, MIN_SCREEN_DISTANCE);
    assert!(m.is_finite());
}

#[test]
fn finite_far_maps_near_to_one_and_far_to_zero() {
    let extents = frustum_extents(DVec3::ZERO, &default_corners(), 20.0);
    let m = off_center_projection(&extents, 1000.0);
    assert!((depth_at(&m, 20.0) - 1.0).abs() < 1e-12);
    assert!(depth_at(&m, 1000.0).abs() < 1e-12);
    assert!(depth_at(&m, 500.0) > 0.0 && depth_at(&m, 500.0) < 1.0);
}

#[test]
fn infinite_far_approaches_finite_limit() {
    let extents = frustum_extents(DVec3::new(0.0, 30.0, 10.0), &default_corners(), 20.0);
    let inf = off_center_projection(&extents, 0.0);
    let huge = off_center_projection(&extents, 1.0e12);

    assert!(inf.is_finite());
    assert!(!inf.is_nan());
    assert!((inf.z_axis.z - huge.z_axis.z).abs() < 1e-6);
    assert!((inf.w_axis.z - huge.w_axis.z).abs() < 1e-6);
    assert!((depth_at(&inf, 20.0) - 1.0).abs() < 1e-12);
    assert!(depth_at(&inf, 1.0e9) > 0.0);

    // far == near is treated the same way.
    let same = off_center_projection(&extents, 20.0);
    assert_eq!(same, inf);
}

#[test]
fn screen_edges_map_to_ndc_bounds() {
    let eye = DVec3::new(10.0, -25.0, 8.0);
    let corners = default_corners();
    let (e, m) = project(eye, &corners, &ProjectionParams::new(20.0, 5000.0));
    let basis = ScreenBasis::from_corners(&corners);
    let forward = -basis.normal;

    for (corner, ndc) in [
        (corners.bottom_left, (-1.0, -1.0)),
        (corners.bottom_right, (1.0, -1.0)),
        (corners.top_left, (-1.0, 1.0)),
        (corners.top_right, (1.0, 1.0)),
    ] {
        let v = corner - eye;
        let view = DVec4::new(basis.right.dot(v), basis.up.dot(v), forward.dot(v), 1.0);
        let clip = m * view;
        assert!((clip.x / clip.w - ndc.0).abs() < 1e-9, "{corner:?}");
        assert!((clip.y / clip.w - ndc.1).abs() < 1e-9, "{corner:?}");
    }
    assert!(e.left < e.right);
}

#[test]
fn zero_area_frustum_does_not_divide_by_zero() {
    let p = DVec3::new(100.0, 0.0, 0.0);
    let corners = ScreenCorners::new(p, p, p, p);
    let (_, m) = project(DVec3::ZERO, &corners, &ProjectionParams::default());
    assert!(!m.is_nan());
    assert!(m.is_finite());
}
