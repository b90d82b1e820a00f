use super::*;
use crate::foundation::core::Rotator;

fn assert_vec_close(a: DVec3, b: DVec3) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn default_screen_corners_sit_in_yz_plane() {
    let c = ScreenPlane::default().corners_world();
    assert_vec_close(c.bottom_left, DVec3::new(100.0, -80.0, -45.0));
    assert_vec_close(c.bottom_right, DVec3::new(100.0, 80.0, -45.0));
    assert_vec_close(c.top_left, DVec3::new(100.0, -80.0, 45.0));
    assert_vec_close(c.top_right, DVec3::new(100.0, 80.0, 45.0));
    assert_vec_close(c.center(), DVec3::new(100.0, 0.0, 0.0));
}

#[test]
fn size_is_clamped_to_one_unit() {
    let s = ScreenPlane::new(DVec3::ZERO, DQuat::IDENTITY, Size::new(0.0, -5.0));
    assert_eq!(s.size(), Size::new(1.0, 1.0));

    let mut s = ScreenPlane::default();
    s.set_size(Size::new(0.25, 300.0));
    assert_eq!(s.size(), Size::new(1.0, 300.0));
}

#[test]
fn rotated_screen_corners_follow_rotation() {
    let plane = ScreenPlane::new(
        DVec3::new(0.0, 50.0, 0.0),
        Rotator::new(0.0, 90.0, 0.0).to_quat(),
        Size::new(20.0, 10.0),
    );
    let c = plane.corners_world();
    // Yaw 90: local +Y (right) now points along world -X.
    assert_vec_close(c.bottom_left, DVec3::new(10.0, 50.0, -5.0));
    assert_vec_close(c.bottom_right, DVec3::new(-10.0, 50.0, -5.0));
    assert_vec_close(c.top_left, DVec3::new(10.0, 50.0, 5.0));
}

#[test]
fn corners_local_undo_owner_transform() {
    let owner = RigidTransform::new(
        DVec3::new(500.0, 0.0, 0.0),
        Rotator::new(0.0, 45.0, 0.0).to_quat(),
    );
    let local = ScreenPlane {
        position: owner.transform_point(DVec3::new(100.0, 0.0, 0.0)),
        rotation: owner.rotation,
        ..ScreenPlane::default()
    }
    .corners_local(&owner);
    assert_vec_close(local.bottom_left, DVec3::new(100.0, -80.0, -45.0));
    assert_vec_close(local.top_right, DVec3::new(100.0, 80.0, 45.0));
}

#[test]
fn quad_orientation_matches_plane_rotation() {
    let rotation = Rotator::new(15.0, -30.0, 5.0).to_quat();
    let plane = ScreenPlane::new(DVec3::new(3.0, 2.0, 1.0), rotation, Size::new(40.0, 30.0));
    let derived = plane.corners_world().orientation();
    assert!(derived.abs_diff_eq(rotation, 1e-9) || derived.abs_diff_eq(-rotation, 1e-9));

    let source = ScreenSource::Quad(ExternalQuad::from_corners(plane.corners_world()));
    let q = screen_orientation(&source);
    assert_vec_close(q * DVec3::X, rotation * DVec3::X);
    assert!((source.size().width - 40.0).abs() < 1e-9);
    assert!((source.size().height - 30.0).abs() < 1e-9);
}

#[test]
fn degenerate_quad_orientation_is_identity() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    let quad = ScreenCorners::new(p, p, p, p);
    assert_eq!(quad.orientation(), DQuat::IDENTITY);
}

#[test]
fn reference_entities_take_precedence_over_literal_points() {
    let literal = ScreenPlane::default().corners_world();
    let moved = literal.map(|p| p + DVec3::new(0.0, 0.0, 10.0));
    let quad = ExternalQuad {
        corners: literal,
        references: Some(moved),
    };
    assert_eq!(resolve_corners(&ScreenSource::Quad(quad)), moved);
    assert_eq!(
        resolve_corners(&ScreenSource::Quad(ExternalQuad::from_corners(literal))),
        literal
    );
}
