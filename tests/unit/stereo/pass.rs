use std::path::Path;

use super::*;
use crate::composite::encoder::EncoderCommand;
use crate::composite::host::ProcessStatus;
use crate::foundation::core::{RigidTransform, Rotator};
use crate::foundation::error::AsymResult;

fn assert_vec_close(a: DVec3, b: DVec3) {
    assert!((a - b).length() < 1e-9, "{a:?} != {b:?}");
}

fn base() -> CameraPose {
    CameraPose {
        location: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    }
}

struct NoHost;

impl ProcessHost for NoHost {
    type Handle = ();

    fn spawn(&mut self, _command: &EncoderCommand) -> AsymResult<()> {
        Ok(())
    }

    fn poll(&mut self, _handle: &mut ()) -> AsymResult<ProcessStatus> {
        Ok(ProcessStatus::Running)
    }

    fn close(&mut self, _handle: ()) {}
}

struct NoFs;

impl FileSystem for NoFs {
    fn list_files(&self, _dir: &Path, _pattern: &str) -> AsymResult<Vec<String>> {
        Ok(Vec::new())
    }

    fn remove_file(&mut self, _path: &Path) -> AsymResult<()> {
        Ok(())
    }

    fn is_file(&self, _path: &Path) -> bool {
        false
    }
}

#[test]
fn defaults() {
    let pass = StereoPass::default();
    assert_eq!(pass.layout, StereoLayout::SideBySide);
    assert_eq!(pass.eye_separation, 6.4);
    assert!(!pass.swap_eyes);
    assert!(pass.auto_composite);
}

#[test]
fn camera_count_and_names() {
    let mut pass = StereoPass::default();
    assert_eq!(pass.camera_count(), 2);
    assert_eq!(pass.camera_name(0), Some("LeftEye"));
    assert_eq!(pass.camera_name(1), Some("RightEye"));

    pass.swap_eyes = true;
    assert_eq!(pass.camera_name(0), Some("RightEye"));
    assert_eq!(pass.eye_for_slot(1), Eye::Left);

    pass.layout = StereoLayout::Mono;
    assert_eq!(pass.camera_count(), 1);
    assert_eq!(pass.camera_name(0), None);
}

#[test]
fn without_rig_offsets_along_camera_right() {
    let mut pass = StereoPass::default();
    let pose = CameraPose {
        location: DVec3::new(10.0, 0.0, 0.0),
        rotation: Rotator::new(0.0, 90.0, 0.0).to_quat(),
    };
    let left = pass.camera_view(0, pose, None);
    let right = pass.camera_view(1, pose, None);

    // Yawed 90 degrees: camera right is world -X.
    assert_vec_close(left.location, DVec3::new(13.2, 0.0, 0.0));
    assert_vec_close(right.location, DVec3::new(6.8, 0.0, 0.0));
    assert_eq!(left.eye, Eye::Left);
    assert!(left.projection.is_none());
    assert_eq!(left.rotation, pose.rotation);
}

#[test]
fn with_rig_one_offset_drives_location_and_frustum() {
    let mut pass = StereoPass::default();
    let mut rig = CameraRig::default();

    let left = pass.camera_view(0, base(), Some(&mut rig));
    let right = pass.camera_view(1, base(), Some(&mut rig));

    assert_vec_close(left.location, DVec3::new(0.0, -3.2, 0.0));
    assert_vec_close(right.location, DVec3::new(0.0, 3.2, 0.0));

    let lp = left.projection.unwrap();
    let rp = right.projection.unwrap();
    assert_vec_close(lp.eye_world, left.location);
    assert_vec_close(rp.eye_world, right.location);

    // Mirror-image frusta, identical vertical extent.
    assert!((lp.frustum.left + rp.frustum.right).abs() < 1e-9);
    assert!((lp.frustum.top - rp.frustum.top).abs() < 1e-12);
    assert_eq!(left.rotation, lp.view_rotation);
}

#[test]
fn rig_offset_uses_screen_right_not_camera_right() {
    let mut pass = StereoPass::default();
    let mut rig = CameraRig::default();
    let pose = CameraPose {
        location: DVec3::ZERO,
        rotation: Rotator::new(0.0, 45.0, 0.0).to_quat(),
    };
    let view = pass.camera_view(1, pose, Some(&mut rig));
    assert_vec_close(view.location, DVec3::new(0.0, 3.2, 0.0));
}

#[test]
fn mono_view_is_unshifted() {
    let mut pass = StereoPass {
        layout: StereoLayout::Mono,
        ..StereoPass::default()
    };
    let mut rig = CameraRig::default();
    let view = pass.camera_view(0, base(), Some(&mut rig));
    assert_eq!(view.eye, Eye::Center);
    assert_eq!(view.location, DVec3::ZERO);
    let p = view.projection.unwrap();
    assert!((p.frustum.left + p.frustum.right).abs() < 1e-12);
}

#[test]
fn disabled_rig_still_moves_the_camera() {
    let mut pass = StereoPass::default();
    let mut rig = CameraRig::default();
    rig.projection.enabled = false;
    let view = pass.camera_view(1, base(), Some(&mut rig));
    assert!(view.projection.is_none());
    assert_vec_close(view.location, DVec3::new(0.0, 3.2, 0.0));
}

#[test]
fn screenless_rig_falls_back_to_camera_right() {
    let mut pass = StereoPass::default();
    let mut rig = CameraRig::new(RigidTransform::IDENTITY, None);
    let view = pass.camera_view(0, base(), Some(&mut rig));
    assert_vec_close(view.location, DVec3::new(0.0, -3.2, 0.0));
    assert!(view.projection.is_none());
}

#[test]
fn composite_pipeline_only_for_stereo_auto_composite() {
    let pass = StereoPass::default();
    assert!(pass.composite_pipeline(NoHost, NoFs).is_some());

    let pass = StereoPass {
        auto_composite: false,
        ..StereoPass::default()
    };
    assert!(pass.composite_pipeline(NoHost, NoFs).is_none());

    let pass = StereoPass {
        layout: StereoLayout::Mono,
        ..StereoPass::default()
    };
    assert!(pass.composite_pipeline(NoHost, NoFs).is_none());
}
