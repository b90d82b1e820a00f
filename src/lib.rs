//! asymcam computes off-axis (generalized perspective) projections for viewers in front of fixed
//! flat screens, and merges stereo eye renders into one video with an external encoder.
//!
//! # Pipeline overview
//!
//! Per rendered frame:
//!
//! 1. **Resolve**: a [`ScreenPlane`] or [`ExternalQuad`] becomes four world-space corners
//!    ([`resolve_corners`]).
//! 2. **Project**: [`OffAxisProjection`] turns eye position + corners + clip planes into a view
//!    rotation and a reversed-depth projection matrix.
//! 3. **Stereo** (optional): the eye is shifted along the screen's right axis by half the eye
//!    separation before projecting ([`EyeOffset`], [`StereoPass`]).
//! 4. **Constrain** (optional): [`constrain_viewport`] pillarboxes or letterboxes the render target
//!    to the screen's aspect ratio.
//!
//! [`CameraRig::setup_view`] runs steps 1-4 for a single camera.
//!
//! After a stereo render job has written its frames, [`CompositePipeline`] launches the encoder
//! (`ffmpeg` by default) and is polled until it finishes.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Geometry never fails**: degenerate screens, clip planes and eye positions are clamped.
//! - **No IO in the per-frame path**: only the composite pipeline touches processes and files,
//!   through the [`ProcessHost`] and [`FileSystem`] seams.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod composite;
mod foundation;
mod projection;
mod rig;
mod screen;
mod stereo;
mod viewport;

pub use composite::encoder::{
    CompositeSettings, Container, DEFAULT_ENCODER, EncoderCommand, MAX_QUALITY, VideoCodec,
    build_composite_command, composite_output_path, is_encoder_available, resolve_encoder,
};
pub use composite::host::{
    FileSystem, ProcessHost, ProcessStatus, StdFileSystem, SystemProcess, SystemProcessHost,
    wildcard_match,
};
pub use composite::pattern::SequencePattern;
pub use composite::pipeline::{
    CompositePipeline, CompositeReport, CompositeState, StereoRenderJob,
};
pub use foundation::core::{
    DMat3, DMat4, DQuat, DVec3, DVec4, Fps, RigidTransform, Rotator, Size, ViewRect,
};
pub use foundation::error::{AsymError, AsymResult};
pub use projection::frustum::{
    FrustumExtents, MIN_SCREEN_DISTANCE, REVERSED_Z_FLIP, ScreenBasis, frustum_extents,
    off_center_projection, project,
};
pub use projection::offaxis::{EyePose, OffAxisProjection, OffAxisView, ViewHistory};
pub use projection::params::ProjectionParams;
pub use rig::camera::{AXIS_SWIZZLE, CameraRig, EyeSource, ViewSetup, view_rotation_matrix};
pub use rig::config::{EyeSourceConfig, OwnerConfig, RigConfig, ScreenConfig, StereoJobConfig};
pub use screen::geometry::{
    ExternalQuad, ScreenCorners, ScreenPlane, ScreenSource, resolve_corners, screen_orientation,
};
pub use stereo::eye::{
    Eye, EyeOffset, LEFT_EYE_TAG, RIGHT_EYE_TAG, StereoConfig, StereoLayout, eye_for_slot,
    eye_index_for, for_eye,
};
pub use stereo::pass::{CameraPose, CameraView, StereoPass};
pub use viewport::aspect::{ASPECT_TOLERANCE, constrain_to_aspect, constrain_viewport};
