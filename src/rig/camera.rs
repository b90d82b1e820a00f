use crate::foundation::core::{DMat4, DQuat, DVec3, DVec4, RigidTransform, ViewRect};
use crate::projection::frustum::FrustumExtents;
use crate::projection::offaxis::{OffAxisProjection, OffAxisView};
use crate::screen::geometry::{ExternalQuad, ScreenPlane, ScreenSource, resolve_corners};
use crate::stereo::eye::EyeOffset;
use crate::viewport::aspect::constrain_viewport;

/// Maps world axes (X forward, Y right, Z up) onto view axes (x right, y up, z forward).
pub const AXIS_SWIZZLE: DMat4 = DMat4::from_cols(
    DVec4::new(0.0, 0.0, 1.0, 0.0),
    DVec4::new(1.0, 0.0, 0.0, 0.0),
    DVec4::new(0.0, 1.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, 0.0, 1.0),
);

/// Where the eye position comes from each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EyeSource {
    /// The rig camera's own world position.
    #[default]
    SelfTransform,
    /// Another entity's world position, re-resolved by the host every frame.
    TrackedEntity {
        /// Tracked entity position, world space.
        position: DVec3,
    },
    /// Caller-supplied eye, optionally with a quad that replaces the screen corners.
    ExternalOverride {
        /// Eye position, world space.
        eye: DVec3,
        /// Screen corners replacing the rig's own screen.
        quad: Option<ExternalQuad>,
    },
}

/// Everything the host applies to its render view for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewSetup {
    /// World-space view origin (the eye actually projected from).
    pub view_origin: DVec3,
    /// World-space view orientation.
    pub view_rotation: DQuat,
    /// World-to-view rotation including the axis swizzle.
    pub view_rotation_matrix: DMat4,
    /// Reversed-depth projection matrix.
    pub projection: DMat4,
    /// Viewport sub-rectangle to render into.
    pub view_rect: ViewRect,
    /// Frustum the projection was built from.
    pub frustum: FrustumExtents,
}

/// World-to-view rotation matrix for a view looking along `rotation`'s forward axis.
pub fn view_rotation_matrix(rotation: DQuat) -> DMat4 {
    AXIS_SWIZZLE * DMat4::from_quat(rotation.inverse())
}

/// A screen, an eye, and the projection calculator that ties them together.
///
/// Corners and eye are converted into `owner`'s local space before projecting.
#[derive(Clone, Debug)]
pub struct CameraRig {
    /// World transform of the entity that owns screen and camera.
    pub owner: RigidTransform,
    /// World position of the rig camera (used by [`EyeSource::SelfTransform`]).
    pub camera_position: DVec3,
    /// Screen plane; `None` disables projection unless an external quad is supplied.
    pub screen: Option<ScreenPlane>,
    /// Eye position source.
    pub eye_source: EyeSource,
    /// Calculator (clip params, stereo offset, enable flag, view history).
    pub projection: OffAxisProjection,
    /// Shrink the viewport to the screen's aspect ratio.
    pub match_viewport_aspect: bool,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigidTransform::IDENTITY, Some(ScreenPlane::default()))
    }
}

impl CameraRig {
    /// Rig with the camera at the owner's origin.
    pub fn new(owner: RigidTransform, screen: Option<ScreenPlane>) -> Self {
        Self {
            owner,
            camera_position: owner.translation,
            screen,
            eye_source: EyeSource::SelfTransform,
            projection: OffAxisProjection::default(),
            match_viewport_aspect: true,
        }
    }

    /// Eye position for the current frame, world space.
    pub fn eye_position(&self) -> DVec3 {
        match self.eye_source {
            EyeSource::SelfTransform => self.camera_position,
            EyeSource::TrackedEntity { position } => position,
            EyeSource::ExternalOverride { eye, .. } => eye,
        }
    }

    /// Screen geometry in effect: an external quad wins over the rig's own screen.
    pub fn screen_source(&self) -> Option<ScreenSource> {
        if let EyeSource::ExternalOverride {
            quad: Some(quad), ..
        } = self.eye_source
        {
            return Some(ScreenSource::Quad(quad));
        }
        self.screen.map(ScreenSource::Plane)
    }

    /// Unit right axis of the screen, world space.
    pub fn screen_right(&self) -> Option<DVec3> {
        let corners = resolve_corners(&self.screen_source()?);
        let (right, _) = corners.edge_directions();
        (right != DVec3::ZERO).then_some(right)
    }

    /// Project from `eye` using the rig's configured stereo offset.
    pub fn calculate(&mut self, eye: DVec3) -> Option<OffAxisView> {
        let screen = self.screen_source();
        self.projection
            .calculate(eye, screen.as_ref(), &self.owner)
    }

    /// Project from `eye` with an explicit stereo offset.
    pub fn calculate_with_offset(&mut self, eye: DVec3, offset: EyeOffset) -> Option<OffAxisView> {
        let screen = self.screen_source();
        self.projection
            .calculate_with_offset(eye, screen.as_ref(), &self.owner, offset)
    }

    /// Per-frame view setup for a render target covering `viewport`.
    ///
    /// `None` means the host keeps its default projection for this frame.
    pub fn setup_view(&mut self, viewport: ViewRect) -> Option<ViewSetup> {
        let eye = self.eye_position();
        let view = self.calculate(eye)?;

        let view_rect = match self.screen_source() {
            Some(screen) if self.match_viewport_aspect => {
                constrain_viewport(viewport, screen.size())
            }
            _ => viewport,
        };

        Some(ViewSetup {
            view_origin: view.eye_world,
            view_rotation: view.view_rotation,
            view_rotation_matrix: view_rotation_matrix(view.view_rotation),
            projection: view.projection,
            view_rect,
            frustum: view.frustum,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/camera.rs"]
mod tests;
