use crate::foundation::core::{DMat4, DQuat, DVec3, RigidTransform};
use crate::projection::frustum::{FrustumExtents, project};
use crate::projection::params::ProjectionParams;
use crate::screen::geometry::{ScreenSource, resolve_corners, screen_orientation};
use crate::stereo::eye::EyeOffset;

/// How many initial calculations per calculator are logged at debug level.
const DEBUG_LOG_FRAMES: u32 = 3;

/// Result of a successful off-axis calculation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffAxisView {
    /// World-space view orientation (the screen's orientation, independent of eye position).
    pub view_rotation: DQuat,
    /// Reversed-depth projection matrix.
    pub projection: DMat4,
    /// Frustum the matrix was built from.
    pub frustum: FrustumExtents,
    /// Eye position actually projected from, world space (stereo offset included).
    pub eye_world: DVec3,
}

/// Eye position and view orientation of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyePose {
    /// World-space eye position.
    pub position: DVec3,
    /// World-space view orientation.
    pub rotation: DQuat,
}

/// Single-slot current/previous view cache used to interpolate motion between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewHistory {
    current: Option<EyePose>,
    previous: Option<EyePose>,
}

impl ViewHistory {
    /// Make `pose` current; the old current becomes previous.
    pub fn record(&mut self, pose: EyePose) {
        self.previous = self.current.replace(pose);
    }

    /// Pose of the latest calculated frame.
    pub fn current(&self) -> Option<EyePose> {
        self.current
    }

    /// Pose of the frame before the latest one.
    pub fn previous(&self) -> Option<EyePose> {
        self.previous
    }

    /// Forget both slots (e.g. after a camera cut).
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Off-axis projection calculator. Keep one instance per camera.
#[derive(Clone, Debug)]
pub struct OffAxisProjection {
    /// Master switch; when off every calculation reports "use the default projection".
    pub enabled: bool,
    /// Stereo offset applied to the eye before projecting.
    pub eye_offset: EyeOffset,
    params: ProjectionParams,
    history: ViewHistory,
    debug_frames_left: u32,
}

impl Default for OffAxisProjection {
    fn default() -> Self {
        Self::new(ProjectionParams::default())
    }
}

impl OffAxisProjection {
    /// Create an enabled calculator with no stereo offset.
    pub fn new(params: ProjectionParams) -> Self {
        Self {
            enabled: true,
            eye_offset: EyeOffset::CENTER,
            params,
            history: ViewHistory::default(),
            debug_frames_left: DEBUG_LOG_FRAMES,
        }
    }

    /// Clip configuration.
    pub fn params(&self) -> ProjectionParams {
        self.params
    }

    /// Replace the clip configuration (values are sanitized).
    pub fn set_clip(&mut self, near: f64, far: f64) {
        self.params = ProjectionParams::new(near, far);
    }

    /// Previous-frame cache.
    pub fn history(&self) -> &ViewHistory {
        &self.history
    }

    /// Mutable access to the previous-frame cache.
    pub fn history_mut(&mut self) -> &mut ViewHistory {
        &mut self.history
    }

    /// Calculate the view rotation and projection for `eye` (world space) using the configured
    /// stereo offset.
    ///
    /// Returns `None` when disabled or when `screen` is `None`; the caller should keep its default
    /// projection for that frame.
    pub fn calculate(
        &mut self,
        eye: DVec3,
        screen: Option<&ScreenSource>,
        local_space: &RigidTransform,
    ) -> Option<OffAxisView> {
        let offset = self.eye_offset;
        self.calculate_with_offset(eye, screen, local_space, offset)
    }

    /// Like [`OffAxisProjection::calculate`] with an explicit stereo offset.
    pub fn calculate_with_offset(
        &mut self,
        eye: DVec3,
        screen: Option<&ScreenSource>,
        local_space: &RigidTransform,
        offset: EyeOffset,
    ) -> Option<OffAxisView> {
        if !self.enabled {
            return None;
        }
        let screen = screen?;

        let view_rotation = screen_orientation(screen);
        let corners = resolve_corners(screen).to_local(local_space);

        let (right, _) = corners.edge_directions();
        let eye_local = offset.apply(local_space.inverse_transform_point(eye), right);

        let (frustum, projection) = project(eye_local, &corners, &self.params);
        let eye_world = local_space.transform_point(eye_local);

        self.history.record(EyePose {
            position: eye_world,
            rotation: view_rotation,
        });

        if self.debug_frames_left > 0 {
            self.debug_frames_left -= 1;
            tracing::debug!(
                eye = ?eye_world,
                rotation = ?view_rotation,
                left = frustum.left,
                right = frustum.right,
                bottom = frustum.bottom,
                top = frustum.top,
                distance = frustum.distance,
                "off-axis projection"
            );
        }

        Some(OffAxisView {
            view_rotation,
            projection,
            frustum,
            eye_world,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/projection/offaxis.rs"]
mod tests;
