use crate::composite::encoder::CompositeSettings;
use crate::composite::host::{FileSystem, ProcessHost};
use crate::composite::pipeline::CompositePipeline;
use crate::foundation::core::{DQuat, DVec3};
use crate::projection::offaxis::OffAxisView;
use crate::rig::camera::CameraRig;
use crate::stereo::eye::{Eye, EyeOffset, StereoLayout, eye_for_slot};

/// Base camera pose supplied by the render job for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// World-space camera location.
    pub location: DVec3,
    /// World-space camera orientation.
    pub rotation: DQuat,
}

/// View for one camera slot of one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// Eye-translated location.
    pub location: DVec3,
    /// View orientation: the screen's when a projection was calculated, the camera's otherwise.
    pub rotation: DQuat,
    /// Eye rendered by the slot.
    pub eye: Eye,
    /// Off-axis projection, or `None` to keep the job's default projection.
    pub projection: Option<OffAxisView>,
}

/// Render-job pass rendering one camera slot per eye and compositing the results afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct StereoPass {
    /// Eye arrangement; [`StereoLayout::Mono`] renders a single unshifted camera.
    pub layout: StereoLayout,
    /// Inter-eye distance in world units.
    pub eye_separation: f64,
    /// Swap the slot to eye mapping.
    pub swap_eyes: bool,
    /// Composite the eye sequences once the job has written its files.
    pub auto_composite: bool,
    /// Encoder settings for the composite.
    pub composite: CompositeSettings,
    warned_missing_rig: bool,
}

impl Default for StereoPass {
    fn default() -> Self {
        Self::new(
            StereoLayout::SideBySide,
            6.4,
            false,
            true,
            CompositeSettings::default(),
        )
    }
}

impl StereoPass {
    /// Create a pass. Negative separation is treated as zero.
    pub fn new(
        layout: StereoLayout,
        eye_separation: f64,
        swap_eyes: bool,
        auto_composite: bool,
        composite: CompositeSettings,
    ) -> Self {
        Self {
            layout,
            eye_separation: eye_separation.max(0.0),
            swap_eyes,
            auto_composite,
            composite,
            warned_missing_rig: false,
        }
    }

    /// Number of camera slots the job has to render per frame.
    pub fn camera_count(&self) -> usize {
        if self.layout.is_stereo() { 2 } else { 1 }
    }

    /// Eye rendered by `slot`. [`Eye::Center`] for mono.
    pub fn eye_for_slot(&self, slot: usize) -> Eye {
        if self.layout.is_stereo() {
            eye_for_slot(slot, self.swap_eyes)
        } else {
            Eye::Center
        }
    }

    /// Camera name (and output file tag) of `slot`; `None` for mono.
    pub fn camera_name(&self, slot: usize) -> Option<&'static str> {
        self.eye_for_slot(slot).tag()
    }

    /// View of `slot` for one frame.
    ///
    /// The base location is shifted along the screen's right axis (the camera's own right axis
    /// without a rig), and the rig then projects from exactly that point with no further offset.
    pub fn camera_view(
        &mut self,
        slot: usize,
        base: CameraPose,
        rig: Option<&mut CameraRig>,
    ) -> CameraView {
        let eye = self.eye_for_slot(slot);

        let right = match rig.as_deref() {
            Some(rig) => rig.screen_right(),
            None => None,
        };
        let right = right.unwrap_or_else(|| {
            if eye != Eye::Center && rig.is_none() && !self.warned_missing_rig {
                self.warned_missing_rig = true;
                tracing::warn!("no camera rig, eye offset uses the camera right axis");
            }
            base.rotation * DVec3::Y
        });
        let location = EyeOffset::new(self.eye_separation, eye).apply(base.location, right);

        let projection = rig.and_then(|rig| rig.calculate_with_offset(location, EyeOffset::CENTER));

        CameraView {
            location,
            rotation: projection.map_or(base.rotation, |p| p.view_rotation),
            eye,
            projection,
        }
    }

    /// A composite pipeline for the finished job, when auto-composite is on and the layout is
    /// stereo.
    pub fn composite_pipeline<P: ProcessHost, F: FileSystem>(
        &self,
        host: P,
        fs: F,
    ) -> Option<CompositePipeline<P, F>> {
        (self.auto_composite && self.layout.is_stereo())
            .then(|| CompositePipeline::new(host, fs, self.layout, self.composite.clone()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/pass.rs"]
mod tests;
