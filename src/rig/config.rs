use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::composite::encoder::CompositeSettings;
use crate::composite::pipeline::StereoRenderJob;
use crate::foundation::core::{DVec3, Fps, RigidTransform, Rotator, Size};
use crate::foundation::error::{AsymError, AsymResult};
use crate::projection::offaxis::OffAxisProjection;
use crate::projection::params::ProjectionParams;
use crate::rig::camera::{CameraRig, EyeSource};
use crate::screen::geometry::{ExternalQuad, ScreenPlane};
use crate::stereo::eye::{Eye, EyeOffset, StereoLayout};
use crate::stereo::pass::StereoPass;

/// World transform of the rig's owning entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OwnerConfig {
    /// World position.
    pub position: DVec3,
    /// World orientation.
    pub rotation: Rotator,
}

/// Screen plane relative to the owner.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Center, relative to the owner.
    pub position: DVec3,
    /// Orientation, relative to the owner.
    pub rotation: Rotator,
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            position: DVec3::new(100.0, 0.0, 0.0),
            rotation: Rotator::ZERO,
            width: 160.0,
            height: 90.0,
        }
    }
}

/// Eye source as written in JSON. Positions are world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EyeSourceConfig {
    /// Use the rig camera's position.
    #[default]
    SelfTransform,
    /// Use a tracked entity's position.
    TrackedEntity {
        /// Entity position.
        position: DVec3,
    },
    /// Use an explicit eye point and optionally an explicit quad.
    ExternalOverride {
        /// Eye position.
        eye: DVec3,
        /// Replacement screen corners.
        #[serde(default)]
        quad: Option<ExternalQuad>,
    },
}

impl From<EyeSourceConfig> for EyeSource {
    fn from(cfg: EyeSourceConfig) -> Self {
        match cfg {
            EyeSourceConfig::SelfTransform => Self::SelfTransform,
            EyeSourceConfig::TrackedEntity { position } => Self::TrackedEntity { position },
            EyeSourceConfig::ExternalOverride { eye, quad } => Self::ExternalOverride { eye, quad },
        }
    }
}

/// JSON description of one camera rig.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Owning entity transform.
    pub owner: OwnerConfig,
    /// Rig camera position relative to the owner.
    pub camera_position: DVec3,
    /// Screen plane; `null` leaves the rig without its own screen.
    pub screen: Option<ScreenConfig>,
    /// Eye source.
    pub eye_source: EyeSourceConfig,
    /// Near clip distance.
    pub near: f64,
    /// Far clip distance; `0` for an infinite far plane.
    pub far: f64,
    /// Inter-eye distance for a single-eye rig.
    pub eye_separation: f64,
    /// Eye this rig renders.
    pub eye: Eye,
    /// Use the off-axis projection.
    pub enabled: bool,
    /// Constrain the viewport to the screen's aspect ratio.
    pub match_viewport_aspect: bool,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            owner: OwnerConfig::default(),
            camera_position: DVec3::ZERO,
            screen: Some(ScreenConfig::default()),
            eye_source: EyeSourceConfig::SelfTransform,
            near: 20.0,
            far: 0.0,
            eye_separation: 0.0,
            eye: Eye::Center,
            enabled: true,
            match_viewport_aspect: true,
        }
    }
}

impl RigConfig {
    /// Parse a rig from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AsymResult<Self> {
        serde_json::from_reader(r).map_err(|e| AsymError::serde(format!("parse rig JSON: {e}")))
    }

    /// Parse a rig from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AsymResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AsymError::validation(format!("open rig JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Owner transform in world space.
    pub fn owner_transform(&self) -> RigidTransform {
        RigidTransform::new(self.owner.position, self.owner.rotation.to_quat())
    }

    /// Build the rig. Screen size, clip planes and separation are clamped.
    pub fn into_rig(self) -> CameraRig {
        let owner = self.owner_transform();
        let screen = self.screen.map(|s| {
            ScreenPlane::new(
                owner.transform_point(s.position),
                owner.transform_rotation(s.rotation.to_quat()),
                Size::new(s.width, s.height),
            )
        });

        let mut projection = OffAxisProjection::new(ProjectionParams::new(self.near, self.far));
        projection.enabled = self.enabled;
        projection.eye_offset = EyeOffset::new(self.eye_separation, self.eye);

        CameraRig {
            owner,
            camera_position: owner.transform_point(self.camera_position),
            screen,
            eye_source: self.eye_source.into(),
            projection,
            match_viewport_aspect: self.match_viewport_aspect,
        }
    }
}

/// JSON description of a stereo render job.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StereoJobConfig {
    /// Eye arrangement.
    pub layout: StereoLayout,
    /// Inter-eye distance.
    pub eye_separation: f64,
    /// Swap slot to eye mapping.
    pub swap_eyes: bool,
    /// Composite after rendering.
    pub auto_composite: bool,
    /// Frame rate of the rendered sequences.
    pub fps: Fps,
    /// Encoder settings.
    pub composite: CompositeSettings,
}

impl Default for StereoJobConfig {
    fn default() -> Self {
        let pass = StereoPass::default();
        Self {
            layout: pass.layout,
            eye_separation: pass.eye_separation,
            swap_eyes: pass.swap_eyes,
            auto_composite: pass.auto_composite,
            fps: Fps::default(),
            composite: pass.composite,
        }
    }
}

impl StereoJobConfig {
    /// Parse a job from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> AsymResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| AsymError::serde(format!("parse stereo job JSON: {e}")))?;
        Fps::new(cfg.fps.num, cfg.fps.den)?;
        Ok(cfg)
    }

    /// Parse a job from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> AsymResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AsymError::validation(format!("open stereo job JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the render pass. Separation and quality are clamped.
    pub fn into_pass(self) -> StereoPass {
        StereoPass::new(
            self.layout,
            self.eye_separation,
            self.swap_eyes,
            self.auto_composite,
            self.composite.sanitized(),
        )
    }

    /// The finished job writing into `output_dir`.
    pub fn job(&self, output_dir: impl Into<PathBuf>) -> StereoRenderJob {
        StereoRenderJob {
            output_dir: output_dir.into(),
            fps: self.fps,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rig/config.rs"]
mod tests;
