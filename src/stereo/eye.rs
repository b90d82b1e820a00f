use std::str::FromStr;

use crate::foundation::core::DVec3;
use crate::foundation::error::AsymError;
use crate::foundation::math::SMALL_NUMBER;

/// File/camera name tag for the left eye.
pub const LEFT_EYE_TAG: &str = "LeftEye";
/// File/camera name tag for the right eye.
pub const RIGHT_EYE_TAG: &str = "RightEye";

/// Which eye a view is rendered for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eye {
    /// Left eye, offset toward screen-left.
    Left,
    /// No offset.
    #[default]
    Center,
    /// Right eye, offset toward screen-right.
    Right,
}

impl Eye {
    /// `-1` for left, `0` for center, `+1` for right.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Center => 0.0,
            Self::Right => 1.0,
        }
    }

    /// Camera/file tag for the eye, `None` for center.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::Left => Some(LEFT_EYE_TAG),
            Self::Center => None,
            Self::Right => Some(RIGHT_EYE_TAG),
        }
    }
}

/// How two eye images are arranged in the composited output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StereoLayout {
    /// Single view, no compositing.
    Mono,
    /// Left and right next to each other.
    #[default]
    SideBySide,
    /// Left above right.
    TopBottom,
}

impl StereoLayout {
    /// `true` for layouts that render two eyes.
    pub fn is_stereo(self) -> bool {
        !matches!(self, Self::Mono)
    }

    /// Short tag used in output file names.
    pub fn short_name(self) -> Option<&'static str> {
        match self {
            Self::Mono => None,
            Self::SideBySide => Some("SBS"),
            Self::TopBottom => Some("TB"),
        }
    }

    /// Encoder stacking filter for the layout.
    pub fn stack_filter(self) -> Option<&'static str> {
        match self {
            Self::Mono => None,
            Self::SideBySide => Some("hstack"),
            Self::TopBottom => Some("vstack"),
        }
    }
}

impl FromStr for StereoLayout {
    type Err = AsymError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mono" | "none" => Ok(Self::Mono),
            "sbs" | "side-by-side" | "side_by_side" => Ok(Self::SideBySide),
            "tb" | "top-bottom" | "top_bottom" => Ok(Self::TopBottom),
            other => Err(AsymError::validation(format!(
                "unknown stereo layout '{other}' (expected mono, sbs or tb)"
            ))),
        }
    }
}

/// Eye-point translation along the screen's right axis.
///
/// This one value drives both the rendered viewpoint and the frustum asymmetry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EyeOffset {
    separation: f64,
    /// Which eye the offset is for.
    pub eye: Eye,
}

impl EyeOffset {
    /// No offset.
    pub const CENTER: Self = Self {
        separation: 0.0,
        eye: Eye::Center,
    };

    /// Create an offset. Negative or NaN separation is treated as zero.
    pub fn new(separation: f64, eye: Eye) -> Self {
        Self {
            separation: if separation > 0.0 { separation } else { 0.0 },
            eye,
        }
    }

    /// Distance between the two eyes.
    pub fn separation(&self) -> f64 {
        self.separation
    }

    /// Signed distance along the right axis: `0.5 * sign * separation`.
    pub fn shift(&self) -> f64 {
        0.5 * self.eye.sign() * self.separation
    }

    /// `true` when applying the offset would move the eye.
    pub fn is_active(&self) -> bool {
        self.separation.abs() > SMALL_NUMBER && self.eye != Eye::Center
    }

    /// Translate `eye` along the unit `right` axis.
    pub fn apply(&self, eye: DVec3, right: DVec3) -> DVec3 {
        if self.is_active() {
            eye + right * self.shift()
        } else {
            eye
        }
    }
}

/// Stereo settings of a camera rig or render job.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StereoConfig {
    /// Inter-eye distance in world units; `0` disables the offset.
    pub eye_separation: f64,
    /// Eye rendered by a single-view rig.
    pub eye: Eye,
    /// Composite layout.
    pub layout: StereoLayout,
    /// Swap camera slot to eye mapping.
    pub swap_eyes: bool,
}

impl Default for StereoConfig {
    fn default() -> Self {
        Self {
            eye_separation: 0.0,
            eye: Eye::Center,
            layout: StereoLayout::Mono,
            swap_eyes: false,
        }
    }
}

impl StereoConfig {
    /// Offset for the configured eye.
    pub fn offset(&self) -> EyeOffset {
        EyeOffset::new(self.eye_separation, self.eye)
    }

    /// Offset for an arbitrary eye with this config's separation.
    pub fn offset_for(&self, eye: Eye) -> EyeOffset {
        EyeOffset::new(self.eye_separation, eye)
    }
}

/// Eye index (`0` = left, `1` = right) for a render-job camera slot.
///
/// Slots above 1 are treated as slot 1.
pub fn eye_index_for(camera_slot: usize, swap_eyes: bool) -> usize {
    let slot = camera_slot.min(1);
    if swap_eyes { 1 - slot } else { slot }
}

/// Eye rendered by a render-job camera slot. Never [`Eye::Center`].
pub fn eye_for_slot(camera_slot: usize, swap_eyes: bool) -> Eye {
    if eye_index_for(camera_slot, swap_eyes) == 0 {
        Eye::Left
    } else {
        Eye::Right
    }
}

/// Eye position for `eye`, translated from `base` along the unit `right` axis by half of the
/// configured separation.
pub fn for_eye(base: DVec3, eye: Eye, config: &StereoConfig, right: DVec3) -> DVec3 {
    config.offset_for(eye).apply(base, right)
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/eye.rs"]
mod tests;
