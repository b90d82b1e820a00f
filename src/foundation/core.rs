use crate::foundation::error::{AsymError, AsymResult};

pub use glam::{DMat3, DMat4, DQuat, DVec3, DVec4};
pub use kurbo::Size;

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated frame rate.
    pub fn new(num: u32, den: u32) -> AsymResult<Self> {
        if den == 0 {
            return Err(AsymError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(AsymError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as a floating point value.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Rate formatted for encoder command lines (`24` or `30000/1001`).
    pub fn to_rate_arg(self) -> String {
        if self.den == 1 {
            self.num.to_string()
        } else {
            format!("{}/{}", self.num, self.den)
        }
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 24, den: 1 }
    }
}

/// Euler rotation in degrees.
///
/// Axes are +X forward, +Y right, +Z up. Positive yaw turns forward toward right, positive pitch
/// tilts forward toward up, positive roll tilts right toward up. Applied roll first, then pitch,
/// then yaw.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Rotator {
    /// Rotation about the right axis, in degrees.
    pub pitch: f64,
    /// Rotation about the up axis, in degrees.
    pub yaw: f64,
    /// Rotation about the forward axis, in degrees.
    pub roll: f64,
}

impl Rotator {
    /// No rotation.
    pub const ZERO: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
        roll: 0.0,
    };

    /// Create a rotator from degrees.
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Convert to a unit quaternion.
    pub fn to_quat(self) -> DQuat {
        DQuat::from_euler(
            glam::EulerRot::ZYX,
            self.yaw.to_radians(),
            (-self.pitch).to_radians(),
            self.roll.to_radians(),
        )
    }

    /// Recover degrees from a quaternion built with [`Rotator::to_quat`].
    pub fn from_quat(q: DQuat) -> Self {
        let (yaw, neg_pitch, roll) = q.to_euler(glam::EulerRot::ZYX);
        Self {
            pitch: -neg_pitch.to_degrees(),
            yaw: yaw.to_degrees(),
            roll: roll.to_degrees(),
        }
    }
}

/// Position + rotation of an entity in world space. Scale is not modelled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    /// World-space position.
    pub translation: DVec3,
    /// World-space orientation.
    pub rotation: DQuat,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl RigidTransform {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        translation: DVec3::ZERO,
        rotation: DQuat::IDENTITY,
    };

    /// Create a transform from a position and rotation.
    pub fn new(translation: DVec3, rotation: DQuat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Local point to world.
    pub fn transform_point(&self, p: DVec3) -> DVec3 {
        self.translation + self.rotation * p
    }

    /// World point to local.
    pub fn inverse_transform_point(&self, p: DVec3) -> DVec3 {
        self.rotation.inverse() * (p - self.translation)
    }

    /// Local rotation to world.
    pub fn transform_rotation(&self, q: DQuat) -> DQuat {
        self.rotation * q
    }

    /// World rotation to local.
    pub fn inverse_transform_rotation(&self, q: DQuat) -> DQuat {
        self.rotation.inverse() * q
    }
}

/// Integer pixel rectangle `[min, max)` of a render target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ViewRect {
    /// Inclusive left edge.
    pub min_x: i32,
    /// Inclusive top edge.
    pub min_y: i32,
    /// Exclusive right edge.
    pub max_x: i32,
    /// Exclusive bottom edge.
    pub max_y: i32,
}

impl ViewRect {
    /// Create a rect from its corner coordinates.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Rect at the origin with the given size.
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels (may be negative for malformed rects).
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Height in pixels (may be negative for malformed rects).
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// `true` when the rect covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// `true` when `other` lies fully inside `self`.
    pub fn contains_rect(&self, other: &ViewRect) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
