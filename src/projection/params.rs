use crate::foundation::math::{KINDA_SMALL_NUMBER, is_nearly_equal};

/// Near/far clip distances for an off-axis projection.
///
/// `far == 0` selects an infinite far plane.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProjectionParams {
    near: f64,
    far: f64,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::new(20.0, 0.0)
    }
}

impl ProjectionParams {
    /// Smallest accepted near clip distance.
    pub const MIN_NEAR: f64 = 0.01;
    /// Amount a finite far plane is pushed beyond near when configured at or below it.
    pub const FAR_NUDGE: f64 = 100.0;

    /// Create clip params, correcting invalid values instead of rejecting them.
    ///
    /// - `near <= 0` (or NaN) becomes [`ProjectionParams::MIN_NEAR`].
    /// - negative (or NaN) `far` becomes `0` (infinite).
    /// - `0 < far <= near` becomes `near + FAR_NUDGE`.
    pub fn new(near: f64, far: f64) -> Self {
        let near = if near > 0.0 {
            near.max(Self::MIN_NEAR)
        } else {
            Self::MIN_NEAR
        };
        let mut far = if far > 0.0 { far } else { 0.0 };
        if far > 0.0 && far <= near {
            far = near + Self::FAR_NUDGE;
        }
        Self { near, far }
    }

    /// Near clip distance.
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Far clip distance (`0` = infinite).
    pub fn far(&self) -> f64 {
        self.far
    }

    /// `true` when the far plane is treated as infinitely distant.
    pub fn is_infinite_far(&self) -> bool {
        is_infinite_far(self.near, self.far)
    }
}

pub(crate) fn is_infinite_far(near: f64, far: f64) -> bool {
    far <= 0.0 || is_nearly_equal(near, far, KINDA_SMALL_NUMBER)
}

#[cfg(test)]
#[path = "../../tests/unit/projection/params.rs"]
mod tests;
