//! Generalized perspective projection: screen basis, near-plane extents, and the
//! reversed-depth off-center matrix.
//!
//! Matrices use column-vector convention (`clip = P * v`) with view space x right, y up,
//! z forward.

use crate::foundation::core::{DMat4, DVec3, DVec4};
use crate::foundation::math::{SMALL_NUMBER, non_zero};
use crate::projection::params::{ProjectionParams, is_infinite_far};
use crate::screen::geometry::ScreenCorners;

/// Smallest eye-to-screen-plane distance used for projection, in world units.
pub const MIN_SCREEN_DISTANCE: f64 = 10.0;

/// Depth-axis flip applied after the standard projection: `z' = w - z`.
///
/// Maps near to depth 1 and far to depth 0.
pub const REVERSED_Z_FLIP: DMat4 = DMat4::from_cols(
    DVec4::new(1.0, 0.0, 0.0, 0.0),
    DVec4::new(0.0, 1.0, 0.0, 0.0),
    DVec4::new(0.0, 0.0, -1.0, 0.0),
    DVec4::new(0.0, 0.0, 1.0, 1.0),
);

/// Orthonormal basis of a screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenBasis {
    /// Unit vector along the bottom edge (`BR - BL`).
    pub right: DVec3,
    /// Unit vector along the left edge (`TL - BL`).
    pub up: DVec3,
    /// `-normalize(cross(right, up))`, pointing from the screen back toward the viewer.
    pub normal: DVec3,
}

impl ScreenBasis {
    /// Build the basis from screen corners.
    pub fn from_corners(corners: &ScreenCorners) -> Self {
        let (right, up) = corners.edge_directions();
        let normal = -right.cross(up).normalize_or_zero();
        Self { right, up, normal }
    }
}

/// Off-center frustum parameters on the near plane.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrustumExtents {
    /// Left extent at the near plane.
    pub left: f64,
    /// Right extent at the near plane.
    pub right: f64,
    /// Bottom extent at the near plane.
    pub bottom: f64,
    /// Top extent at the near plane.
    pub top: f64,
    /// Near clip distance the extents were projected onto.
    pub near: f64,
    /// Eye-to-screen-plane distance after clamping.
    pub distance: f64,
}

/// Project the screen rectangle, seen from `eye`, onto the near plane.
///
/// `eye` and `corners` must share a reference frame. Distances below
/// [`MIN_SCREEN_DISTANCE`] in magnitude are replaced by it.
pub fn frustum_extents(eye: DVec3, corners: &ScreenCorners, near: f64) -> FrustumExtents {
    let basis = ScreenBasis::from_corners(corners);

    let va = corners.bottom_left - eye;
    let vb = corners.bottom_right - eye;
    let vc = corners.top_left - eye;

    let distance = -va.dot(basis.normal);
    let distance = if distance.abs() < MIN_SCREEN_DISTANCE {
        MIN_SCREEN_DISTANCE
    } else {
        distance
    };

    let scale = near / distance;
    FrustumExtents {
        left: basis.right.dot(va) * scale,
        right: basis.right.dot(vb) * scale,
        bottom: basis.up.dot(va) * scale,
        top: basis.up.dot(vc) * scale,
        near,
        distance,
    }
}

/// Build the reversed-depth off-center perspective matrix for `extents`.
///
/// `far <= 0` or `far ≈ near` selects an infinite far plane whose depth mapping stops just short
/// of the limiting values.
pub fn off_center_projection(extents: &FrustumExtents, far: f64) -> DMat4 {
    let near = extents.near;
    let width = non_zero(extents.right - extents.left, SMALL_NUMBER);
    let height = non_zero(extents.top - extents.bottom, SMALL_NUMBER);

    let mx = 2.0 * near / width;
    let my = 2.0 * near / height;
    let ma = -(extents.right + extents.left) / width;
    let mb = -(extents.top + extents.bottom) / height;

    let (mc, md) = if is_infinite_far(near, far) {
        (1.0 - SMALL_NUMBER, -near * (1.0 - SMALL_NUMBER))
    } else {
        (far / (far - near), -(far * near) / (far - near))
    };

    let standard = DMat4::from_cols(
        DVec4::new(mx, 0.0, 0.0, 0.0),
        DVec4::new(0.0, my, 0.0, 0.0),
        DVec4::new(ma, mb, mc, 1.0),
        DVec4::new(0.0, 0.0, md, 0.0),
    );

    REVERSED_Z_FLIP * standard
}

/// Frustum extents and projection matrix for `eye` looking at `corners`.
pub fn project(
    eye: DVec3,
    corners: &ScreenCorners,
    params: &ProjectionParams,
) -> (FrustumExtents, DMat4) {
    let extents = frustum_extents(eye, corners, params.near());
    let matrix = off_center_projection(&extents, params.far());
    (extents, matrix)
}

#[cfg(test)]
#[path = "../../tests/unit/projection/frustum.rs"]
mod tests;
