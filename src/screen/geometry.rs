use crate::foundation::core::{DMat3, DQuat, DVec3, RigidTransform, Size};

/// A flat rectangular projection surface described by position, orientation and size.
///
/// The screen lies in its local YZ plane with its normal along local +X: local +Y is the screen's
/// right edge direction and local +Z its up direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPlane {
    /// World-space center of the screen.
    pub position: DVec3,
    /// World-space orientation of the screen.
    pub rotation: DQuat,
    size: Size,
}

impl Default for ScreenPlane {
    fn default() -> Self {
        Self::new(
            DVec3::new(100.0, 0.0, 0.0),
            DQuat::IDENTITY,
            Size::new(160.0, 90.0),
        )
    }
}

impl ScreenPlane {
    /// Smallest accepted width/height, in world units.
    pub const MIN_EXTENT: f64 = 1.0;

    /// Create a screen. Width and height are clamped to [`ScreenPlane::MIN_EXTENT`].
    pub fn new(position: DVec3, rotation: DQuat, size: Size) -> Self {
        let mut s = Self {
            position,
            rotation,
            size: Size::ZERO,
        };
        s.set_size(size);
        s
    }

    /// Screen size as `(width, height)` in world units.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the screen size, clamping each extent to [`ScreenPlane::MIN_EXTENT`].
    pub fn set_size(&mut self, size: Size) {
        self.size = Size::new(
            size.width.max(Self::MIN_EXTENT),
            size.height.max(Self::MIN_EXTENT),
        );
    }

    /// The four corners in world space.
    pub fn corners_world(&self) -> ScreenCorners {
        let hw = self.size.width * 0.5;
        let hh = self.size.height * 0.5;
        let corner = |y: f64, z: f64| self.position + self.rotation * DVec3::new(0.0, y, z);
        ScreenCorners {
            bottom_left: corner(-hw, -hh),
            bottom_right: corner(hw, -hh),
            top_left: corner(-hw, hh),
            top_right: corner(hw, hh),
        }
    }

    /// The four corners in `owner`'s local space.
    pub fn corners_local(&self, owner: &RigidTransform) -> ScreenCorners {
        self.corners_world().to_local(owner)
    }
}

/// Screen corners, ordered bottom-left, bottom-right, top-left, top-right.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenCorners {
    /// Bottom-left corner.
    pub bottom_left: DVec3,
    /// Bottom-right corner.
    pub bottom_right: DVec3,
    /// Top-left corner.
    pub top_left: DVec3,
    /// Top-right corner.
    pub top_right: DVec3,
}

impl ScreenCorners {
    /// Create corners from explicit points.
    pub fn new(bottom_left: DVec3, bottom_right: DVec3, top_left: DVec3, top_right: DVec3) -> Self {
        Self {
            bottom_left,
            bottom_right,
            top_left,
            top_right,
        }
    }

    /// Apply `f` to every corner.
    pub fn map(self, f: impl Fn(DVec3) -> DVec3) -> Self {
        Self {
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
            top_left: f(self.top_left),
            top_right: f(self.top_right),
        }
    }

    /// Re-express world-space corners in `owner`'s local space.
    pub fn to_local(self, owner: &RigidTransform) -> Self {
        self.map(|p| owner.inverse_transform_point(p))
    }

    /// Average of the four corners.
    pub fn center(&self) -> DVec3 {
        (self.bottom_left + self.bottom_right + self.top_left + self.top_right) * 0.25
    }

    /// Edge lengths measured along the bottom and left edges.
    pub fn size(&self) -> Size {
        Size::new(
            (self.bottom_right - self.bottom_left).length(),
            (self.top_left - self.bottom_left).length(),
        )
    }

    /// Unit right (`BR - BL`) and up (`TL - BL`) edge directions. Degenerate edges yield zero.
    pub fn edge_directions(&self) -> (DVec3, DVec3) {
        (
            (self.bottom_right - self.bottom_left).normalize_or_zero(),
            (self.top_left - self.bottom_left).normalize_or_zero(),
        )
    }

    /// Orientation whose local axes map onto the quad: +X to `cross(right, up)`, +Y to right,
    /// +Z to up. Falls back to identity for zero-area quads.
    pub fn orientation(&self) -> DQuat {
        let (right, up) = self.edge_directions();
        let forward = right.cross(up).normalize_or_zero();
        if forward == DVec3::ZERO {
            return DQuat::IDENTITY;
        }
        // Re-derive up so the basis is orthonormal even for skewed quads.
        let up = forward.cross(right);
        DQuat::from_mat3(&DMat3::from_cols(forward, right, up)).normalize()
    }
}

/// Screen corners supplied directly by an external authoring tool instead of a [`ScreenPlane`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExternalQuad {
    /// Literal corner points, world space.
    pub corners: ScreenCorners,
    /// World positions of four designated reference entities. When present they replace
    /// [`ExternalQuad::corners`].
    #[serde(default)]
    pub references: Option<ScreenCorners>,
}

impl ExternalQuad {
    /// Quad from literal points.
    pub fn from_corners(corners: ScreenCorners) -> Self {
        Self {
            corners,
            references: None,
        }
    }

    /// Corners in effect: reference entity positions if present, literal points otherwise.
    pub fn resolved(&self) -> ScreenCorners {
        self.references.unwrap_or(self.corners)
    }
}

/// Where a rig's screen geometry comes from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScreenSource {
    /// Screen described by position/orientation/size.
    Plane(ScreenPlane),
    /// Four corners supplied externally; orientation is derived from them.
    Quad(ExternalQuad),
}

impl ScreenSource {
    /// Physical screen size used for aspect-ratio matching.
    pub fn size(&self) -> Size {
        match self {
            Self::Plane(p) => p.size(),
            Self::Quad(q) => q.resolved().size(),
        }
    }
}

/// Resolve a screen's four world-space corners.
pub fn resolve_corners(source: &ScreenSource) -> ScreenCorners {
    match source {
        ScreenSource::Plane(plane) => plane.corners_world(),
        ScreenSource::Quad(quad) => quad.resolved(),
    }
}

/// World-space screen orientation: the plane's own rotation, or the rotation derived from an
/// external quad's corners.
pub fn screen_orientation(source: &ScreenSource) -> DQuat {
    match source {
        ScreenSource::Plane(plane) => plane.rotation,
        ScreenSource::Quad(quad) => quad.resolved().orientation(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/screen/geometry.rs"]
mod tests;
