//! Off-axis (generalized perspective) projection.

/// Frustum extents and reversed-depth matrix construction.
pub mod frustum;
/// Per-camera calculator with previous-frame view history.
pub mod offaxis;
/// Near/far clip configuration.
pub mod params;
