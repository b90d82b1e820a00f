//! Screen description and corner resolution.

/// Plane/quad screen geometry.
pub mod geometry;
