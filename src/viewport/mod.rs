//! Render-target aspect-ratio correction.

/// Pillarbox/letterbox sub-rectangle computation.
pub mod aspect;
