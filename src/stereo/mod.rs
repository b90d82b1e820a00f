//! Stereo eye handling and the two-camera render pass helper.

/// Eye signs, offsets, layouts and slot mapping.
pub mod eye;
/// Per-slot camera views for a stereo render job.
pub mod pass;
