//! Stereo composite: merge per-eye frame sequences into one video with an external encoder.

/// Encoder settings, resolution and command construction.
pub mod encoder;
/// Process and filesystem seams.
pub mod host;
/// Frame-sequence naming pattern inference.
pub mod pattern;
/// The polled composite state machine.
pub mod pipeline;
