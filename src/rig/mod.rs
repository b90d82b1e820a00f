//! Host-facing camera rig: eye source resolution, per-frame view setup and JSON configuration.

/// Camera rig and per-frame view setup.
pub mod camera;
/// JSON configuration for rigs and stereo render jobs.
pub mod config;
