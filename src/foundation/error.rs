/// Convenience result type used across asymcam.
pub type AsymResult<T> = Result<T, AsymError>;

/// Top-level error taxonomy.
///
/// Geometry never produces errors: degenerate screens, clip planes and eye placements are clamped
/// locally. Errors only come out of configuration loading and the composite pipeline.
#[derive(thiserror::Error, Debug)]
pub enum AsymError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Stereo composite failures (no frames, bad naming, encoder launch or exit).
    #[error("composite error: {0}")]
    Composite(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AsymError {
    /// Build a [`AsymError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`AsymError::Composite`] value.
    pub fn composite(msg: impl Into<String>) -> Self {
        Self::Composite(msg.into())
    }

    /// Build a [`AsymError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
