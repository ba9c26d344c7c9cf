/// Convenience result alias used across the crate.
pub type OrbResult<T> = Result<T, OrbError>;

/// Top-level error type for configuration, surface setup and frame output.
///
/// Per-frame conditions (missing surface, degenerate normals) are not errors; they are reported
/// as [`crate::SkipReason`] values so an animated background can never fail its host.
#[derive(thiserror::Error, Debug)]
pub enum OrbError {
    /// Invalid caller-provided value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or inconsistent configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Drawing surface setup or readback failure.
    #[error("render error: {0}")]
    Render(String),

    /// (De)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, with source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrbError {
    /// Build an [`OrbError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OrbError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build an [`OrbError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`OrbError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
