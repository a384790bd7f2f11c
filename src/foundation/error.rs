/// Convenience result type used across layerblend.
pub type BlendResult<T> = Result<T, BlendError>;

/// Top-level error taxonomy used by compositing APIs.
#[derive(thiserror::Error, Debug)]
pub enum BlendError {
    /// A mode name outside the recognized set was requested.
    #[error("invalid blend mode: {0}")]
    InvalidBlendMode(String),

    /// Malformed buffers, dimensions or placement data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The native rendering backend failed or could not be reached.
    #[error("backend error: {0}")]
    Backend(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlendError {
    /// Build a [`BlendError::InvalidBlendMode`] value.
    pub fn invalid_mode(name: impl Into<String>) -> Self {
        Self::InvalidBlendMode(name.into())
    }

    /// Build a [`BlendError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BlendError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`BlendError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
