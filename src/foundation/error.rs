/// Convenience result type used across constellate.
pub type ConstellateResult<T> = Result<T, ConstellateError>;

/// Top-level error taxonomy used by library APIs.
///
/// Degenerate user input (empty phrases, triggers before fonts are ready) is not an error; those
/// paths degrade to "nothing happens". Errors are reserved for IO, fonts, rasterization and
/// encoding failures.
#[derive(thiserror::Error, Debug)]
pub enum ConstellateError {
    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Font loading, shaping or glyph lookup failed.
    #[error("font error: {0}")]
    Font(String),

    /// Rasterization or surface errors.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink or encoder errors.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConstellateError {
    /// Build a [`ConstellateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ConstellateError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`ConstellateError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ConstellateError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ConstellateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
