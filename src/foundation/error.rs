/// Crate-wide result alias.
pub type KinetypeResult<T> = Result<T, KinetypeError>;

/// Errors surfaced by rendering, layout, font resolution and export.
#[derive(thiserror::Error, Debug)]
pub enum KinetypeError {
    /// Invalid style parameters or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// No usable font face, or the face could not be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// The drawing surface could not be created or read back.
    #[error("render error: {0}")]
    Render(String),

    /// Quantization or container encoding failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other failure, with context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KinetypeError {
    /// Build a [`KinetypeError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KinetypeError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`KinetypeError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`KinetypeError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
