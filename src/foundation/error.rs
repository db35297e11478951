/// Result alias used across the crate.
pub type TileResult<T> = Result<T, TileError>;

/// Errors raised by composition, capture, encoding and storage.
#[derive(thiserror::Error, Debug)]
pub enum TileError {
    /// The visual tree has not been mounted yet, so there is nothing to capture.
    #[error("capture unavailable: the visual tree is not mounted")]
    CaptureUnavailable,

    /// An image, vector or video encoder rejected its input.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A persistence read or write failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Invalid input (configuration, frame geometry, arguments).
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other failure, usually IO with attached context.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TileError {
    /// Build an [`TileError::Encoding`].
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Build a [`TileError::Storage`].
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Build a [`TileError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TileError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for failures raised while capturing or encoding an export.
    pub fn is_export_failure(&self) -> bool {
        matches!(self, Self::CaptureUnavailable | Self::Encoding(_))
    }
}

impl From<serde_json::Error> for TileError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
