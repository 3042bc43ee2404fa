//! Error types for stateful icon bindings.

use horizon_iconfont::IconError;

/// Result type alias for binding operations.
pub type StyleResult<T> = std::result::Result<T, StyleError>;

/// Errors that can occur while building rules or binding icons.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// A state selector could not be parsed.
    #[error("invalid state spec '{spec}': {message}")]
    InvalidStateSpec { spec: String, message: String },

    /// Rendering the bound icon failed.
    #[error(transparent)]
    Icon(#[from] IconError),
}

impl StyleError {
    /// Create a state spec error.
    pub fn invalid_state_spec(spec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStateSpec {
            spec: spec.into(),
            message: message.into(),
        }
    }
}
