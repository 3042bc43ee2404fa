//! Error types for icon families and asset tooling.

use std::path::PathBuf;

use horizon_iconfont::IconError;
use thiserror::Error;

/// Errors raised while resolving family names or building glyph maps.
#[derive(Error, Debug)]
pub enum FamilyError {
    /// The icon name carries a style suffix that contradicts the requested style.
    #[error("icon name '{name}' conflicts with requested style '{style}'")]
    StyleConflict { name: String, style: String },

    /// A codepoint in icon metadata could not be parsed.
    #[error("invalid codepoint '{value}'")]
    InvalidCodepoint { value: String },

    /// Metadata or a font yielded no usable glyphs.
    #[error("no glyphs found in {source_name}")]
    NoGlyphs { source_name: String },

    /// Metadata JSON has an unsupported shape.
    #[error("unsupported metadata: {message}")]
    UnsupportedMetadata { message: String },

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing a tooling file failed.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from the rendering core.
    #[error(transparent)]
    Icon(#[from] IconError),
}

impl FamilyError {
    /// Create a style conflict error.
    pub fn style_conflict(name: impl Into<String>, style: impl Into<String>) -> Self {
        Self::StyleConflict {
            name: name.into(),
            style: style.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for family operations.
pub type FamilyResult<T> = Result<T, FamilyError>;
