//! Error types for the icon font crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while activating icon sets or rendering icons.
///
/// Unknown glyph names and malformed glyph map entries are deliberately not
/// represented here: both degrade to a transparent icon or a skipped entry.
#[derive(Error, Debug)]
pub enum IconError {
    /// An icon was requested before any icon set was activated.
    #[error("icon provider not initialized; activate an icon set before creating icons")]
    NotInitialized,

    /// The provider's font file does not exist.
    #[error("font not found for provider '{provider}': {}", .path.display())]
    FontNotFound { provider: String, path: PathBuf },

    /// A font or glyph map resource exists but could not be read.
    #[error("failed to read icon asset '{}': {source}", .path.display())]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The requested style is not declared by the provider.
    #[error("style '{style}' not found for provider '{provider}' (available: {})", .available.join(", "))]
    UnknownStyle {
        provider: String,
        style: String,
        available: Vec<String>,
    },

    /// The glyph map is not valid JSON or has an unsupported shape.
    #[error("invalid glyph map: {message}")]
    InvalidGlyphMap { message: String },

    /// The font bytes could not be parsed.
    #[error("failed to parse font '{}': {message}", .path.display())]
    FontParse { path: PathBuf, message: String },

    /// The color string is not understood.
    #[error("invalid color '{color}'")]
    InvalidColor { color: String },

    /// Writing the font to its persistent location failed.
    #[error("failed to persist font file: {source}")]
    Persist {
        #[source]
        source: std::io::Error,
    },

    /// Removing a persisted font file failed during cleanup.
    #[error("failed to remove font file '{}': {source}", .path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IconError {
    /// Create a glyph map error.
    pub fn invalid_glyph_map(message: impl Into<String>) -> Self {
        Self::InvalidGlyphMap {
            message: message.into(),
        }
    }

    /// Create a font-not-found error.
    pub fn font_not_found(provider: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::FontNotFound {
            provider: provider.into(),
            path: path.into(),
        }
    }

    /// Create an unreadable-asset error.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::AssetUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Map an I/O error on a provider asset to the matching variant.
    ///
    /// A missing file becomes [`IconError::FontNotFound`]; anything else is
    /// reported as unreadable.
    pub fn from_asset_io(
        provider: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::font_not_found(provider, path)
        } else {
            Self::unreadable(path, source)
        }
    }
}

/// Result type for icon operations.
pub type IconResult<T> = Result<T, IconError>;
