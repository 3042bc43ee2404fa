//! Font asset persistence.
//!
//! Font bytes handed over by a provider are written to a temporary file once
//! per icon set and the path is reused for the life of the cache. Files are
//! removed by [`FontAssetCache::cleanup`], or when the cache is dropped.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

use crate::error::{IconError, IconResult};
use crate::logging::targets;

/// Prefix for persisted font file names.
pub const TEMP_FILE_PREFIX: &str = "horizon-iconfont-";

/// Identifies one `(provider, style)` icon set.
///
/// Displays as `provider:style`, with `default` standing in for a missing
/// style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IconSetId {
    provider: String,
    style: Option<String>,
}

impl IconSetId {
    /// Create an id.
    pub fn new(provider: impl Into<String>, style: Option<&str>) -> Self {
        Self {
            provider: provider.into(),
            style: style.map(str::to_string),
        }
    }

    /// The provider name.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// The style, if any.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }
}

impl fmt::Display for IconSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.provider,
            self.style.as_deref().unwrap_or("default")
        )
    }
}

/// Font container format, sniffed from the first four bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFormat {
    /// TrueType outlines (`.ttf`).
    TrueType,
    /// CFF outlines in an OpenType wrapper (`.otf`).
    OpenType,
}

impl FontFormat {
    /// Detect the format; anything without the `OTTO` signature is TrueType.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"OTTO") {
            Self::OpenType
        } else {
            Self::TrueType
        }
    }

    /// File suffix including the dot.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::TrueType => ".ttf",
            Self::OpenType => ".otf",
        }
    }
}

/// Persisted font files keyed by icon set.
#[derive(Default)]
pub struct FontAssetCache {
    files: HashMap<IconSetId, TempPath>,
    writes: usize,
}

impl FontAssetCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the persisted font for `id`, if already written.
    pub fn path(&self, id: &IconSetId) -> Option<&Path> {
        self.files.get(id).map(|path| &**path)
    }

    /// Persist font bytes for `id`, returning the file path.
    ///
    /// Bytes are written at most once per id. A cached file that has since
    /// disappeared from disk is written again.
    pub fn persist(&mut self, id: &IconSetId, font: &[u8]) -> IconResult<PathBuf> {
        if let Some(existing) = self.files.get(id) {
            if existing.exists() {
                return Ok(existing.to_path_buf());
            }
            tracing::warn!(
                target: targets::ASSETS,
                icon_set = %id,
                path = %existing.display(),
                "persisted font vanished, writing it again"
            );
        }

        let format = FontFormat::sniff(font);
        let mut file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .suffix(format.suffix())
            .tempfile()
            .map_err(|source| IconError::Persist { source })?;
        file.write_all(font)
            .and_then(|()| file.flush())
            .map_err(|source| IconError::Persist { source })?;

        let temp_path = file.into_temp_path();
        let path = temp_path.to_path_buf();
        self.writes += 1;
        tracing::debug!(
            target: targets::ASSETS,
            icon_set = %id,
            path = %path.display(),
            ?format,
            bytes = font.len(),
            "persisted font"
        );
        self.files.insert(id.clone(), temp_path);
        Ok(path)
    }

    /// Number of font files written since creation.
    pub fn persisted_count(&self) -> usize {
        self.writes
    }

    /// Number of font files currently held.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no font files are held.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Delete every persisted font file.
    ///
    /// All files are attempted; the first failure is returned. Files that are
    /// already gone count as removed. Calling this on an empty cache is a no-op.
    pub fn cleanup(&mut self) -> IconResult<()> {
        let mut first_error = None;
        for (id, temp_path) in self.files.drain() {
            let path = temp_path.to_path_buf();
            match temp_path.close() {
                Ok(()) => {
                    tracing::debug!(
                        target: targets::ASSETS,
                        icon_set = %id,
                        path = %path.display(),
                        "removed font file"
                    );
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    tracing::warn!(
                        target: targets::ASSETS,
                        icon_set = %id,
                        path = %path.display(),
                        error = %source,
                        "failed to remove font file"
                    );
                    first_error.get_or_insert(IconError::Cleanup { path, source });
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl fmt::Debug for FontAssetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontAssetCache")
            .field("files", &self.files.len())
            .field("writes", &self.writes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display() {
        assert_eq!(IconSetId::new("fluent", Some("filled")).to_string(), "fluent:filled");
        assert_eq!(IconSetId::new("bootstrap", None).to_string(), "bootstrap:default");
    }

    #[test]
    fn sniff_format() {
        assert_eq!(FontFormat::sniff(b"OTTO\0\x01"), FontFormat::OpenType);
        assert_eq!(FontFormat::sniff(b"\0\x01\0\0"), FontFormat::TrueType);
        assert_eq!(FontFormat::sniff(b""), FontFormat::TrueType);
    }

    #[test]
    fn persists_once_per_id() {
        let mut cache = FontAssetCache::new();
        let id = IconSetId::new("demo", None);

        let first = cache.persist(&id, b"\0\x01\0\0font").unwrap();
        let second = cache.persist(&id, b"\0\x01\0\0font").unwrap();

        assert_eq!(first, second);
        assert_eq!(cache.persisted_count(), 1);
        assert_eq!(std::fs::read(&first).unwrap(), b"\0\x01\0\0font");
        assert!(first.extension().is_some_and(|ext| ext == "ttf"));
        assert!(first
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(TEMP_FILE_PREFIX)));
    }

    #[test]
    fn opentype_suffix() {
        let mut cache = FontAssetCache::new();
        let path = cache.persist(&IconSetId::new("otf", None), b"OTTOdata").unwrap();
        assert!(path.extension().is_some_and(|ext| ext == "otf"));
    }

    #[test]
    fn rewrites_vanished_file() {
        let mut cache = FontAssetCache::new();
        let id = IconSetId::new("demo", None);
        let first = cache.persist(&id, b"font").unwrap();
        std::fs::remove_file(&first).unwrap();

        let second = cache.persist(&id, b"font").unwrap();
        assert!(second.exists());
        assert_eq!(cache.persisted_count(), 2);
    }

    #[test]
    fn cleanup_removes_files_and_is_idempotent() {
        let mut cache = FontAssetCache::new();
        let a = cache.persist(&IconSetId::new("a", None), b"a").unwrap();
        let b = cache.persist(&IconSetId::new("b", Some("x")), b"b").unwrap();
        std::fs::remove_file(&b).unwrap();

        cache.cleanup().unwrap();
        assert!(!a.exists());
        assert!(cache.is_empty());
        cache.cleanup().unwrap();
    }
}
