//! Font providers backed by directories and embedded resources.
//!
//! Each provider reads a font file and a glyph map. Multi-style sets keep one
//! font per style and may ship a style-specific `glyphmap-<style>.json` next
//! to the shared `glyphmap.json`; the specific one is preferred.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use horizon_iconfont::{FontAssets, FontProvider, IconError, IconResult, RenderConfig};
use include_dir::Dir;

use crate::logging::targets;

/// Default glyph map file name.
pub const GLYPH_MAP_FILE: &str = "glyphmap.json";

/// File name of the glyph map specific to `style`.
pub fn style_glyph_map_file(style: &str) -> String {
    format!("glyphmap-{style}.json")
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
}

fn unknown_style(provider: &str, style: &str, available: Vec<String>) -> IconError {
    IconError::UnknownStyle {
        provider: provider.to_string(),
        style: style.to_string(),
        available,
    }
}

// ============================================================================
// Directory provider
// ============================================================================

/// A single-style icon set stored in a directory.
///
/// The font is the explicitly configured file, or else the first `.ttf` or
/// `.otf` file in the directory by name.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    name: String,
    root: PathBuf,
    font: Option<PathBuf>,
    glyph_map: PathBuf,
    render_config: RenderConfig,
}

impl DirectoryProvider {
    /// Serve the icon set in `root`.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            font: None,
            glyph_map: PathBuf::from(GLYPH_MAP_FILE),
            render_config: RenderConfig::default(),
        }
    }

    /// Use a specific font file, relative to the root.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<PathBuf>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Use a glyph map file other than `glyphmap.json`, relative to the root.
    #[must_use]
    pub fn with_glyph_map(mut self, glyph_map: impl Into<PathBuf>) -> Self {
        self.glyph_map = glyph_map.into();
        self
    }

    /// Set the render configuration.
    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    /// The directory this provider reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the font file.
    pub fn font_path(&self) -> IconResult<PathBuf> {
        if let Some(font) = &self.font {
            return Ok(self.root.join(font));
        }
        let entries = fs::read_dir(&self.root)
            .map_err(|e| IconError::from_asset_io(&self.name, &self.root, e))?;
        let mut fonts: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && is_font_file(path))
            .collect();
        fonts.sort();
        fonts
            .into_iter()
            .next()
            .ok_or_else(|| IconError::font_not_found(&self.name, &self.root))
    }
}

impl FontProvider for DirectoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_assets(&self, _style: Option<&str>) -> IconResult<FontAssets> {
        let font_path = self.font_path()?;
        let font = fs::read(&font_path)
            .map_err(|e| IconError::from_asset_io(&self.name, &font_path, e))?;

        let map_path = self.root.join(&self.glyph_map);
        let glyph_map =
            fs::read_to_string(&map_path).map_err(|e| IconError::unreadable(&map_path, e))?;

        tracing::debug!(
            target: targets::PROVIDER,
            provider = %self.name,
            font = %font_path.display(),
            glyph_map = %map_path.display(),
            "loaded directory assets"
        );
        Ok(FontAssets::new(font, glyph_map))
    }

    fn render_config(&self) -> RenderConfig {
        self.render_config
    }
}

// ============================================================================
// Multi-style provider
// ============================================================================

/// An icon set with one font file per style, stored in a directory.
///
/// Only styles whose font file exists are listed. The configured default
/// style is used when available, otherwise the first listed style.
#[derive(Debug, Clone)]
pub struct MultiStyleProvider {
    name: String,
    root: PathBuf,
    styles: BTreeMap<String, PathBuf>,
    default_style: Option<String>,
    glyph_map: String,
    render_config: RenderConfig,
}

impl MultiStyleProvider {
    /// Create a provider with no styles.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            styles: BTreeMap::new(),
            default_style: None,
            glyph_map: GLYPH_MAP_FILE.to_string(),
            render_config: RenderConfig::default(),
        }
    }

    /// Map a style to its font file, relative to the root.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>, font: impl Into<PathBuf>) -> Self {
        self.styles.insert(style.into(), font.into());
        self
    }

    /// Set the preferred default style.
    #[must_use]
    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    /// Use a shared glyph map file other than `glyphmap.json`.
    #[must_use]
    pub fn with_glyph_map(mut self, glyph_map: impl Into<String>) -> Self {
        self.glyph_map = glyph_map.into();
        self
    }

    /// Set the render configuration.
    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    fn glyph_map_path(&self, style: &str) -> PathBuf {
        let specific = self.root.join(style_glyph_map_file(style));
        if specific.is_file() {
            specific
        } else {
            self.root.join(&self.glyph_map)
        }
    }
}

impl FontProvider for MultiStyleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_assets(&self, style: Option<&str>) -> IconResult<FontAssets> {
        let chosen = match style {
            Some(style) => style.to_string(),
            None => self
                .default_style()
                .ok_or_else(|| IconError::font_not_found(&self.name, &self.root))?,
        };
        let font_rel = self
            .styles
            .get(&chosen)
            .ok_or_else(|| unknown_style(&self.name, &chosen, self.list_styles()))?;

        let font_path = self.root.join(font_rel);
        let font = fs::read(&font_path)
            .map_err(|e| IconError::from_asset_io(&self.name, &font_path, e))?;

        let map_path = self.glyph_map_path(&chosen);
        let glyph_map =
            fs::read_to_string(&map_path).map_err(|e| IconError::unreadable(&map_path, e))?;

        tracing::debug!(
            target: targets::PROVIDER,
            provider = %self.name,
            style = %chosen,
            font = %font_path.display(),
            glyph_map = %map_path.display(),
            "loaded style assets"
        );
        Ok(FontAssets::new(font, glyph_map))
    }

    fn list_styles(&self) -> Vec<String> {
        self.styles
            .iter()
            .filter(|(_, font)| self.root.join(font).is_file())
            .map(|(style, _)| style.clone())
            .collect()
    }

    fn default_style(&self) -> Option<String> {
        let styles = self.list_styles();
        match &self.default_style {
            Some(preferred) if styles.contains(preferred) => Some(preferred.clone()),
            _ => styles.into_iter().next(),
        }
    }

    fn render_config(&self) -> RenderConfig {
        self.render_config
    }
}

// ============================================================================
// Embedded provider
// ============================================================================

/// An icon set compiled into the binary with `include_dir!`.
///
/// Assets are served straight from the embedded data without copying.
///
/// ```ignore
/// use include_dir::{include_dir, Dir};
/// use horizon_iconfont_families::EmbeddedProvider;
///
/// static BOOTSTRAP: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/bootstrap");
///
/// let provider = EmbeddedProvider::new("bootstrap", &BOOTSTRAP);
/// ```
#[derive(Clone)]
pub struct EmbeddedProvider {
    name: String,
    dir: &'static Dir<'static>,
    font: Option<String>,
    styles: BTreeMap<String, String>,
    default_style: Option<String>,
    glyph_map: String,
    render_config: RenderConfig,
}

impl EmbeddedProvider {
    /// Serve the icon set in an embedded directory.
    pub fn new(name: impl Into<String>, dir: &'static Dir<'static>) -> Self {
        Self {
            name: name.into(),
            dir,
            font: None,
            styles: BTreeMap::new(),
            default_style: None,
            glyph_map: GLYPH_MAP_FILE.to_string(),
            render_config: RenderConfig::default(),
        }
    }

    /// Use a specific font file for the single-style set.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Map a style to its font file. The first style becomes the default.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>, font: impl Into<String>) -> Self {
        let style = style.into();
        if self.default_style.is_none() {
            self.default_style = Some(style.clone());
        }
        self.styles.insert(style, font.into());
        self
    }

    /// Set the default style.
    #[must_use]
    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    /// Use a shared glyph map file other than `glyphmap.json`.
    #[must_use]
    pub fn with_glyph_map(mut self, glyph_map: impl Into<String>) -> Self {
        self.glyph_map = glyph_map.into();
        self
    }

    /// Set the render configuration.
    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    fn font_file(&self, style: Option<&str>) -> IconResult<&'static [u8]> {
        let rel = match (style, &self.font) {
            (Some(style), _) => self
                .styles
                .get(style)
                .cloned()
                .ok_or_else(|| unknown_style(&self.name, style, self.list_styles()))?,
            (None, Some(font)) => font.clone(),
            (None, None) => self
                .dir
                .files()
                .map(|file| file.path())
                .filter(|path| is_font_file(path))
                .min()
                .map(|path| path.to_string_lossy().into_owned())
                .ok_or_else(|| IconError::font_not_found(&self.name, self.dir.path()))?,
        };
        self.dir
            .get_file(&rel)
            .map(|file| file.contents())
            .ok_or_else(|| IconError::font_not_found(&self.name, &rel))
    }

    fn glyph_map_text(&self, style: Option<&str>) -> IconResult<&'static str> {
        let specific = style.map(style_glyph_map_file);
        let file = specific
            .as_deref()
            .and_then(|path| self.dir.get_file(path))
            .or_else(|| self.dir.get_file(&self.glyph_map))
            .ok_or_else(|| {
                IconError::unreadable(&self.glyph_map, io::Error::from(io::ErrorKind::NotFound))
            })?;
        file.contents_utf8().ok_or_else(|| {
            IconError::invalid_glyph_map(format!("{} is not UTF-8", file.path().display()))
        })
    }
}

impl FontProvider for EmbeddedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_assets(&self, style: Option<&str>) -> IconResult<FontAssets> {
        let style = if self.styles.is_empty() {
            None
        } else {
            style.map(str::to_string).or_else(|| self.default_style.clone())
        };
        let font = self.font_file(style.as_deref())?;
        let glyph_map = self.glyph_map_text(style.as_deref())?;
        Ok(FontAssets::new(Cow::Borrowed(font), Cow::Borrowed(glyph_map)))
    }

    fn list_styles(&self) -> Vec<String> {
        self.styles.keys().cloned().collect()
    }

    fn default_style(&self) -> Option<String> {
        self.default_style.clone()
    }

    fn render_config(&self) -> RenderConfig {
        self.render_config
    }
}

impl fmt::Debug for EmbeddedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedProvider")
            .field("name", &self.name)
            .field("dir", &self.dir.path())
            .field("font", &self.font)
            .field("styles", &self.styles)
            .field("default_style", &self.default_style)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_iconfont::testing::{fixture_font, FIXTURE_GLYPH_MAP};

    fn write(dir: &Path, name: &str, contents: &[u8]) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn directory_picks_first_font_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b-icons.otf", b"second");
        write(dir.path(), "a-icons.ttf", b"first");
        write(dir.path(), "readme.txt", b"ignored");
        write(dir.path(), GLYPH_MAP_FILE, FIXTURE_GLYPH_MAP.as_bytes());

        let provider = DirectoryProvider::new("dir", dir.path());
        assert_eq!(provider.font_path().unwrap(), dir.path().join("a-icons.ttf"));

        let assets = provider.load_assets(None).unwrap();
        assert_eq!(&*assets.font, b"first");
        assert_eq!(&*assets.glyph_map, FIXTURE_GLYPH_MAP);
    }

    #[test]
    fn directory_explicit_font_and_map() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.ttf", b"a");
        write(dir.path(), "icons.ttf", &fixture_font());
        write(dir.path(), "names.json", b"{}");

        let provider = DirectoryProvider::new("dir", dir.path())
            .with_font("icons.ttf")
            .with_glyph_map("names.json");
        let assets = provider.load_assets(None).unwrap();
        assert_eq!(assets.font.len(), fixture_font().len());
        assert_eq!(&*assets.glyph_map, "{}");
    }

    #[test]
    fn directory_without_font_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), GLYPH_MAP_FILE, b"{}");
        let err = DirectoryProvider::new("dir", dir.path()).load_assets(None).unwrap_err();
        assert!(matches!(err, IconError::FontNotFound { .. }));

        let err = DirectoryProvider::new("dir", dir.path().join("missing"))
            .load_assets(None)
            .unwrap_err();
        assert!(matches!(err, IconError::FontNotFound { .. }));
    }

    #[test]
    fn directory_missing_glyph_map_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "icons.ttf", b"font");
        let err = DirectoryProvider::new("dir", dir.path()).load_assets(None).unwrap_err();
        assert!(matches!(err, IconError::AssetUnreadable { .. }));
    }

    #[test]
    fn multi_style_lists_existing_fonts_only() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Regular.ttf", b"regular");
        write(dir.path(), "Filled.ttf", b"filled");
        write(dir.path(), GLYPH_MAP_FILE, br#"{"shared": "e001"}"#);
        write(dir.path(), &style_glyph_map_file("filled"), br#"{"filled": "e002"}"#);

        let provider = MultiStyleProvider::new("fluent", dir.path())
            .with_style("regular", "Regular.ttf")
            .with_style("filled", "Filled.ttf")
            .with_style("light", "Light.ttf")
            .with_default_style("regular");

        assert_eq!(provider.list_styles(), vec!["filled", "regular"]);
        assert_eq!(provider.default_style().as_deref(), Some("regular"));

        let regular = provider.load_assets(None).unwrap();
        assert_eq!(&*regular.font, b"regular");
        assert_eq!(&*regular.glyph_map, r#"{"shared": "e001"}"#);

        let filled = provider.load_assets(Some("filled")).unwrap();
        assert_eq!(&*filled.font, b"filled");
        assert_eq!(&*filled.glyph_map, r#"{"filled": "e002"}"#);

        let err = provider.load_assets(Some("light")).unwrap_err();
        assert!(matches!(err, IconError::FontNotFound { .. }));

        let err = provider.load_assets(Some("bold")).unwrap_err();
        assert!(matches!(err, IconError::UnknownStyle { ref available, .. }
            if available == &["filled", "regular"]));
    }

    #[test]
    fn multi_style_default_falls_back_to_first_available() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Light.ttf", b"light");
        let provider = MultiStyleProvider::new("fluent", dir.path())
            .with_style("regular", "Regular.ttf")
            .with_style("light", "Light.ttf")
            .with_default_style("regular");
        assert_eq!(provider.default_style().as_deref(), Some("light"));

        let empty =
            MultiStyleProvider::new("fluent", dir.path()).with_style("regular", "Regular.ttf");
        assert_eq!(empty.default_style(), None);
        assert!(matches!(empty.load_assets(None), Err(IconError::FontNotFound { .. })));
    }
}
