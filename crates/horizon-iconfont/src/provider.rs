//! The provider interface: where font bytes and glyph maps come from.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::RenderConfig;
use crate::error::{IconError, IconResult};

/// Raw assets for one icon set style.
#[derive(Clone)]
pub struct FontAssets {
    /// TrueType or OpenType font bytes.
    pub font: Cow<'static, [u8]>,
    /// Glyph map JSON text in any supported shape.
    pub glyph_map: Cow<'static, str>,
}

impl FontAssets {
    /// Bundle font bytes with glyph map text.
    pub fn new(
        font: impl Into<Cow<'static, [u8]>>,
        glyph_map: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            font: font.into(),
            glyph_map: glyph_map.into(),
        }
    }
}

impl fmt::Debug for FontAssets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontAssets")
            .field("font_len", &self.font.len())
            .field("glyph_map_len", &self.glyph_map.len())
            .finish()
    }
}

/// A source of icon font assets.
///
/// Implementations read packaged resources or local files. They are called
/// at most once per `(provider, style)` for the lifetime of a registry, never
/// on the render path.
pub trait FontProvider: Send + Sync {
    /// Stable identifier used to key caches, e.g. `"bootstrap"`.
    fn name(&self) -> &str;

    /// Load the font bytes and glyph map JSON for a style.
    ///
    /// `None` selects the provider's only or default style.
    fn load_assets(&self, style: Option<&str>) -> IconResult<FontAssets>;

    /// Styles this provider declares. Empty for single-style providers.
    fn list_styles(&self) -> Vec<String> {
        Vec::new()
    }

    /// Style used when none is requested.
    fn default_style(&self) -> Option<String> {
        None
    }

    /// Glyph placement tuning for this family.
    fn render_config(&self) -> RenderConfig {
        RenderConfig::default()
    }
}

/// A provider serving assets held in memory.
///
/// Useful for fonts compiled into the binary with `include_bytes!`:
///
/// ```
/// use horizon_iconfont::{FontAssets, FontProvider, MemoryProvider};
///
/// let provider = MemoryProvider::new("demo", FontAssets::new(&b"font"[..], r#"{"a": "e001"}"#));
/// assert_eq!(provider.name(), "demo");
/// assert!(provider.list_styles().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    name: String,
    default: Option<FontAssets>,
    styles: BTreeMap<String, FontAssets>,
    default_style: Option<String>,
    render_config: RenderConfig,
}

impl MemoryProvider {
    /// Create a single-style provider.
    pub fn new(name: impl Into<String>, assets: FontAssets) -> Self {
        Self {
            name: name.into(),
            default: Some(assets),
            styles: BTreeMap::new(),
            default_style: None,
            render_config: RenderConfig::default(),
        }
    }

    /// Create a provider with no assets; add them with [`with_style`](Self::with_style).
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            styles: BTreeMap::new(),
            default_style: None,
            render_config: RenderConfig::default(),
        }
    }

    /// Register assets for a named style.
    ///
    /// The first registered style becomes the default unless
    /// [`with_default_style`](Self::with_default_style) says otherwise.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>, assets: FontAssets) -> Self {
        let style = style.into();
        if self.default_style.is_none() {
            self.default_style = Some(style.clone());
        }
        self.styles.insert(style, assets);
        self
    }

    /// Set the default style.
    #[must_use]
    pub fn with_default_style(mut self, style: impl Into<String>) -> Self {
        self.default_style = Some(style.into());
        self
    }

    /// Set the render configuration.
    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }
}

impl FontProvider for MemoryProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_assets(&self, style: Option<&str>) -> IconResult<FontAssets> {
        let style = style.map(str::to_string).or_else(|| self.default_style.clone());
        let assets = match &style {
            Some(style) => self.styles.get(style).or(self.default.as_ref()),
            None => self.default.as_ref(),
        };
        assets.cloned().ok_or_else(|| IconError::UnknownStyle {
            provider: self.name.clone(),
            style: style.unwrap_or_else(|| "default".to_string()),
            available: self.list_styles(),
        })
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
