//! Icon set activation and process lifecycle.
//!
//! An [`IconRegistry`] memoizes every activated `(provider, style)` pair as an
//! [`IconSet`] and owns the caches behind rendering. Sets are passed
//! explicitly to [`IconRegistry::render`], so any number of them can be used
//! side by side. The registry also remembers the most recently activated set
//! for [`Icon::new`](crate::Icon::new).
//!
//! ```ignore
//! use horizon_iconfont::{testing, IconRegistry};
//!
//! let registry = IconRegistry::new();
//! let set = registry.activate(&testing::fixture_provider("demo"), None).unwrap();
//! let icon = registry.render(&set, "square", 24, "black").unwrap();
//! assert_eq!(icon.size(), 24);
//! registry.cleanup().unwrap();
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::assets::{FontAssetCache, FontFormat, IconSetId};
use crate::config::RenderConfig;
use crate::error::{IconError, IconResult};
use crate::glyph_map::GlyphMap;
use crate::logging::{debug_enabled, targets};
use crate::provider::FontProvider;
use crate::raster::{RasterStats, Rasterizer};
use crate::rendered::RenderedIcon;

/// An activated icon set: one provider style ready for rendering.
#[derive(Debug)]
pub struct IconSet {
    id: IconSetId,
    font_path: PathBuf,
    format: FontFormat,
    glyph_map: GlyphMap,
    render_config: RenderConfig,
}

impl IconSet {
    /// The `(provider, style)` identifier.
    pub fn id(&self) -> &IconSetId {
        &self.id
    }

    /// Path of the persisted font file.
    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    /// Container format of the font.
    pub fn format(&self) -> FontFormat {
        self.format
    }

    /// Icon names available in this set.
    pub fn glyph_map(&self) -> &GlyphMap {
        &self.glyph_map
    }

    /// Placement tuning supplied by the provider.
    pub fn render_config(&self) -> RenderConfig {
        self.render_config
    }

    /// Whether the set has a glyph for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.glyph_map.contains(name)
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    assets: FontAssetCache,
    sets: HashMap<IconSetId, Arc<IconSet>>,
    active: Option<Arc<IconSet>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    state: Mutex<RegistryState>,
    raster: Rasterizer,
}

/// Activated icon sets plus the caches used to render them.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    inner: Arc<RegistryInner>,
}

static GLOBAL_REGISTRY: OnceLock<IconRegistry> = OnceLock::new();

impl IconRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static IconRegistry {
        GLOBAL_REGISTRY.get_or_init(IconRegistry::new)
    }

    /// Activate a provider style and make it the active set.
    ///
    /// `None` selects the provider's default style. Activating a pair that is
    /// already known reuses its font file and glyph map.
    ///
    /// # Errors
    ///
    /// - [`IconError::UnknownStyle`] if `style` is not declared by the provider
    /// - [`IconError::FontNotFound`] / [`IconError::AssetUnreadable`] from the provider
    /// - [`IconError::InvalidGlyphMap`] if the glyph map cannot be parsed
    /// - [`IconError::Persist`] if the font file cannot be written
    pub fn activate(
        &self,
        provider: &dyn FontProvider,
        style: Option<&str>,
    ) -> IconResult<Arc<IconSet>> {
        if let Some(requested) = style {
            let available = provider.list_styles();
            if !available.iter().any(|s| s == requested) {
                return Err(IconError::UnknownStyle {
                    provider: provider.name().to_string(),
                    style: requested.to_string(),
                    available,
                });
            }
        }
        let style = style.map(str::to_string).or_else(|| provider.default_style());
        let id = IconSetId::new(provider.name(), style.as_deref());

        let mut state = self.inner.state.lock();
        if let Some(active) = &state.active
            && active.id == id
        {
            return Ok(Arc::clone(active));
        }
        if let Some(set) = state.sets.get(&id).cloned() {
            tracing::debug!(target: targets::REGISTRY, icon_set = %id, "switched active icon set");
            state.active = Some(Arc::clone(&set));
            return Ok(set);
        }

        let assets = provider.load_assets(style.as_deref())?;
        let glyph_map = GlyphMap::from_json_str(&assets.glyph_map)?;
        let font_path = state.assets.persist(&id, &assets.font)?;
        let set = Arc::new(IconSet {
            format: FontFormat::sniff(&assets.font),
            render_config: provider.render_config().sanitized(),
            id: id.clone(),
            font_path,
            glyph_map,
        });

        if debug_enabled() {
            tracing::info!(
                target: targets::REGISTRY,
                icon_set = %id,
                font = %set.font_path.display(),
                format = ?set.format,
                glyphs = set.glyph_map.len(),
                "activated icon set"
            );
        } else {
            tracing::debug!(
                target: targets::REGISTRY,
                icon_set = %id,
                font = %set.font_path.display(),
                glyphs = set.glyph_map.len(),
                "activated icon set"
            );
        }

        state.sets.insert(id, Arc::clone(&set));
        state.active = Some(Arc::clone(&set));
        Ok(set)
    }

    /// The most recently activated set.
    pub fn active(&self) -> Option<Arc<IconSet>> {
        self.inner.state.lock().active.clone()
    }

    /// A previously activated set, without changing the active one.
    pub fn icon_set(&self, provider: &str, style: Option<&str>) -> Option<Arc<IconSet>> {
        let id = IconSetId::new(provider, style);
        self.inner.state.lock().sets.get(&id).cloned()
    }

    /// Number of activated sets.
    pub fn icon_set_count(&self) -> usize {
        self.inner.state.lock().sets.len()
    }

    /// Number of font files written since the registry was created.
    pub fn persisted_font_count(&self) -> usize {
        self.inner.state.lock().assets.persisted_count()
    }

    /// Render an icon from an explicit set.
    ///
    /// # Errors
    ///
    /// [`IconError::NotInitialized`] if `set` was not activated on this
    /// registry or has been released by [`cleanup`](Self::cleanup).
    pub fn render(
        &self,
        set: &IconSet,
        name: &str,
        size: u32,
        color: &str,
    ) -> IconResult<Arc<RenderedIcon>> {
        if !self.is_live(set) {
            tracing::debug!(
                target: targets::REGISTRY,
                icon_set = %set.id(),
                "render from released icon set"
            );
            return Err(IconError::NotInitialized);
        }
        self.inner.raster.render(set, name, size, color)
    }

    fn is_live(&self, set: &IconSet) -> bool {
        self.inner
            .state
            .lock()
            .sets
            .get(set.id())
            .is_some_and(|live| std::ptr::eq(Arc::as_ptr(live), set))
    }

    /// Render an icon from the active set.
    ///
    /// # Errors
    ///
    /// [`IconError::NotInitialized`] if no set has been activated.
    pub fn render_active(
        &self,
        name: &str,
        size: u32,
        color: &str,
    ) -> IconResult<Arc<RenderedIcon>> {
        let set = self.active().ok_or(IconError::NotInitialized)?;
        self.render(&set, name, size, color)
    }

    /// The shared transparent bitmap for `size`.
    pub fn transparent(&self, size: u32) -> Arc<RenderedIcon> {
        self.inner.raster.placeholder(size)
    }

    /// Rasterizer statistics.
    pub fn stats(&self) -> RasterStats {
        self.inner.raster.stats()
    }

    /// Number of bitmaps currently cached.
    pub fn cached_bitmaps(&self) -> usize {
        self.inner.raster.cached_bitmaps()
    }

    /// Release everything: delete persisted font files, clear every cache and
    /// reset the active set.
    ///
    /// Meant to run once at shutdown; safe to call repeatedly or before any
    /// activation. Caches are cleared even when a file cannot be removed, in
    /// which case the first removal error is returned.
    pub fn cleanup(&self) -> IconResult<()> {
        let result = {
            let mut state = self.inner.state.lock();
            let result = state.assets.cleanup();
            state.sets.clear();
            state.active = None;
            result
        };
        self.inner.raster.clear();
        tracing::debug!(target: targets::REGISTRY, ok = result.is_ok(), "icon registry cleaned up");
        result
    }
}
