//! Icon handles.

use std::sync::Arc;

use crate::error::{IconError, IconResult};
use crate::registry::{IconRegistry, IconSet};
use crate::rendered::RenderedIcon;

/// Size used when none is given.
pub const DEFAULT_SIZE: u32 = 24;
/// Color used when none is given.
pub const DEFAULT_COLOR: &str = "black";

/// A rendered icon together with the parameters that produced it.
///
/// The bitmap is rendered eagerly on construction and shared with every
/// other handle asking for the same parameters.
#[derive(Debug, Clone)]
pub struct Icon {
    registry: IconRegistry,
    set: Arc<IconSet>,
    name: String,
    size: u32,
    color: String,
    image: Arc<RenderedIcon>,
}

impl Icon {
    /// Render `name` at the default size and color from the global registry's
    /// active set.
    ///
    /// # Errors
    ///
    /// [`IconError::NotInitialized`] if no icon set has been activated.
    pub fn new(name: impl Into<String>) -> IconResult<Self> {
        Self::builder(name).build()
    }

    /// Start building an icon.
    pub fn builder(name: impl Into<String>) -> IconBuilder {
        IconBuilder {
            name: name.into(),
            size: DEFAULT_SIZE,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// The set this icon was rendered from.
    pub fn icon_set(&self) -> &Arc<IconSet> {
        &self.set
    }

    /// The registry that rendered this icon.
    pub fn registry(&self) -> &IconRegistry {
        &self.registry
    }

    /// The rendered bitmap.
    pub fn image(&self) -> &Arc<RenderedIcon> {
        &self.image
    }

    /// Render a variant with another name and color, keeping size and set.
    pub fn restyle(&self, name: &str, color: &str) -> IconResult<Icon> {
        Icon::builder(name)
            .size(self.size)
            .color(color)
            .build_in(&self.registry, Arc::clone(&self.set))
    }
}

/// Builder for [`Icon`].
#[derive(Debug, Clone)]
#[must_use]
pub struct IconBuilder {
    name: String,
    size: u32,
    color: String,
}

impl IconBuilder {
    /// Edge length in pixels. The bitmap is never smaller than 1x1.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Color string, e.g. `"#0d6efd"` or `"gray"`.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Render from the global registry's active set.
    pub fn build(self) -> IconResult<Icon> {
        self.build_with(IconRegistry::global())
    }

    /// Render from `registry`'s active set.
    pub fn build_with(self, registry: &IconRegistry) -> IconResult<Icon> {
        let set = registry.active().ok_or(IconError::NotInitialized)?;
        self.build_in(registry, set)
    }

    /// Render from an explicit set.
    pub fn build_in(self, registry: &IconRegistry, set: Arc<IconSet>) -> IconResult<Icon> {
        let image = registry.render(&set, &self.name, self.size, &self.color)?;
        Ok(Icon {
            registry: registry.clone(),
            set,
            name: self.name,
            size: self.size,
            color: self.color,
            image,
        })
    }
}

/// The global registry's shared transparent bitmap for `size`.
pub fn create_transparent_icon(size: u32) -> Arc<RenderedIcon> {
    IconRegistry::global().transparent(size)
}
