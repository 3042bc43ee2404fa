//! Icon font rendering and caching for Horizon widgets.
//!
//! This crate turns symbolic icon names into bitmaps: it maps a name to a
//! codepoint through a glyph map, rasterizes that glyph from a TrueType or
//! OpenType icon font at the requested size and color, centers it on a padded
//! square canvas, and caches the result so repeated requests share one image.
//!
//! # Getting Started
//!
//! Activate an icon set from a [`FontProvider`], then create icons:
//!
//! ```no_run
//! use horizon_iconfont::{FontAssets, Icon, IconRegistry, MemoryProvider};
//!
//! # fn example() -> horizon_iconfont::IconResult<()> {
//! let provider = MemoryProvider::new(
//!     "bootstrap",
//!     FontAssets::new(std::fs::read("bootstrap-icons.ttf").unwrap(), r#"{"house": "f425"}"#),
//! );
//! IconRegistry::global().activate(&provider, None)?;
//!
//! let icon = Icon::builder("house").size(32).color("#0d6efd").build()?;
//! let rgba: &[u8] = icon.image().as_rgba();
//! # let _ = rgba;
//! # Ok(())
//! # }
//! ```
//!
//! # Multiple Icon Sets
//!
//! [`IconRegistry::activate`] returns the [`IconSet`] it activated. Passing
//! sets explicitly to [`IconRegistry::render`] or [`IconBuilder::build_in`]
//! lets several sets render side by side without re-activation.
//!
//! # Failure Model
//!
//! Activation problems (missing fonts, unknown styles, unreadable glyph maps)
//! are returned as [`IconError`]s. Rendering an unknown icon name is not an
//! error: it yields a transparent bitmap of the requested size.
//!
//! # Shutdown
//!
//! Call [`IconRegistry::cleanup`] once at exit to delete the font files
//! written during activation.

mod assets;
mod color;
mod config;
mod error;
pub mod glyph_map;
mod icon;
pub mod logging;
mod provider;
pub mod raster;
mod registry;
mod rendered;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use assets::{FontAssetCache, FontFormat, IconSetId, TEMP_FILE_PREFIX};
pub use color::IconColor;
pub use config::{RenderConfig, MAX_PAD_FACTOR};
pub use error::{IconError, IconResult};
pub use glyph_map::GlyphMap;
pub use icon::{create_transparent_icon, Icon, IconBuilder, DEFAULT_COLOR, DEFAULT_SIZE};
pub use provider::{FontAssets, FontProvider, MemoryProvider};
pub use raster::{RasterStats, Rasterizer};
pub use registry::{IconRegistry, IconSet};
pub use rendered::{RenderKey, RenderedIcon};

// Re-export the image type handed to toolkits.
pub use image::RgbaImage;
