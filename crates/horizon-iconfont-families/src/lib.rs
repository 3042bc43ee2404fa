//! Icon families for Horizon Iconfont.
//!
//! The rendering core knows nothing about how individual icon sets name
//! their glyphs or where they keep their files. This crate supplies both:
//!
//! - [`IconFamily`] resolves friendly names such as `("house", Some("fill"))`
//!   to the glyph map key a family actually uses (`"house-fill"`).
//! - [`DirectoryProvider`], [`MultiStyleProvider`] and [`EmbeddedProvider`]
//!   implement [`FontProvider`](horizon_iconfont::FontProvider) over a
//!   directory on disk or a directory compiled into the binary.
//! - The [`tooling`] module builds canonical `glyphmap.json` files from
//!   upstream metadata or from a font's character map.
//!
//! # Example
//!
//! ```no_run
//! use horizon_iconfont::{Icon, IconRegistry};
//! use horizon_iconfont_families::{DirectoryProvider, IconFamily};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = DirectoryProvider::new("bootstrap", "assets/bootstrap");
//! let set = IconRegistry::global().activate(&provider, None)?;
//!
//! let name = IconFamily::Bootstrap.resolve("house", Some("fill"), set.glyph_map())?;
//! let icon = Icon::builder(name).size(32).build()?;
//! # let _ = icon;
//! # Ok(())
//! # }
//! ```

mod error;
mod family;
pub mod logging;
mod provider;
pub mod tooling;

pub use error::{FamilyError, FamilyResult};
pub use family::{IconFamily, NONE_ICON};
pub use provider::{
    style_glyph_map_file, DirectoryProvider, EmbeddedProvider, MultiStyleProvider, GLYPH_MAP_FILE,
};
