//! Logging facilities for Horizon Iconfont.
//!
//! The crate is instrumented with `tracing`. Nothing is printed unless the
//! application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_iconfont=debug")
//!     .init();
//! ```
//!
//! Setting the [`DEBUG_ENV_VAR`] environment variable raises activation
//! diagnostics (provider, style, font path, glyph count) from `debug` to
//! `info` so they show up under a default filter.

use std::sync::OnceLock;

/// Environment variable enabling verbose activation diagnostics.
pub const DEBUG_ENV_VAR: &str = "HORIZON_ICONFONT_DEBUG";

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Crate root target.
    pub const ICONFONT: &str = "horizon_iconfont";
    /// Glyph map normalization.
    pub const GLYPH_MAP: &str = "horizon_iconfont::glyph_map";
    /// Font asset persistence.
    pub const ASSETS: &str = "horizon_iconfont::assets";
    /// Glyph rasterization and bitmap caches.
    pub const RASTER: &str = "horizon_iconfont::raster";
    /// Icon set activation and lifecycle.
    pub const REGISTRY: &str = "horizon_iconfont::registry";
}

/// Whether verbose activation diagnostics were requested.
///
/// Read once from [`DEBUG_ENV_VAR`]; any non-empty value other than `0` or
/// `false` (case-insensitive) enables it.
pub fn debug_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| {
        std::env::var(DEBUG_ENV_VAR)
            .map(|value| flag_enabled(&value))
            .unwrap_or(false)
    })
}

fn flag_enabled(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_values() {
        assert!(flag_enabled("1"));
        assert!(flag_enabled("yes"));
        assert!(flag_enabled("TRUE"));
        assert!(!flag_enabled(""));
        assert!(!flag_enabled("  "));
        assert!(!flag_enabled("0"));
        assert!(!flag_enabled("False"));
    }
}
