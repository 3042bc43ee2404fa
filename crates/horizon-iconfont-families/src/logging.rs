//! Logging targets for icon families.

/// Target names for log filtering.
pub mod targets {
    /// Name resolution strategies.
    pub const FAMILY: &str = "horizon_iconfont_families::family";
    /// Filesystem and embedded providers.
    pub const PROVIDER: &str = "horizon_iconfont_families::provider";
    /// Glyph map asset tooling.
    pub const TOOLING: &str = "horizon_iconfont_families::tooling";
}
