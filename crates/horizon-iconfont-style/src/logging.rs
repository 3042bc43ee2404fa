//! Logging facilities for stateful icon bindings.

/// Target names for log filtering.
pub mod targets {
    /// Crate root target.
    pub const STYLE: &str = "horizon_iconfont_style";
    /// Rule evaluation and image swaps.
    pub const BINDING: &str = "horizon_iconfont_style::binding";
    /// Signal emission.
    pub const SIGNAL: &str = "horizon_iconfont_style::signal";
}
