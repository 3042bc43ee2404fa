//! Rendering configuration.

use serde::{Deserialize, Serialize};

/// Largest padding factor accepted by [`RenderConfig::sanitized`].
///
/// At 0.5 the padding would consume the whole canvas.
pub const MAX_PAD_FACTOR: f32 = 0.49;

/// Per-family tuning for glyph placement.
///
/// Providers return one of these from
/// [`FontProvider::render_config`](crate::FontProvider::render_config); it can
/// also be embedded in application settings files:
///
/// ```
/// use horizon_iconfont::RenderConfig;
///
/// let config: RenderConfig = serde_json::from_str(r#"{"y_bias": 0.05}"#).unwrap();
/// assert_eq!(config, RenderConfig::default().with_y_bias(0.05));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Padding on every side as a fraction of the icon size.
    /// Default: 0.10.
    pub pad_factor: f32,
    /// Vertical shift as a fraction of the icon size, positive moves down.
    /// Default: 0.0.
    pub y_bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pad_factor: 0.10,
            y_bias: 0.0,
        }
    }
}

impl RenderConfig {
    /// Set the padding factor.
    #[must_use]
    pub fn with_pad_factor(mut self, pad_factor: f32) -> Self {
        self.pad_factor = pad_factor;
        self
    }

    /// Set the vertical bias.
    #[must_use]
    pub fn with_y_bias(mut self, y_bias: f32) -> Self {
        self.y_bias = y_bias;
        self
    }

    /// Return a copy safe to render with.
    ///
    /// The padding factor is clamped to `[0, MAX_PAD_FACTOR]` and non-finite
    /// values fall back to the defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pad_factor = if self.pad_factor.is_finite() {
            self.pad_factor.clamp(0.0, MAX_PAD_FACTOR)
        } else {
            defaults.pad_factor
        };
        let y_bias = if self.y_bias.is_finite() {
            self.y_bias
        } else {
            defaults.y_bias
        };
        Self { pad_factor, y_bias }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.pad_factor, 0.10);
        assert_eq!(config.y_bias, 0.0);
    }

    #[test]
    fn sanitized_clamps() {
        assert_eq!(
            RenderConfig::default().with_pad_factor(0.8).sanitized().pad_factor,
            MAX_PAD_FACTOR
        );
        assert_eq!(
            RenderConfig::default().with_pad_factor(-1.0).sanitized().pad_factor,
            0.0
        );
        let config = RenderConfig::default()
            .with_pad_factor(f32::NAN)
            .with_y_bias(f32::INFINITY)
            .sanitized();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn serde_fills_missing_fields() {
        let config: RenderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RenderConfig::default());

        let text = serde_json::to_string(&RenderConfig::default().with_pad_factor(0.2)).unwrap();
        let back: RenderConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.pad_factor, 0.2);
    }
}
