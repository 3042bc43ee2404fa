//! Theme-derived default rules.

use crate::rule::{Appearance, StateRule, StateSpec};
use crate::selector::StateSelector;
use crate::state::WidgetState;

/// Foreground colors a theme uses for a widget's main states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeForegrounds {
    pub normal: String,
    pub hover: String,
    pub pressed: String,
    pub disabled: String,
}

impl Default for ThemeForegrounds {
    fn default() -> Self {
        Self::light()
    }
}

impl ThemeForegrounds {
    /// Colors of the built-in light palette.
    pub fn light() -> Self {
        Self {
            normal: "#212529".into(),
            hover: "#007AFF".into(),
            pressed: "#0056B3".into(),
            disabled: "#ADB5BD".into(),
        }
    }

    /// Colors of the built-in dark palette.
    pub fn dark() -> Self {
        Self {
            normal: "#FFFFFF".into(),
            hover: "#0A84FF".into(),
            pressed: "#5EB1FF".into(),
            disabled: "#636366".into(),
        }
    }

    /// Rules recoloring the icon for normal, hover, pressed and disabled.
    ///
    /// Pressed is declared after hover so a pressed-and-hovered widget shows
    /// the pressed color; disabled comes last and overrides everything.
    pub fn default_rules(&self) -> StateSpec {
        let enabled = StateSelector::any().without(WidgetState::DISABLED);
        [
            (enabled, &self.normal),
            (enabled.with(WidgetState::HOVER), &self.hover),
            (enabled.with(WidgetState::PRESSED), &self.pressed),
            (StateSelector::any().with(WidgetState::DISABLED), &self.disabled),
        ]
        .into_iter()
        .map(|(selector, color)| {
            StateRule::from_selector(selector, Appearance::color(color.as_str()))
        })
        .collect()
    }
}
