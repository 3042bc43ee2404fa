//! State rules: which appearance to show in which widget state.

use crate::error::StyleResult;
use crate::selector::StateSelector;
use crate::state::WidgetState;

/// What a matching rule changes about the bound icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Appearance {
    /// Same glyph, another color.
    Color(String),
    /// Another glyph; keeps the bind-time color when `color` is `None`.
    Glyph { name: String, color: Option<String> },
}

impl Appearance {
    /// Recolor the bound glyph.
    pub fn color(color: impl Into<String>) -> Self {
        Self::Color(color.into())
    }

    /// Swap to another glyph in the bind-time color.
    pub fn glyph(name: impl Into<String>) -> Self {
        Self::Glyph {
            name: name.into(),
            color: None,
        }
    }

    /// Swap to another glyph in another color.
    pub fn glyph_with_color(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::Glyph {
            name: name.into(),
            color: Some(color.into()),
        }
    }

    /// Resolve to the `(name, color)` to render, given the bind-time values.
    pub fn resolve<'a>(&'a self, name: &'a str, color: &'a str) -> (&'a str, &'a str) {
        match self {
            Self::Color(override_color) => (name, override_color.as_str()),
            Self::Glyph {
                name: override_name,
                color: override_color,
            } => (override_name.as_str(), override_color.as_deref().unwrap_or(color)),
        }
    }
}

/// A selector paired with the appearance it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRule {
    selector: StateSelector,
    appearance: Appearance,
}

impl StateRule {
    /// Build a rule from a selector string such as `"pressed !disabled"`.
    pub fn new(spec: &str, appearance: Appearance) -> StyleResult<Self> {
        Ok(Self::from_selector(StateSelector::parse(spec)?, appearance))
    }

    pub fn from_selector(selector: StateSelector, appearance: Appearance) -> Self {
        Self {
            selector,
            appearance,
        }
    }

    pub fn selector(&self) -> &StateSelector {
        &self.selector
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn matches(&self, state: WidgetState) -> bool {
        self.selector.matches(state)
    }
}

/// An ordered list of state rules.
///
/// Rules are evaluated in order and the **last** matching rule wins, so later
/// rules refine earlier ones the way later stylesheet declarations do:
///
/// ```
/// use horizon_iconfont_style::{Appearance, StateSpec, WidgetState};
///
/// let spec = StateSpec::new()
///     .rule("hover", Appearance::color("red")).unwrap()
///     .rule("hover !disabled", Appearance::color("blue")).unwrap();
///
/// assert_eq!(spec.resolve(WidgetState::HOVER), Some(&Appearance::color("blue")));
/// assert_eq!(
///     spec.resolve(WidgetState::HOVER | WidgetState::DISABLED),
///     Some(&Appearance::color("red"))
/// );
/// assert_eq!(spec.resolve(WidgetState::empty()), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSpec {
    rules: Vec<StateRule>,
}

impl StateSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule parsed from a selector string.
    pub fn rule(mut self, spec: &str, appearance: Appearance) -> StyleResult<Self> {
        self.rules.push(StateRule::new(spec, appearance)?);
        Ok(self)
    }

    /// Append a rule.
    pub fn push(&mut self, rule: StateRule) {
        self.rules.push(rule);
    }

    /// The appearance of the last rule matching `state`.
    pub fn resolve(&self, state: WidgetState) -> Option<&Appearance> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(state))
            .map(StateRule::appearance)
    }

    pub fn rules(&self) -> &[StateRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<StateRule> for StateSpec {
    fn from_iter<I: IntoIterator<Item = StateRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_matching_rule_wins() {
        let spec = StateSpec::new()
            .rule("hover", Appearance::color("red"))
            .unwrap()
            .rule("hover !disabled", Appearance::color("blue"))
            .unwrap();
        assert_eq!(spec.resolve(WidgetState::HOVER), Some(&Appearance::color("blue")));
    }

    #[test]
    fn broad_rule_after_specific_still_wins() {
        let spec = StateSpec::new()
            .rule("hover !disabled", Appearance::color("blue"))
            .unwrap()
            .rule("", Appearance::color("gray"))
            .unwrap();
        assert_eq!(spec.resolve(WidgetState::HOVER), Some(&Appearance::color("gray")));
    }

    #[test]
    fn appearance_resolution() {
        assert_eq!(Appearance::color("red").resolve("house", "black"), ("house", "red"));
        assert_eq!(
            Appearance::glyph("house-fill").resolve("house", "black"),
            ("house-fill", "black")
        );
        assert_eq!(
            Appearance::glyph_with_color("house-fill", "#fff").resolve("house", "black"),
            ("house-fill", "#fff")
        );
    }

    #[test]
    fn invalid_rule_is_rejected() {
        assert!(StateSpec::new().rule("hover !sparkly", Appearance::color("red")).is_err());
    }
}
