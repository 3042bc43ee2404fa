//! State selectors such as `"hover !disabled"`.
//!
//! A selector is a conjunction: every listed flag must be set and every flag
//! prefixed with `!` must be clear. The empty selector matches every state.

use std::fmt;
use std::str::FromStr;

use crate::error::{StyleError, StyleResult};
use crate::state::WidgetState;

/// A conjunction of required and forbidden widget state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StateSelector {
    required: WidgetState,
    forbidden: WidgetState,
}

impl StateSelector {
    /// A selector matching every state.
    pub fn any() -> Self {
        Self::default()
    }

    /// Parse whitespace separated flag names, `!` negating a flag.
    ///
    /// ```
    /// use horizon_iconfont_style::{StateSelector, WidgetState};
    ///
    /// let selector = StateSelector::parse("hover !disabled").unwrap();
    /// assert!(selector.matches(WidgetState::HOVER));
    /// assert!(!selector.matches(WidgetState::HOVER | WidgetState::DISABLED));
    /// ```
    pub fn parse(spec: &str) -> StyleResult<Self> {
        let mut selector = Self::default();
        for token in spec.split_whitespace() {
            let (negated, name) = match token.strip_prefix('!') {
                Some(name) => (true, name),
                None => (false, token),
            };
            let flag = WidgetState::from_flag_name(name).ok_or_else(|| {
                StyleError::invalid_state_spec(spec, format!("unknown state flag '{name}'"))
            })?;
            if negated {
                selector.forbidden |= flag;
            } else {
                selector.required |= flag;
            }
        }
        if selector.required.intersects(selector.forbidden) {
            return Err(StyleError::invalid_state_spec(
                spec,
                "a flag cannot be both required and forbidden",
            ));
        }
        Ok(selector)
    }

    /// Require a flag.
    #[must_use]
    pub fn with(mut self, flag: WidgetState) -> Self {
        self.required |= flag;
        self
    }

    /// Forbid a flag.
    #[must_use]
    pub fn without(mut self, flag: WidgetState) -> Self {
        self.forbidden |= flag;
        self
    }

    /// Flags that must be set.
    pub fn required(&self) -> WidgetState {
        self.required
    }

    /// Flags that must be clear.
    pub fn forbidden(&self) -> WidgetState {
        self.forbidden
    }

    /// Check a widget state against this selector.
    pub fn matches(&self, state: WidgetState) -> bool {
        state.contains(self.required) && !state.intersects(self.forbidden)
    }
}

impl FromStr for StateSelector {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StateSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positive = self.required.flag_names().map(str::to_string);
        let negative = self.forbidden.flag_names().map(|name| format!("!{name}"));
        let tokens: Vec<_> = positive.chain(negative).collect();
        write!(f, "{}", tokens.join(" "))
    }
}
