//! Stateful icons for Horizon widgets.
//!
//! Binds a rendered [`Icon`](horizon_iconfont::Icon) to a widget so the
//! displayed image follows the widget's interaction state (hover, pressed,
//! disabled, selected, ...) without per-event wiring at each call site.
//!
//! # Rules
//!
//! A [`StateSpec`] is an ordered list of [`StateRule`]s. Each rule pairs a
//! [`StateSelector`] such as `"hover !disabled"` with an [`Appearance`]: a new
//! color, or another glyph. When the widget's state changes, the **last**
//! matching rule is applied; if none matches, the original icon returns.
//!
//! ```ignore
//! use std::sync::Arc;
//! use horizon_iconfont::Icon;
//! use horizon_iconfont_style::{bind, Appearance, HeadlessWidget, StateSpec, WidgetState};
//!
//! let widget = Arc::new(HeadlessWidget::new());
//! let rules = StateSpec::new()
//!     .rule("hover", Appearance::color("red"))?
//!     .rule("hover !disabled", Appearance::color("blue"))?;
//! let binding = bind(Icon::new("house")?, &widget, Some(rules))?;
//!
//! widget.set_state(WidgetState::HOVER); // now blue
//! ```
//!
//! # Toolkit Integration
//!
//! Implement [`IconWidget`] for the toolkit's label or button: expose the
//! current [`WidgetState`], a [`Signal`] emitted on changes, and a way to
//! swap the displayed image.

mod binding;
mod error;
pub mod logging;
mod rule;
mod selector;
mod signal;
mod state;
mod theme;
mod widget;

pub use binding::{bind, IconBinding};
pub use error::{StyleError, StyleResult};
pub use rule::{Appearance, StateRule, StateSpec};
pub use selector::StateSelector;
pub use signal::{ConnectionId, Signal};
pub use state::WidgetState;
pub use theme::ThemeForegrounds;
pub use widget::{HeadlessWidget, IconWidget};
