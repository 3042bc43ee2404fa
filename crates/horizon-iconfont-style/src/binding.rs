//! Binding icons to widget state.
//!
//! [`bind`] subscribes to a widget's state notifications and re-renders the
//! icon whenever the state changes, following an ordered [`StateSpec`].
//! Rendering is cache-backed, so flipping between states reuses bitmaps after
//! the first pass.

use std::fmt;
use std::sync::{Arc, Weak};

use horizon_iconfont::Icon;
use parking_lot::Mutex;

use crate::error::StyleResult;
use crate::logging::targets;
use crate::rule::StateSpec;
use crate::signal::ConnectionId;
use crate::state::WidgetState;
use crate::widget::IconWidget;

struct BindingShared {
    original: Icon,
    rules: StateSpec,
    current: Mutex<Icon>,
}

impl BindingShared {
    /// Show the appearance of the last rule matching `state`, or the original
    /// icon when no rule matches.
    fn apply(&self, widget: &dyn IconWidget, state: WidgetState) -> StyleResult<()> {
        let original = &self.original;
        let (name, color) = match self.rules.resolve(state) {
            Some(appearance) => appearance.resolve(original.name(), original.color()),
            None => (original.name(), original.color()),
        };

        let icon = if name == original.name() && color == original.color() {
            original.clone()
        } else {
            original.restyle(name, color)?
        };
        tracing::trace!(target: targets::BINDING, %state, name, color, "applying icon appearance");

        widget.set_image(Arc::clone(icon.image()));
        *self.current.lock() = icon;
        Ok(())
    }
}

/// A live icon binding. Dropping it stops following the widget's state.
#[must_use = "dropping the binding disconnects it immediately"]
pub struct IconBinding {
    widget: Weak<dyn IconWidget>,
    connection: ConnectionId,
    shared: Arc<BindingShared>,
}

impl IconBinding {
    /// The icon as it was when bound.
    pub fn original(&self) -> &Icon {
        &self.shared.original
    }

    /// The icon currently displayed.
    pub fn current(&self) -> Icon {
        self.shared.current.lock().clone()
    }

    /// The rules being followed.
    pub fn rules(&self) -> &StateSpec {
        &self.shared.rules
    }

    /// Re-evaluate the rules against the widget's current state.
    ///
    /// Does nothing if the widget has been dropped.
    pub fn refresh(&self) -> StyleResult<()> {
        match self.widget.upgrade() {
            Some(widget) => self.shared.apply(widget.as_ref(), widget.current_state()),
            None => Ok(()),
        }
    }

    /// Stop following the widget. The current image stays displayed.
    pub fn unbind(self) {}
}

impl Drop for IconBinding {
    fn drop(&mut self) {
        if let Some(widget) = self.widget.upgrade() {
            widget.state_changed().disconnect(self.connection);
            tracing::debug!(
                target: targets::BINDING,
                icon = self.shared.original.name(),
                "icon binding released"
            );
        }
    }
}

impl fmt::Debug for IconBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconBinding")
            .field("icon", &self.shared.original.name())
            .field("rules", &self.shared.rules.len())
            .field("widget_alive", &(self.widget.strong_count() > 0))
            .finish()
    }
}

/// Keep `widget`'s image in sync with its interaction state.
///
/// The rules are evaluated once immediately and again on every state
/// notification. Without explicit rules, the widget's theme foregrounds (or
/// the light palette) provide normal, hover, pressed and disabled colors.
///
/// Render failures during a notification are logged and leave the previous
/// image displayed; a failure at bind time is returned.
///
/// ```ignore
/// let binding = bind(icon, &button, Some(
///     StateSpec::new()
///         .rule("hover !disabled", Appearance::color("#0d6efd"))?
///         .rule("selected", Appearance::glyph("star-fill"))?,
/// ))?;
/// ```
pub fn bind<W>(icon: Icon, widget: &Arc<W>, rules: Option<StateSpec>) -> StyleResult<IconBinding>
where
    W: IconWidget + 'static,
{
    let widget: Arc<dyn IconWidget> = widget.clone();
    let rules = rules.unwrap_or_else(|| {
        widget
            .theme_foregrounds()
            .unwrap_or_default()
            .default_rules()
    });

    let shared = Arc::new(BindingShared {
        current: Mutex::new(icon.clone()),
        original: icon,
        rules,
    });
    shared.apply(widget.as_ref(), widget.current_state())?;

    let weak_widget = Arc::downgrade(&widget);
    let slot_shared = Arc::clone(&shared);
    let slot_widget = weak_widget.clone();
    let connection = widget.state_changed().connect(move |state| {
        let Some(widget) = slot_widget.upgrade() else {
            return;
        };
        if let Err(e) = slot_shared.apply(widget.as_ref(), *state) {
            tracing::warn!(
                target: targets::BINDING,
                icon = slot_shared.original.name(),
                %state,
                error = %e,
                "failed to update icon for widget state"
            );
        }
    });

    tracing::debug!(
        target: targets::BINDING,
        icon = shared.original.name(),
        rules = shared.rules.len(),
        "icon bound to widget"
    );

    Ok(IconBinding {
        widget: weak_widget,
        connection,
        shared,
    })
}
