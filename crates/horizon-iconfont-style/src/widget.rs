//! The adapter between bindings and a toolkit's widgets.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_iconfont::RenderedIcon;
use parking_lot::Mutex;

use crate::signal::Signal;
use crate::state::WidgetState;
use crate::theme::ThemeForegrounds;

/// A widget that displays an icon and reports interaction state changes.
///
/// Toolkit integrations implement this for their label and button types.
pub trait IconWidget: Send + Sync {
    /// The widget's current state flags.
    fn current_state(&self) -> WidgetState;

    /// Emitted with the new flags whenever the widget's state changes.
    fn state_changed(&self) -> &Signal<WidgetState>;

    /// Replace the displayed image in place.
    fn set_image(&self, image: Arc<RenderedIcon>);

    /// Foreground colors from the widget's theme, if the toolkit exposes them.
    fn theme_foregrounds(&self) -> Option<ThemeForegrounds> {
        None
    }
}

/// An in-memory [`IconWidget`] with no native counterpart.
///
/// Useful for tests and for toolkits that drive state by hand.
#[derive(Debug, Default)]
pub struct HeadlessWidget {
    state: Mutex<WidgetState>,
    image: Mutex<Option<Arc<RenderedIcon>>>,
    image_updates: AtomicUsize,
    state_changed: Signal<WidgetState>,
    theme: Option<ThemeForegrounds>,
}

impl HeadlessWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in `state`.
    #[must_use]
    pub fn with_state(mut self, state: WidgetState) -> Self {
        self.state = Mutex::new(state);
        self
    }

    /// Report `theme` from [`IconWidget::theme_foregrounds`].
    #[must_use]
    pub fn with_theme(mut self, theme: ThemeForegrounds) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Change the state and notify subscribers if it differs.
    pub fn set_state(&self, state: WidgetState) {
        {
            let mut current = self.state.lock();
            if *current == state {
                return;
            }
            *current = state;
        }
        self.state_changed.emit(state);
    }

    /// Set or clear a single flag.
    pub fn set_flag(&self, flag: WidgetState, on: bool) {
        let mut state = *self.state.lock();
        state.set(flag, on);
        self.set_state(state);
    }

    /// The image currently displayed.
    pub fn image(&self) -> Option<Arc<RenderedIcon>> {
        self.image.lock().clone()
    }

    /// How many times the displayed image was replaced.
    pub fn image_updates(&self) -> usize {
        self.image_updates.load(Ordering::SeqCst)
    }
}

impl IconWidget for HeadlessWidget {
    fn current_state(&self) -> WidgetState {
        *self.state.lock()
    }

    fn state_changed(&self) -> &Signal<WidgetState> {
        &self.state_changed
    }

    fn set_image(&self, image: Arc<RenderedIcon>) {
        *self.image.lock() = Some(image);
        self.image_updates.fetch_add(1, Ordering::SeqCst);
    }

    fn theme_foregrounds(&self) -> Option<ThemeForegrounds> {
        self.theme.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_state_emits_only_on_change() {
        let widget = HeadlessWidget::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        widget
            .state_changed()
            .connect(move |state| sink.lock().push(*state));

        widget.set_state(WidgetState::HOVER);
        widget.set_state(WidgetState::HOVER);
        widget.set_flag(WidgetState::PRESSED, true);
        widget.set_flag(WidgetState::HOVER, false);

        assert_eq!(
            *seen.lock(),
            vec![
                WidgetState::HOVER,
                WidgetState::HOVER | WidgetState::PRESSED,
                WidgetState::PRESSED,
            ]
        );
        assert_eq!(widget.current_state(), WidgetState::PRESSED);
    }
}
