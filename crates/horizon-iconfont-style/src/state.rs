//! Widget interaction state flags.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The set of state flags a widget currently has.
    ///
    /// Flag names follow the usual toolkit widget states; `focused`,
    /// `checked` and `hovered` are accepted as aliases when parsing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WidgetState: u16 {
        const ACTIVE = 1 << 0;
        const ALTERNATE = 1 << 1;
        const BACKGROUND = 1 << 2;
        const DISABLED = 1 << 3;
        const FOCUS = 1 << 4;
        const HOVER = 1 << 5;
        const INVALID = 1 << 6;
        const PRESSED = 1 << 7;
        const READONLY = 1 << 8;
        const SELECTED = 1 << 9;
    }
}

const FLAG_NAMES: &[(&str, WidgetState)] = &[
    ("active", WidgetState::ACTIVE),
    ("alternate", WidgetState::ALTERNATE),
    ("background", WidgetState::BACKGROUND),
    ("disabled", WidgetState::DISABLED),
    ("focus", WidgetState::FOCUS),
    ("hover", WidgetState::HOVER),
    ("invalid", WidgetState::INVALID),
    ("pressed", WidgetState::PRESSED),
    ("readonly", WidgetState::READONLY),
    ("selected", WidgetState::SELECTED),
];

const ALIASES: &[(&str, WidgetState)] = &[
    ("focused", WidgetState::FOCUS),
    ("checked", WidgetState::SELECTED),
    ("hovered", WidgetState::HOVER),
];

impl WidgetState {
    /// Look up a single flag by name, case-insensitively.
    pub fn from_flag_name(name: &str) -> Option<Self> {
        FLAG_NAMES
            .iter()
            .chain(ALIASES)
            .find(|(flag, _)| flag.eq_ignore_ascii_case(name))
            .map(|(_, state)| *state)
    }

    /// Canonical names of the flags that are set, in declaration order.
    pub fn flag_names(self) -> impl Iterator<Item = &'static str> {
        FLAG_NAMES
            .iter()
            .filter(move |(_, state)| self.contains(*state))
            .map(|(name, _)| *name)
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.flag_names().collect();
        if names.is_empty() {
            write!(f, "normal")
        } else {
            write!(f, "{}", names.join(" "))
        }
    }
}
