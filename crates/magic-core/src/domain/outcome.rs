//! Control signals exchanged between actions, menus and their callers.

use std::fmt;

/// Error type an item action may fail with.
///
/// The engine only relies on `Display` and the `source()` chain; the
/// concrete error taxonomy belongs to whoever wrote the action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Result of running an item action.
pub type ActionResult = Result<Signal, ActionError>;

/// What an action asks its menu to do next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Signal {
    /// Stay in this menu and repaint it.
    #[default]
    Stay,
    /// Leave this menu.
    Exit,
    /// Leave this menu, handing a value to whoever ran it.
    Value(String),
}

/// How a [`Menu::run`](crate::application::Menu::run) ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// An action returned [`Signal::Exit`].
    Exited,
    /// The user pressed Ctrl+C (or Escape, if configured).
    Cancelled,
    /// An action returned [`Signal::Value`].
    Value(String),
}

impl MenuOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The propagated value, if any.
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for MenuOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited => write!(f, "exited"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Value(v) => write!(f, "value({v})"),
        }
    }
}

/// Result of one navigation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index of the confirmed item.
    Selected(usize),
    Cancelled,
}
