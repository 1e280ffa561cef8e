//! Logical input events.
//!
//! A [`KeyEvent`] is what one blocking read of a [`KeyReader`] produces,
//! whichever backend is active. Raw escape sequences and typed lines never
//! leave the adapter that decoded them.
//!
//! [`KeyReader`]: crate::application::ports::KeyReader

use std::fmt;

/// A single logical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Enter,
    Escape,
    /// A 1-based number. Raw readers produce single digits; the line reader
    /// produces whatever positive number was typed.
    Digit(usize),
    /// Ctrl+C (or end of input), delivered as a normal event.
    CtrlC,
    /// The terminal changed size; any cached dimensions are stale.
    Resize,
    Other,
}

impl KeyEvent {
    /// `true` for events that only move the selection.
    pub fn is_movement(self) -> bool {
        matches!(
            self,
            Self::Up | Self::Down | Self::PageUp | Self::PageDown | Self::Home | Self::End
        )
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::PageUp => write!(f, "page-up"),
            Self::PageDown => write!(f, "page-down"),
            Self::Home => write!(f, "home"),
            Self::End => write!(f, "end"),
            Self::Enter => write!(f, "enter"),
            Self::Escape => write!(f, "escape"),
            Self::Digit(n) => write!(f, "digit({n})"),
            Self::CtrlC => write!(f, "ctrl-c"),
            Self::Resize => write!(f, "resize"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Which input protocol a reader speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Cbreak/no-echo key capture: arrows, Enter, Escape, Ctrl+C.
    Raw,
    /// Line-buffered fallback: a typed number then Enter.
    Line,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Line => write!(f, "line"),
        }
    }
}
