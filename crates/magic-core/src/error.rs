//! Error handling for the menu engine.
//!
//! Only faults the engine cannot recover from locally end up here. Terminal
//! size failures and undecodable keys are absorbed by the lowest layer that
//! can pick a safe default; action failures are reported and the menu loop
//! carries on; cancellation is an outcome, not an error.

use thiserror::Error;

/// Root error type for engine operations.
#[derive(Debug, Error)]
pub enum MenuError {
    /// A menu was run with no items.
    #[error("Menu '{title}' has no items")]
    EmptyMenu { title: String },

    /// Neither raw key capture nor line input could be set up.
    #[error("No usable input mode: {reason}")]
    NoInputMode { reason: String },

    /// Writing to the terminal or reading from the input failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl MenuError {
    /// User-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyMenu { title } => vec![
                format!("The '{}' menu was built without entries", title),
                "This is a bug in the menu definition".into(),
            ],
            Self::NoInputMode { reason } => vec![
                format!("Input setup failed: {}", reason),
                "Run magic from an interactive terminal".into(),
                "Or force numeric input with --input line".into(),
            ],
            Self::Io(_) => vec![
                "The terminal stopped accepting input or output".into(),
                "Check that stdin/stdout are still attached".into(),
            ],
        }
    }

    /// `true` for the one condition that must abort the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NoInputMode { .. })
    }
}

/// Convenient result type alias.
pub type MenuResult<T> = Result<T, MenuError>;
