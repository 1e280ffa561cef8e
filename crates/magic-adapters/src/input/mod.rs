//! Key reader adapters and the capability probe that picks one.

mod line;
mod raw;

use std::fmt;
use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::{info, warn};

use magic_core::application::ports::KeyReader;
use magic_core::error::{MenuError, MenuResult};

pub use line::LineKeyReader;
pub use raw::CrosstermKeyReader;

/// Which reader the caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputPreference {
    /// Raw keys when stdin is a terminal that accepts raw mode, else lines.
    #[default]
    Auto,
    /// Raw keys or nothing.
    Raw,
    /// Always numeric line input.
    Line,
}

impl fmt::Display for InputPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Raw => write!(f, "raw"),
            Self::Line => write!(f, "line"),
        }
    }
}

impl FromStr for InputPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "raw" => Ok(Self::Raw),
            "line" => Ok(Self::Line),
            other => Err(format!("unknown input mode '{other}' (expected auto, raw or line)")),
        }
    }
}

/// Pick a key reader for the process's stdin.
///
/// Fails only when `Raw` is demanded and raw capture is unavailable; `Auto`
/// falls back to line input instead.
pub fn probe(preference: InputPreference) -> MenuResult<Box<dyn KeyReader>> {
    let reader: Box<dyn KeyReader> = match preference {
        InputPreference::Line => Box::new(LineKeyReader::new(io::stdin().lock())),
        _ => match (preference, raw_capability()) {
            (_, Ok(())) => Box::new(CrosstermKeyReader::new()),
            (InputPreference::Raw, Err(reason)) => {
                return Err(MenuError::NoInputMode { reason });
            }
            (_, Err(reason)) => {
                warn!(%reason, "Raw key capture unavailable, using numeric input");
                Box::new(LineKeyReader::new(io::stdin().lock()))
            }
        },
    };
    info!(%preference, mode = %reader.mode(), "Input mode selected");
    Ok(reader)
}

fn raw_capability() -> Result<(), String> {
    if !io::stdin().is_terminal() {
        return Err("stdin is not a terminal".into());
    }
    crossterm::terminal::enable_raw_mode()
        .and_then(|()| crossterm::terminal::disable_raw_mode())
        .map_err(|e| format!("cannot switch terminal to raw mode: {e}"))
}
