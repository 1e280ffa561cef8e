//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the menu engine needs from the terminal and from
//! the rest of the toolkit. The `magic-adapters` crate provides the input and
//! size implementations.

use std::error::Error;
use std::io::{self, Write};

use crate::domain::{InputMode, KeyEvent};
use crate::error::MenuResult;

/// Port for keyboard input.
///
/// Implemented by:
/// - `magic_adapters::input::CrosstermKeyReader` (raw mode)
/// - `magic_adapters::input::LineKeyReader` (numeric fallback)
/// - `magic_adapters::memory::ScriptedKeys` (testing)
///
/// ## Contract
///
/// - `read_event` blocks until one complete logical event is available and
///   never returns half an escape sequence.
/// - Ctrl+C is returned as [`KeyEvent::CtrlC`], never raised asynchronously.
/// - `enter`/`leave` bracket a navigation round; `leave` must undo whatever
///   `enter` changed and be safe to call when `enter` was not.
pub trait KeyReader {
    /// The protocol this reader speaks.
    fn mode(&self) -> InputMode;

    /// Switch the terminal into the reader's input mode.
    fn enter(&mut self) -> MenuResult<()>;

    /// Restore the terminal's previous input mode.
    fn leave(&mut self) -> MenuResult<()>;

    /// Block until one logical event is available.
    fn read_event(&mut self) -> MenuResult<KeyEvent>;
}

/// Port for querying the terminal size.
///
/// Implemented by:
/// - `magic_adapters::terminal::CrosstermSize` (production)
/// - `magic_adapters::memory::FixedSize` (testing)
///
/// Callers go through [`TerminalInfo`](crate::application::TerminalInfo),
/// which caches and rate-limits queries and absorbs failures.
#[cfg_attr(test, mockall::automock)]
pub trait SizeSource {
    /// Current `(columns, rows)`.
    fn query(&self) -> io::Result<(u16, u16)>;
}

/// Port for showing a failed action to the user.
///
/// The CLI provides a coloured implementation with suggestions; the engine
/// only knows that errors display as text.
pub trait ErrorReporter {
    /// Write a human-readable description of `error` to `out`.
    fn report(&self, out: &mut dyn Write, error: &(dyn Error + 'static)) -> io::Result<()>;
}

/// Minimal reporter: `Error: <message>` on its own line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainReporter;

impl ErrorReporter for PlainReporter {
    fn report(&self, out: &mut dyn Write, error: &(dyn Error + 'static)) -> io::Result<()> {
        write!(out, "\r\nError: {error}\r\n")?;
        out.flush()
    }
}
