//! Raw-mode key reader backed by crossterm.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tracing::{debug, warn};

use magic_core::application::ports::KeyReader;
use magic_core::domain::{InputMode, KeyEvent};
use magic_core::error::MenuResult;

/// Cbreak/no-echo key capture on the controlling terminal.
///
/// crossterm resolves escape sequences (including a lone Escape press)
/// before handing over an event, so a read never yields half a sequence.
#[derive(Debug, Default)]
pub struct CrosstermKeyReader {
    /// Raw mode was switched on by us and must be switched off by us.
    enabled: bool,
}

impl CrosstermKeyReader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyReader for CrosstermKeyReader {
    fn mode(&self) -> InputMode {
        InputMode::Raw
    }

    fn enter(&mut self) -> MenuResult<()> {
        if !self.enabled && !terminal::is_raw_mode_enabled()? {
            terminal::enable_raw_mode()?;
            self.enabled = true;
            debug!("Raw mode enabled");
        }
        Ok(())
    }

    fn leave(&mut self) -> MenuResult<()> {
        if self.enabled {
            self.enabled = false;
            terminal::disable_raw_mode()?;
            debug!("Raw mode disabled");
        }
        Ok(())
    }

    fn read_event(&mut self) -> MenuResult<KeyEvent> {
        loop {
            if let Some(key) = decode(event::read()?) {
                return Ok(key);
            }
        }
    }
}

impl Drop for CrosstermKeyReader {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            warn!(error = %e, "Failed to leave raw mode");
        }
    }
}

/// Map one terminal event to a logical key. `None` means "not a key press,
/// keep reading".
///
/// Resizes come through as [`KeyEvent::Resize`] so the navigation loop wakes
/// up, drops its cached size and repaints.
pub(crate) fn decode(event: Event) -> Option<KeyEvent> {
    let key = match event {
        Event::Key(key) => key,
        Event::Resize(..) => return Some(KeyEvent::Resize),
        _ => return None,
    };
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    Some(match key.code {
        KeyCode::Char('c' | 'd') if ctrl => KeyEvent::CtrlC,
        KeyCode::Up => KeyEvent::Up,
        KeyCode::Down => KeyEvent::Down,
        KeyCode::Char('p') if ctrl => KeyEvent::Up,
        KeyCode::Char('n') if ctrl => KeyEvent::Down,
        KeyCode::PageUp => KeyEvent::PageUp,
        KeyCode::PageDown => KeyEvent::PageDown,
        KeyCode::Home => KeyEvent::Home,
        KeyCode::End => KeyEvent::End,
        KeyCode::Enter => KeyEvent::Enter,
        KeyCode::Esc => KeyEvent::Escape,
        KeyCode::Char(c @ '1'..='9') => KeyEvent::Digit(c as usize - '0' as usize),
        _ => KeyEvent::Other,
    })
}
