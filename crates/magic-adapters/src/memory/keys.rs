//! Scripted key reader.

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use magic_core::application::ports::KeyReader;
use magic_core::domain::{InputMode, KeyEvent};
use magic_core::error::MenuResult;

use super::lock;

/// Replays a fixed list of events.
///
/// When the script runs dry it behaves like closed input and returns
/// [`KeyEvent::CtrlC`], unless [`fail_when_exhausted`](Self::fail_when_exhausted)
/// asked for an I/O error instead.
#[derive(Debug, Clone)]
pub struct ScriptedKeys {
    inner: Arc<Mutex<Script>>,
}

#[derive(Debug)]
struct Script {
    mode: InputMode,
    events: VecDeque<KeyEvent>,
    active: bool,
    rounds: usize,
    fail_when_exhausted: bool,
}

impl ScriptedKeys {
    /// Raw-mode reader replaying `events`.
    pub fn raw(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self::with_mode(InputMode::Raw, events)
    }

    /// Line-mode reader replaying `events`.
    pub fn line(events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self::with_mode(InputMode::Line, events)
    }

    fn with_mode(mode: InputMode, events: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Script {
                mode,
                events: events.into_iter().collect(),
                active: false,
                rounds: 0,
                fail_when_exhausted: false,
            })),
        }
    }

    /// Return an I/O error once the script is used up.
    pub fn fail_when_exhausted(self) -> Self {
        lock(&self.inner).fail_when_exhausted = true;
        self
    }

    /// `true` between `enter` and `leave`, i.e. while "raw mode" is on.
    pub fn is_active(&self) -> bool {
        lock(&self.inner).active
    }

    /// Number of interactive rounds entered so far.
    pub fn rounds(&self) -> usize {
        lock(&self.inner).rounds
    }

    /// Events not consumed yet.
    pub fn remaining(&self) -> usize {
        lock(&self.inner).events.len()
    }
}

impl KeyReader for ScriptedKeys {
    fn mode(&self) -> InputMode {
        lock(&self.inner).mode
    }

    fn enter(&mut self) -> MenuResult<()> {
        let mut script = lock(&self.inner);
        script.active = true;
        script.rounds += 1;
        Ok(())
    }

    fn leave(&mut self) -> MenuResult<()> {
        lock(&self.inner).active = false;
        Ok(())
    }

    fn read_event(&mut self) -> MenuResult<KeyEvent> {
        let mut script = lock(&self.inner);
        match script.events.pop_front() {
            Some(event) => Ok(event),
            None if script.fail_when_exhausted => {
                Err(io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted").into())
            }
            None => Ok(KeyEvent::CtrlC),
        }
    }
}
