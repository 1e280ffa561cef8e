//! The terminal resources shared by every menu level.
//!
//! A [`Session`] owns the single input source, the single output sink, the
//! size cache, the display settings and the breadcrumb trail. It is passed by
//! `&mut` from the root menu into each action, so whichever `Menu::run` frame
//! is active has exclusive use of the terminal; parents are blocked on the
//! call stack while a child runs.

use std::error::Error;
use std::io::{self, Write};
use std::ops::{Deref, DerefMut};

use crossterm::{cursor, queue};
use tracing::{debug, warn};

use crate::{
    application::{
        ports::{ErrorReporter, KeyReader, PlainReporter, SizeSource},
        services::terminal_info::TerminalInfo,
    },
    domain::{DisplaySettings, InputMode, KeyEvent},
    error::{MenuError, MenuResult},
};

/// Shared terminal state for one interactive run.
pub struct Session {
    settings: DisplaySettings,
    terminal: TerminalInfo,
    keys: Box<dyn KeyReader>,
    out: Box<dyn Write>,
    reporter: Box<dyn ErrorReporter>,
    breadcrumb: Vec<String>,
    cursor_hidden: bool,
}

impl Session {
    /// Start building a session.
    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn terminal(&self) -> &TerminalInfo {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut TerminalInfo {
        &mut self.terminal
    }

    /// The active reader's protocol.
    pub fn input_mode(&self) -> InputMode {
        self.keys.mode()
    }

    /// The output sink. Actions write their results here.
    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    /// Titles of the menus currently on the stack, root first.
    pub fn breadcrumb(&self) -> &[String] {
        &self.breadcrumb
    }

    /// `true` while the cursor is hidden by an interactive round.
    pub fn cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    pub(crate) fn push_crumb(&mut self, title: &str) {
        self.breadcrumb.push(title.to_owned());
    }

    pub(crate) fn pop_crumb(&mut self) {
        self.breadcrumb.pop();
    }

    /// Enter the reader's input mode and hide the cursor.
    ///
    /// The returned guard restores both when dropped, whether the round ends
    /// normally, through `?`, or by unwinding.
    pub fn interactive(&mut self) -> MenuResult<Interactive<'_>> {
        self.keys.enter()?;
        let hide = self.keys.mode() == InputMode::Raw && !self.settings.plain;
        let guard = Interactive { session: self };
        if hide {
            queue!(guard.session.out, cursor::Hide)?;
            guard.session.out.flush()?;
            guard.session.cursor_hidden = true;
        }
        Ok(guard)
    }

    /// Read one event. Only meaningful inside an [`Interactive`] round.
    pub(crate) fn read_event(&mut self) -> MenuResult<KeyEvent> {
        self.keys.read_event()
    }

    /// Show `error` through the reporter. Write failures are logged, not
    /// raised; there is nowhere left to show them.
    pub fn report_error(&mut self, error: &(dyn Error + 'static)) {
        if let Err(e) = self.reporter.report(self.out.as_mut(), error) {
            warn!(error = %e, "Failed to display action error");
        }
    }

    /// Print `message` and wait for one key (or one line) so whatever is on
    /// screen stays readable before the next repaint.
    pub fn pause(&mut self, message: &str) -> MenuResult<()> {
        write!(self.out, "\r\n{message}")?;
        self.out.flush()?;
        let mut round = self.interactive()?;
        let key = round.read_event()?;
        debug!(%key, "Pause dismissed");
        Ok(())
    }

    fn restore(&mut self) {
        if self.cursor_hidden {
            let shown = queue!(self.out, cursor::Show).and_then(|()| self.out.flush());
            if let Err(e) = shown {
                warn!(error = %e, "Failed to restore cursor");
            }
            self.cursor_hidden = false;
        }
        if let Err(e) = self.keys.leave() {
            warn!(error = %e, "Failed to restore input mode");
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("settings", &self.settings)
            .field("terminal", &self.terminal)
            .field("input_mode", &self.keys.mode())
            .field("breadcrumb", &self.breadcrumb)
            .field("cursor_hidden", &self.cursor_hidden)
            .finish_non_exhaustive()
    }
}

/// A navigation round in progress. Dereferences to the [`Session`].
pub struct Interactive<'a> {
    session: &'a mut Session,
}

impl Deref for Interactive<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for Interactive<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for Interactive<'_> {
    fn drop(&mut self) {
        self.session.restore();
    }
}

/// Builder for [`Session`].
#[derive(Default)]
pub struct SessionBuilder {
    settings: Option<DisplaySettings>,
    keys: Option<Box<dyn KeyReader>>,
    out: Option<Box<dyn Write>>,
    size: Option<Box<dyn SizeSource>>,
    reporter: Option<Box<dyn ErrorReporter>>,
}

impl SessionBuilder {
    pub fn settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn keys(mut self, keys: Box<dyn KeyReader>) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn output(mut self, out: Box<dyn Write>) -> Self {
        self.out = Some(out);
        self
    }

    pub fn size_source(mut self, size: Box<dyn SizeSource>) -> Self {
        self.size = Some(size);
        self
    }

    pub fn reporter(mut self, reporter: Box<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Build the session.
    ///
    /// A key reader is required; without one the engine has no way to take
    /// input, which is the one fatal condition. Output defaults to stdout,
    /// the reporter to [`PlainReporter`], settings to their defaults. Without
    /// a size source the fallback size from the settings is used.
    pub fn build(self) -> MenuResult<Session> {
        let keys = self.keys.ok_or_else(|| MenuError::NoInputMode {
            reason: "no key reader configured".into(),
        })?;
        let size = self.size.unwrap_or_else(|| Box::new(NoTerminal));
        let settings = self.settings.unwrap_or_default();
        let terminal = TerminalInfo::new(
            size,
            settings.size_check_interval(),
            settings.fallback_size(),
        );

        Ok(Session {
            terminal,
            keys,
            out: self.out.unwrap_or_else(|| Box::new(io::stdout())),
            reporter: self.reporter.unwrap_or_else(|| Box::new(PlainReporter)),
            breadcrumb: Vec::new(),
            cursor_hidden: false,
            settings,
        })
    }
}

/// Size source for sessions that have no terminal to ask.
struct NoTerminal;

impl SizeSource for NoTerminal {
    fn query(&self) -> io::Result<(u16, u16)> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no terminal size source",
        ))
    }
}
