//! Selection state machine and the blocking choice loop.
//!
//! [`MenuNavigation::apply`] is pure: one event in, one [`Transition`] out.
//! [`MenuNavigation::get_choice`] wires it to a [`KeyReader`] and a
//! [`MenuRenderer`] inside an interactive round, so the terminal is restored
//! however the loop ends.
//!
//! [`KeyReader`]: crate::application::ports::KeyReader

use tracing::{debug, instrument};

use crate::{
    application::services::{menu::MenuItem, renderer::MenuRenderer, session::Session},
    domain::{Choice, DisplaySettings, InputMode, KeyEvent},
    error::{MenuError, MenuResult},
};

/// Where the state machine stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    AwaitingInput,
    /// Terminal: holds the chosen index.
    Confirmed(usize),
    /// Terminal: Ctrl+C, or Escape when configured.
    Cancelled,
}

/// Effect of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Selection changed; a partial redraw is due.
    Moved { from: usize, to: usize },
    Confirmed(usize),
    Cancelled,
    /// Input was understood as an attempt to choose but was not valid
    /// (out-of-range or unparseable number). Line mode re-prompts.
    Rejected,
    /// Nothing happens, nothing is redrawn.
    Ignored,
}

/// Everything besides the event that decides a transition.
#[derive(Debug, Clone, Copy)]
pub struct NavContext {
    pub mode: InputMode,
    /// Rows per page for `PageUp`/`PageDown`.
    pub page: usize,
    pub escape_cancels: bool,
    pub quick_select: bool,
}

impl NavContext {
    pub fn new(mode: InputMode, page: usize, settings: &DisplaySettings) -> Self {
        Self {
            mode,
            page: page.max(1),
            escape_cancels: settings.escape_cancels,
            quick_select: settings.quick_select,
        }
    }

    fn digits_select(&self) -> bool {
        self.mode == InputMode::Line || self.quick_select
    }
}

/// Selection over `len` items.
#[derive(Debug, Clone)]
pub struct MenuNavigation {
    selected: usize,
    len: usize,
    state: NavState,
}

impl MenuNavigation {
    /// Fails with [`MenuError::EmptyMenu`] for zero items.
    pub fn new(title: &str, len: usize) -> MenuResult<Self> {
        if len == 0 {
            return Err(MenuError::EmptyMenu {
                title: title.to_owned(),
            });
        }
        Ok(Self {
            selected: 0,
            len,
            state: NavState::AwaitingInput,
        })
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    /// Start a new round, keeping the current selection.
    pub fn reset(&mut self) {
        self.state = NavState::AwaitingInput;
    }

    /// Feed one event through the transition table.
    pub fn apply(&mut self, event: KeyEvent, ctx: &NavContext) -> Transition {
        if self.state != NavState::AwaitingInput {
            return Transition::Ignored;
        }

        let last = self.len - 1;
        let from = self.selected;
        let to = match event {
            KeyEvent::Up => (from + last) % self.len,
            KeyEvent::Down => (from + 1) % self.len,
            KeyEvent::PageUp => from.saturating_sub(ctx.page),
            KeyEvent::PageDown => (from + ctx.page).min(last),
            KeyEvent::Home => 0,
            KeyEvent::End => last,
            KeyEvent::Enter => return self.confirm(from),
            KeyEvent::Digit(n) if ctx.digits_select() => {
                if (1..=self.len).contains(&n) {
                    self.selected = n - 1;
                    return self.confirm(n - 1);
                }
                return Transition::Rejected;
            }
            KeyEvent::Digit(_) => return Transition::Ignored,
            KeyEvent::CtrlC => return self.cancel(),
            KeyEvent::Escape if ctx.escape_cancels => return self.cancel(),
            KeyEvent::Escape => return Transition::Ignored,
            KeyEvent::Resize => return Transition::Ignored,
            KeyEvent::Other if ctx.mode == InputMode::Line => return Transition::Rejected,
            KeyEvent::Other => return Transition::Ignored,
        };

        if to == from {
            return Transition::Ignored;
        }
        self.selected = to;
        Transition::Moved { from, to }
    }

    /// Run one blocking round until a choice is confirmed or cancelled.
    ///
    /// Size is re-checked at the top of every iteration; a change forces a
    /// full repaint before the next event is read. A resize event drops the
    /// cached size so that check queries right away.
    #[instrument(skip_all, fields(menu = renderer.title(), items = items.len()))]
    pub fn get_choice(
        &mut self,
        session: &mut Session,
        renderer: &mut MenuRenderer,
        items: &[MenuItem],
    ) -> MenuResult<Choice> {
        self.reset();
        let mut round = session.interactive()?;
        round.terminal_mut().invalidate();
        round.terminal_mut().refresh();
        renderer.render(&mut round, items, self.selected, true)?;

        let mut rejected = false;
        loop {
            if round.terminal_mut().refresh() {
                renderer.render(&mut round, items, self.selected, true)?;
            }
            if round.input_mode() == InputMode::Line {
                let text = if rejected {
                    format!("Please enter a number between 1 and {}: ", self.len)
                } else {
                    format!("Enter your choice (1-{}): ", self.len)
                };
                renderer.prompt(&mut round, &text)?;
            }

            let event = round.read_event()?;
            if event == KeyEvent::Resize {
                round.terminal_mut().invalidate();
            }
            let ctx = NavContext::new(round.input_mode(), renderer.page_size(), round.settings());
            let transition = self.apply(event, &ctx);
            debug!(%event, ?transition, "Navigation step");

            match transition {
                Transition::Moved { to, .. } => {
                    rejected = false;
                    renderer.render(&mut round, items, to, false)?;
                }
                Transition::Confirmed(index) => {
                    renderer.leave(&mut round)?;
                    return Ok(Choice::Selected(index));
                }
                Transition::Cancelled => {
                    renderer.leave(&mut round)?;
                    return Ok(Choice::Cancelled);
                }
                Transition::Rejected => rejected = true,
                Transition::Ignored => {}
            }
        }
    }

    fn confirm(&mut self, index: usize) -> Transition {
        self.state = NavState::Confirmed(index);
        Transition::Confirmed(index)
    }

    fn cancel(&mut self) -> Transition {
        self.state = NavState::Cancelled;
        Transition::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::session::test_support::*;
    use crate::domain::Signal;

    fn raw() -> NavContext {
        NavContext::new(InputMode::Raw, 4, &DisplaySettings::default())
    }

    fn line() -> NavContext {
        NavContext::new(InputMode::Line, 4, &DisplaySettings::default())
    }

    fn nav(len: usize) -> MenuNavigation {
        MenuNavigation::new("Test", len).unwrap()
    }

    #[test]
    fn empty_menu_is_rejected() {
        let err = MenuNavigation::new("Empty", 0).unwrap_err();
        assert!(matches!(err, MenuError::EmptyMenu { .. }));
    }

    #[test]
    fn up_from_top_wraps_to_bottom() {
        let mut n = nav(5);
        assert_eq!(n.apply(KeyEvent::Up, &raw()), Transition::Moved { from: 0, to: 4 });
        assert_eq!(n.apply(KeyEvent::Down, &raw()), Transition::Moved { from: 4, to: 0 });
    }

    #[test]
    fn n_downs_return_to_start() {
        for len in 1..=7 {
            for start in 0..len {
                let mut n = nav(len);
                n.selected = start;
                for _ in 0..len {
                    n.apply(KeyEvent::Down, &raw());
                }
                assert_eq!(n.selected(), start, "len={len} start={start}");
            }
        }
    }

    #[test]
    fn single_item_movement_is_ignored() {
        let mut n = nav(1);
        assert_eq!(n.apply(KeyEvent::Up, &raw()), Transition::Ignored);
        assert_eq!(n.apply(KeyEvent::Down, &raw()), Transition::Ignored);
    }

    #[test]
    fn page_moves_clamp() {
        let mut n = nav(10);
        assert_eq!(n.apply(KeyEvent::PageUp, &raw()), Transition::Ignored);
        n.apply(KeyEvent::PageDown, &raw());
        assert_eq!(n.selected(), 4);
        n.apply(KeyEvent::PageDown, &raw());
        n.apply(KeyEvent::PageDown, &raw());
        assert_eq!(n.selected(), 9);
        n.apply(KeyEvent::Home, &raw());
        assert_eq!(n.selected(), 0);
        n.apply(KeyEvent::End, &raw());
        assert_eq!(n.selected(), 9);
    }

    #[test]
    fn enter_confirms_current() {
        let mut n = nav(3);
        n.apply(KeyEvent::Down, &raw());
        assert_eq!(n.apply(KeyEvent::Enter, &raw()), Transition::Confirmed(1));
        assert_eq!(n.state(), NavState::Confirmed(1));
        assert_eq!(n.apply(KeyEvent::Down, &raw()), Transition::Ignored);
    }

    #[test]
    fn digits_only_select_in_line_mode() {
        let mut n = nav(5);
        assert_eq!(n.apply(KeyEvent::Digit(3), &raw()), Transition::Ignored);
        assert_eq!(n.apply(KeyEvent::Digit(3), &line()), Transition::Confirmed(2));
        assert_eq!(n.selected(), 2);
    }

    #[test]
    fn quick_select_enables_digits_in_raw_mode() {
        let settings = DisplaySettings {
            quick_select: true,
            ..DisplaySettings::default()
        };
        let ctx = NavContext::new(InputMode::Raw, 4, &settings);
        let mut n = nav(5);
        assert_eq!(n.apply(KeyEvent::Digit(5), &ctx), Transition::Confirmed(4));
    }

    #[test]
    fn out_of_range_digit_is_rejected() {
        let mut n = nav(5);
        assert_eq!(n.apply(KeyEvent::Digit(9), &line()), Transition::Rejected);
        assert_eq!(n.apply(KeyEvent::Digit(0), &line()), Transition::Rejected);
        assert_eq!(n.state(), NavState::AwaitingInput);
        assert_eq!(n.selected(), 0);
    }

    #[test]
    fn ctrl_c_cancels_and_escape_is_configurable() {
        let mut n = nav(2);
        assert_eq!(n.apply(KeyEvent::CtrlC, &raw()), Transition::Cancelled);

        let settings = DisplaySettings {
            escape_cancels: false,
            ..DisplaySettings::default()
        };
        let ctx = NavContext::new(InputMode::Raw, 4, &settings);
        let mut n = nav(2);
        assert_eq!(n.apply(KeyEvent::Escape, &ctx), Transition::Ignored);
        assert_eq!(n.apply(KeyEvent::Escape, &raw()), Transition::Cancelled);
    }

    #[test]
    fn other_is_ignored_in_raw_and_rejected_in_line() {
        let mut n = nav(2);
        assert_eq!(n.apply(KeyEvent::Other, &raw()), Transition::Ignored);
        assert_eq!(n.apply(KeyEvent::Other, &line()), Transition::Rejected);
        assert_eq!(n.apply(KeyEvent::Resize, &raw()), Transition::Ignored);
        assert_eq!(n.apply(KeyEvent::Resize, &line()), Transition::Ignored);
    }

    fn items(n: usize) -> Vec<MenuItem> {
        (1..=n)
            .map(|i| MenuItem::new(format!("Item {i}"), |_| Ok(Signal::Stay)))
            .collect()
    }

    #[test]
    fn get_choice_runs_until_confirmed() {
        let keys = Keys::raw(&[KeyEvent::Down, KeyEvent::Down, KeyEvent::Other, KeyEvent::Enter]);
        let active = keys.active.clone();
        let (mut session, buffer) = session(keys, (80, 24), interactive_settings());
        let items = items(4);
        let mut renderer = MenuRenderer::new("Main Menu");
        let mut n = nav(items.len());

        let choice = n.get_choice(&mut session, &mut renderer, &items).unwrap();
        assert_eq!(choice, Choice::Selected(2));
        assert!(!active.get());
        assert!(buffer.text().ends_with("\x1b[?25h"));
    }

    #[test]
    fn get_choice_cancel_restores_terminal() {
        let keys = Keys::raw(&[KeyEvent::Down, KeyEvent::CtrlC]);
        let active = keys.active.clone();
        let (mut session, _) = session(keys, (80, 24), interactive_settings());
        let items = items(3);
        let mut renderer = MenuRenderer::new("Main Menu");
        let mut n = nav(items.len());

        let choice = n.get_choice(&mut session, &mut renderer, &items).unwrap();
        assert_eq!(choice, Choice::Cancelled);
        assert!(!active.get());
        assert!(!session.cursor_hidden());
    }

    #[test]
    fn line_mode_reprompts_after_bad_number() {
        let mut keys = Keys::raw(&[KeyEvent::Digit(9), KeyEvent::Digit(3)]);
        keys.mode = InputMode::Line;
        let (mut session, buffer) = session(keys, (80, 24), DisplaySettings::plain());
        let items = items(5);
        let mut renderer = MenuRenderer::new("Main Menu");
        let mut n = nav(items.len());

        let choice = n.get_choice(&mut session, &mut renderer, &items).unwrap();
        assert_eq!(choice, Choice::Selected(2));
        assert!(buffer.text().contains("Please enter a number between 1 and 5"));
    }

    #[test]
    fn selection_survives_between_rounds() {
        let keys = Keys::raw(&[KeyEvent::Down, KeyEvent::Enter, KeyEvent::Enter]);
        let (mut session, _) = session(keys, (80, 24), interactive_settings());
        let items = items(3);
        let mut renderer = MenuRenderer::new("Main Menu");
        let mut n = nav(items.len());

        n.get_choice(&mut session, &mut renderer, &items).unwrap();
        let again = n.get_choice(&mut session, &mut renderer, &items).unwrap();
        assert_eq!(again, Choice::Selected(1));
    }
}
