//! Menus: one navigational level and its interaction loop.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::services::{
        navigation::MenuNavigation, renderer::MenuRenderer, session::Session,
    },
    domain::{ActionResult, Choice, MenuOutcome, Signal},
    error::{MenuError, MenuResult},
};

/// Prompt shown after an action failed, before the menu repaints.
pub const CONTINUE_PROMPT: &str = "Press any key to continue...";

type Action = Box<dyn FnMut(&mut Session) -> ActionResult>;
type Builder = Box<dyn Fn() -> Menu>;

enum ItemKind {
    Action(Action),
    Submenu(Builder),
}

/// A labelled entry bound to an action or to a child menu.
pub struct MenuItem {
    label: String,
    kind: ItemKind,
}

impl MenuItem {
    /// An item that runs `action` when chosen.
    ///
    /// The action gets the session so it can write output, pause, or run a
    /// nested menu of its own.
    pub fn new(
        label: impl Into<String>,
        action: impl FnMut(&mut Session) -> ActionResult + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            kind: ItemKind::Action(Box::new(action)),
        }
    }

    /// An item that builds a fresh child menu each time it is chosen and
    /// runs it to completion.
    pub fn submenu(label: impl Into<String>, build: impl Fn() -> Menu + 'static) -> Self {
        Self {
            label: label.into(),
            kind: ItemKind::Submenu(Box::new(build)),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_submenu(&self) -> bool {
        matches!(self.kind, ItemKind::Submenu(_))
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("submenu", &self.is_submenu())
            .finish()
    }
}

/// A titled list of items.
///
/// Behaviour lives entirely in the items; a feature area is a `Menu` built
/// with a different item list.
#[derive(Debug)]
pub struct Menu {
    title: String,
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Add an action item.
    pub fn item(
        mut self,
        label: impl Into<String>,
        action: impl FnMut(&mut Session) -> ActionResult + 'static,
    ) -> Self {
        self.items.push(MenuItem::new(label, action));
        self
    }

    /// Add an item that opens a child menu.
    pub fn submenu(mut self, label: impl Into<String>, build: impl Fn() -> Menu + 'static) -> Self {
        self.items.push(MenuItem::submenu(label, build));
        self
    }

    pub fn push(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Run the interaction loop until an action exits, returns a value, or
    /// the user cancels.
    ///
    /// - Action errors are shown through the session's reporter; the loop
    ///   then waits for a key and repaints. They never leave this frame.
    /// - A child menu's outcome, cancellation included, returns control
    ///   here; this menu repaints in full and keeps its selection.
    /// - A child menu with no items is reported like a failed action.
    /// - Other engine faults (terminal I/O, no input mode) propagate.
    #[instrument(skip_all, fields(menu = %self.title))]
    pub fn run(&mut self, session: &mut Session) -> MenuResult<MenuOutcome> {
        let mut nav = MenuNavigation::new(&self.title, self.items.len())?;
        let mut renderer = MenuRenderer::new(self.title.clone());

        session.push_crumb(&self.title);
        let outcome = self.run_loop(session, &mut nav, &mut renderer);
        session.pop_crumb();

        if let Ok(outcome) = &outcome {
            info!(%outcome, "Menu finished");
        }
        outcome
    }

    fn run_loop(
        &mut self,
        session: &mut Session,
        nav: &mut MenuNavigation,
        renderer: &mut MenuRenderer,
    ) -> MenuResult<MenuOutcome> {
        loop {
            let index = match nav.get_choice(session, renderer, &self.items)? {
                Choice::Selected(index) => index,
                Choice::Cancelled => return Ok(MenuOutcome::Cancelled),
            };

            let item = &mut self.items[index];
            debug!(index, label = %item.label, "Item chosen");

            let result = match &mut item.kind {
                ItemKind::Action(action) => action(session),
                ItemKind::Submenu(build) => match build().run(session) {
                    Ok(outcome) => {
                        debug!(%outcome, "Returned from submenu");
                        Ok(Signal::Stay)
                    }
                    Err(e @ MenuError::EmptyMenu { .. }) => Err(e.into()),
                    Err(e) => return Err(e),
                },
            };
            renderer.reset();

            match result {
                Ok(Signal::Stay) => {}
                Ok(Signal::Exit) => return Ok(MenuOutcome::Exited),
                Ok(Signal::Value(value)) => return Ok(MenuOutcome::Value(value)),
                Err(e) => {
                    warn!(error = %e, label = %self.items[index].label, "Action failed");
                    session.report_error(e.as_ref());
                    session.pause(CONTINUE_PROMPT)?;
                }
            }
        }
    }
}
