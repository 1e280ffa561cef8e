//! One-shot prompts built on [`Menu`].

use crate::{
    application::services::{menu::Menu, session::Session},
    domain::{MenuOutcome, Signal},
    error::MenuResult,
};

const YES: &str = "yes";

/// Let the user pick one of `options`.
///
/// A trailing "Cancel" entry is added. Returns `None` on Cancel or Ctrl+C.
pub fn select<S: AsRef<str>>(
    session: &mut Session,
    title: &str,
    options: &[S],
) -> MenuResult<Option<String>> {
    let mut menu = Menu::new(title);
    for option in options {
        let value = option.as_ref().to_owned();
        menu = menu.item(value.clone(), move |_| Ok(Signal::Value(value.clone())));
    }
    menu = menu.item("Cancel", |_| Ok(Signal::Exit));

    Ok(menu.run(session)?.into_value())
}

/// Ask a yes/no question. Anything but an explicit "Yes" is `false`.
pub fn confirm(session: &mut Session, question: &str) -> MenuResult<bool> {
    let outcome = Menu::new(question)
        .item("Yes", |_| Ok(Signal::Value(YES.into())))
        .item("No", |_| Ok(Signal::Exit))
        .run(session)?;
    Ok(outcome == MenuOutcome::Value(YES.into()))
}
