//! The toolkit menus.
//!
//! Each feature area is a plain [`Menu`] whose actions shell out or read the
//! filesystem, write their result to the session and pause so it can be read.

mod external;
mod folders;
mod git;
mod project;
mod settings;

use std::io::{self, Write};

use owo_colors::OwoColorize;

use magic_core::application::{Menu, Session};
use magic_core::domain::Signal;

use crate::config::AppConfig;

/// The root menu.
pub fn main_menu(config: &AppConfig) -> Menu {
    let config = config.clone();
    Menu::new("Main Menu")
        .submenu("Git Operations", git::menu)
        .item("Show Project Structure", project::show_structure)
        .item("Navigate Folders", folders::navigate)
        .submenu("Settings", move || settings::menu(&config))
        .item("Exit", |_| Ok(Signal::Exit))
}

/// Print `title` and `body` below the menu, one `\r\n`-terminated line at a
/// time so the layout holds whether or not raw mode is still on.
fn section(session: &mut Session, title: &str, body: &str) -> io::Result<()> {
    let color = session.settings().color;
    let out = session.out();
    if color {
        write!(out, "\r\n{}\r\n", title.cyan().bold())?;
    } else {
        write!(out, "\r\n{title}\r\n")?;
    }
    for line in body.lines() {
        write!(out, "{line}\r\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_adapters::{FixedSize, MemoryOutput, ScriptedKeys};
    use magic_core::domain::{DisplaySettings, KeyEvent};

    #[test]
    fn main_menu_entries() {
        let menu = main_menu(&AppConfig::default());
        let labels: Vec<_> = menu.items().iter().map(|i| i.label()).collect();
        assert_eq!(
            labels,
            [
                "Git Operations",
                "Show Project Structure",
                "Navigate Folders",
                "Settings",
                "Exit"
            ]
        );
        assert!(menu.items()[0].is_submenu());
    }

    #[test]
    fn exit_is_last_and_ends_the_menu() {
        let out = MemoryOutput::new();
        let mut session = Session::builder()
            .settings(DisplaySettings::plain())
            .keys(Box::new(ScriptedKeys::raw([KeyEvent::End, KeyEvent::Enter])))
            .output(Box::new(out.clone()))
            .size_source(Box::new(FixedSize::new(80, 24)))
            .build()
            .unwrap();
        let outcome = main_menu(&AppConfig::default()).run(&mut session).unwrap();
        assert_eq!(outcome, magic_core::domain::MenuOutcome::Exited);
        assert!(out.contents().contains("5. Exit"));
    }

    #[test]
    fn section_uses_crlf() {
        let out = MemoryOutput::new();
        let mut session = Session::builder()
            .settings(DisplaySettings::plain())
            .keys(Box::new(ScriptedKeys::raw([])))
            .output(Box::new(out.clone()))
            .build()
            .unwrap();
        section(&mut session, "Status", "a\nb\n").unwrap();
        assert_eq!(out.contents(), "\r\nStatus\r\na\r\nb\r\n");
    }
}
