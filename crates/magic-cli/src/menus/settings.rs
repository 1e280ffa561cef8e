//! Settings: read-only view of the active configuration and terminal.

use std::fmt::Write as _;

use magic_core::application::services::CONTINUE_PROMPT;
use magic_core::application::{Menu, Session};
use magic_core::domain::{ActionResult, Signal};

use super::section;
use crate::config::AppConfig;

pub fn menu(config: &AppConfig) -> Menu {
    let config = config.clone();
    Menu::new("Settings")
        .item("Show Configuration", move |s| {
            let text = config.to_toml()?;
            section(s, "Configuration", &text)?;
            s.pause(CONTINUE_PROMPT)?;
            Ok(Signal::Stay)
        })
        .item("Show Config File Location", |s| {
            let path = AppConfig::config_path();
            let state = if path.exists() { "found" } else { "not created" };
            section(s, "Config File", &format!("{} ({state})", path.display()))?;
            s.pause(CONTINUE_PROMPT)?;
            Ok(Signal::Stay)
        })
        .item("Show Terminal", show_terminal)
        .item("Back", |_| Ok(Signal::Exit))
}

fn show_terminal(session: &mut Session) -> ActionResult {
    let text = terminal_report(session);
    section(session, "Terminal", &text)?;
    session.pause(CONTINUE_PROMPT)?;
    Ok(Signal::Stay)
}

fn terminal_report(session: &Session) -> String {
    let settings = session.settings();
    let size = session.terminal().size();
    let visible = session.terminal().visible_count(settings.chrome_lines());
    let degraded = settings.plain || session.terminal().is_degraded(settings.min_height);

    let mut text = String::new();
    let _ = writeln!(text, "Size:          {}x{}", size.width, size.height);
    let _ = writeln!(text, "Input:         {}", session.input_mode());
    let _ = writeln!(text, "Visible items: {visible}");
    let _ = writeln!(
        text,
        "Layout:        {}",
        if degraded { "listing" } else { "interactive" }
    );
    let _ = writeln!(text, "Colour:        {}", on_off(settings.color));
    let _ = writeln!(text, "Unicode:       {}", on_off(settings.unicode));
    text
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
