//! Application services - the menu engine proper.
//!
//! [`Menu`] drives [`MenuNavigation`], which reads through the session's
//! key reader and paints through [`MenuRenderer`]; [`TerminalInfo`] feeds
//! both the current size.

pub mod menu;
pub mod navigation;
pub mod prompts;
pub mod renderer;
pub mod session;
pub mod terminal_info;

pub use menu::{CONTINUE_PROMPT, Menu, MenuItem};
pub use navigation::{MenuNavigation, NavContext, NavState, Transition};
pub use renderer::MenuRenderer;
pub use session::{Interactive, Session, SessionBuilder};
pub use terminal_info::{TerminalInfo, TerminalSize};
