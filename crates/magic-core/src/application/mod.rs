//! Application layer for the menu engine.
//!
//! This layer contains:
//! - **Ports**: what the engine needs from the outside (keys, size, error display)
//! - **Services**: session, size cache, renderer, navigation and menus
//!
//! Nothing here touches a real terminal directly; every byte goes through
//! the session's output sink and every key through its [`KeyReader`].

pub mod ports;
pub mod services;

pub use services::{
    Interactive, Menu, MenuItem, MenuNavigation, MenuRenderer, Session, SessionBuilder,
    TerminalInfo, TerminalSize, prompts,
};

pub use ports::{ErrorReporter, KeyReader, PlainReporter, SizeSource};
