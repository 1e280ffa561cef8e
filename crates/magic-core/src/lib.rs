//! Magic Core - terminal menu engine
//!
//! Interactive, keyboard-navigated menus for a terminal toolkit: arrow-key
//! selection with a scrolling viewport, minimal-diff redraws, a numeric
//! fallback when raw key capture is unavailable, and nested submenus.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            magic-cli (binary)           │
//! │   (config, logging, toolkit menus)      │
//! └──────────────────┬──────────────────────┘
//!                    │ builds Session, runs Menu
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  Menu → MenuNavigation → MenuRenderer   │
//! │        Session, TerminalInfo            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  KeyReader, SizeSource, ErrorReporter   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     magic-adapters (Infrastructure)     │
//! │ crossterm keys, line reader, test fakes │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use magic_core::prelude::*;
//!
//! # fn keys() -> Box<dyn KeyReader> { unimplemented!() }
//! let mut session = Session::builder()
//!     .settings(DisplaySettings::default())
//!     .keys(keys())
//!     .build()?;
//!
//! let outcome = Menu::new("Main Menu")
//!     .item("Say hello", |s: &mut Session| {
//!         write!(s.out(), "hello\r\n")?;
//!         Ok(Signal::Stay)
//!     })
//!     .item("Exit", |_| Ok(Signal::Exit))
//!     .run(&mut session)?;
//! # Ok::<(), MenuError>(())
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ErrorReporter, KeyReader, Menu, MenuItem, PlainReporter, Session, SizeSource, prompts,
    };
    pub use crate::domain::{
        ActionError, ActionResult, DisplaySettings, InputMode, KeyEvent, MenuOutcome, Signal,
    };
    pub use crate::error::{MenuError, MenuResult};
    pub use std::io::Write as _;
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
