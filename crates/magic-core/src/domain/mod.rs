//! Domain layer: plain values with no I/O.
//!
//! - [`KeyEvent`] / [`InputMode`]: what input readers produce
//! - [`Viewport`]: the scroll window and its invariant
//! - [`DisplaySettings`]: the explicit configuration object
//! - [`Signal`] / [`MenuOutcome`] / [`Choice`]: control flow between layers

pub mod key;
pub mod outcome;
pub mod settings;
pub mod viewport;

pub use key::{InputMode, KeyEvent};
pub use outcome::{ActionError, ActionResult, Choice, MenuOutcome, Signal};
pub use settings::{DisplaySettings, LAYOUT_LINES};
pub use viewport::Viewport;
