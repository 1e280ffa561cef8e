//! Application ports (traits) for external dependencies.
//!
//! Ports define what the engine needs from the outside world. Adapters in
//! `magic-adapters` implement them; the CLI implements the error reporter.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the engine, implemented by infrastructure
//!   - `KeyReader`: one logical key event per blocking read
//!   - `SizeSource`: raw terminal size query
//!   - `ErrorReporter`: formats action failures for the user
//!
//! - **Driving (Input) Ports**: `Menu::run` and the `prompts` helpers, called
//!   by the process entry point and by item actions.

pub mod output;

pub use output::{ErrorReporter, KeyReader, PlainReporter, SizeSource};
