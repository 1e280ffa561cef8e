//! Infrastructure adapters for Magic.
//!
//! This crate implements the ports defined in `magic_core::application::ports`.
//! It contains all direct terminal I/O.

pub mod input;
pub mod memory;
pub mod terminal;

// Re-export commonly used adapters
pub use input::{CrosstermKeyReader, InputPreference, LineKeyReader, probe};
pub use memory::{FixedSize, MemoryOutput, ScriptedKeys};
pub use terminal::CrosstermSize;
