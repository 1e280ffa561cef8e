//! In-memory adapters for testing.
//!
//! All three are cheap `Clone` handles over shared state, so a test can hand
//! one copy to the [`Session`](magic_core::application::Session) and keep
//! another to inspect afterwards.

mod keys;
mod output;
mod size;

pub use keys::ScriptedKeys;
pub use output::MemoryOutput;
pub use size::FixedSize;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock ignoring poison: a panicking test already failed.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
