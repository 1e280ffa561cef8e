//! Adjustable terminal size.

use std::io;
use std::sync::{Arc, Mutex};

use magic_core::application::ports::SizeSource;

use super::lock;

/// Reports a size the test controls. `None` simulates a failed query.
#[derive(Debug, Clone)]
pub struct FixedSize {
    inner: Arc<Mutex<Option<(u16, u16)>>>,
}

impl FixedSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some((width, height)))),
        }
    }

    /// A source whose every query fails.
    pub fn unavailable() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Simulate the user resizing the window.
    pub fn resize(&self, width: u16, height: u16) {
        *lock(&self.inner) = Some((width, height));
    }
}

impl SizeSource for FixedSize {
    fn query(&self) -> io::Result<(u16, u16)> {
        (*lock(&self.inner)).ok_or_else(|| io::Error::other("no terminal attached"))
    }
}
