//! Capturing output sink.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use super::lock;

/// Collects everything written to it.
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    inner: Arc<Mutex<Sink>>,
}

#[derive(Debug, Default)]
struct Sink {
    bytes: Vec<u8>,
    fail_after: Option<usize>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that accepts `limit` bytes and then fails every write.
    pub fn failing_after(limit: usize) -> Self {
        let out = Self::default();
        lock(&out.inner).fail_after = Some(limit);
        out
    }

    /// Everything written so far, escape sequences included.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.inner).bytes).into_owned()
    }

    /// [`contents`](Self::contents) with ANSI sequences removed.
    pub fn plain_text(&self) -> String {
        console::strip_ansi_codes(&self.contents()).into_owned()
    }

    pub fn clear(&self) {
        lock(&self.inner).bytes.clear();
    }
}

impl Write for MemoryOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut sink = lock(&self.inner);
        if let Some(limit) = sink.fail_after {
            if sink.bytes.len() + buf.len() > limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
            }
        }
        sink.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
