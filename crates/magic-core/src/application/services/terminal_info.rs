//! Cached terminal dimensions.
//!
//! Queries go through [`TerminalInfo::refresh`], which the navigation loop
//! calls once at the start of each iteration. Rendering only ever reads the
//! cached value, so a frame never re-queries halfway through.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::application::ports::SizeSource;

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

impl TerminalSize {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl From<(u16, u16)> for TerminalSize {
    fn from((width, height): (u16, u16)) -> Self {
        Self::new(width, height)
    }
}

/// Size cache with rate-limited, failure-tolerant re-queries.
pub struct TerminalInfo {
    source: Box<dyn SizeSource>,
    cached: Option<TerminalSize>,
    checked_at: Option<Instant>,
    interval: Duration,
    fallback: TerminalSize,
    warned: bool,
}

impl TerminalInfo {
    /// Create a cache over `source`. Nothing is queried until the first
    /// [`refresh`](Self::refresh).
    pub fn new(source: Box<dyn SizeSource>, interval: Duration, fallback: (u16, u16)) -> Self {
        Self {
            source,
            cached: None,
            checked_at: None,
            interval,
            fallback: fallback.into(),
            warned: false,
        }
    }

    /// Last known size, or the fallback if none is known yet.
    pub fn size(&self) -> TerminalSize {
        self.cached.unwrap_or(self.fallback)
    }

    /// Force the next [`refresh`](Self::refresh) to query.
    pub fn invalidate(&mut self) {
        self.checked_at = None;
    }

    /// Re-query if the cache is dirty or the interval elapsed.
    ///
    /// Returns `true` if the known size changed. Failures keep the
    /// last-known (or fallback) size and are logged once.
    pub fn refresh(&mut self) -> bool {
        let due = match self.checked_at {
            None => true,
            Some(at) => at.elapsed() >= self.interval,
        };
        if !due {
            return false;
        }
        self.checked_at = Some(Instant::now());

        let previous = self.size();
        match self.source.query() {
            Ok((w, h)) if w > 0 && h > 0 => {
                self.cached = Some(TerminalSize::new(w, h));
            }
            Ok((w, h)) => self.query_failed(&format!("terminal reported {w}x{h}")),
            Err(e) => self.query_failed(&e.to_string()),
        }

        let changed = previous != self.size();
        if changed {
            debug!(width = self.size().width, height = self.size().height, "Terminal resized");
        }
        changed
    }

    /// Item rows available after `chrome` fixed lines, never less than one.
    pub fn visible_count(&self, chrome: u16) -> usize {
        usize::from(self.size().height.saturating_sub(chrome)).max(1)
    }

    /// `true` when the terminal is too short for the interactive layout.
    pub fn is_degraded(&self, min_height: u16) -> bool {
        self.size().height < min_height
    }

    fn query_failed(&mut self, reason: &str) {
        if self.cached.is_none() {
            self.cached = Some(self.fallback);
        }
        if !self.warned {
            self.warned = true;
            warn!(
                reason,
                width = self.size().width,
                height = self.size().height,
                "Terminal size query failed, using last known size"
            );
        }
    }
}

impl std::fmt::Debug for TerminalInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalInfo")
            .field("cached", &self.cached)
            .field("interval", &self.interval)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}
