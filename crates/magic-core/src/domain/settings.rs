//! Display settings consumed by the engine.
//!
//! Built once by the caller (the CLI derives them from its configuration)
//! and handed to [`Session`](crate::application::Session). The engine never
//! loads or persists them.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Lines of fixed chrome around the item window: title, context line and
/// top rule above; bottom rule and footer below.
pub const LAYOUT_LINES: u16 = 5;

/// Operational display settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// ANSI colour for highlights and headers.
    pub color: bool,
    /// Spinners and other animations (read by collaborators, not the engine).
    pub animations: bool,
    /// Use `↑`/`↓`/`›` glyphs instead of ASCII.
    pub unicode: bool,
    /// Never position the cursor; print plain listings instead. Set when
    /// output is not a terminal.
    pub plain: bool,
    /// Rows kept free below the footer for prompts and messages.
    pub reserved_lines: u16,
    /// Below this height the renderer degrades to a textual listing.
    pub min_height: u16,
    /// Upper bound on rule and highlight width.
    pub max_width: u16,
    /// Minimum time between two terminal size queries.
    pub size_check_interval_ms: u64,
    /// Size assumed when the terminal cannot be queried.
    pub fallback_width: u16,
    pub fallback_height: u16,
    /// Escape cancels like Ctrl+C.
    pub escape_cancels: bool,
    /// Single digits select immediately in raw mode too.
    pub quick_select: bool,
    /// Show the current directory under the title.
    pub show_directory: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            color: true,
            animations: true,
            unicode: true,
            plain: false,
            reserved_lines: 1,
            min_height: 8,
            max_width: 70,
            size_check_interval_ms: 500,
            fallback_width: 80,
            fallback_height: 24,
            escape_cancels: true,
            quick_select: false,
            show_directory: true,
        }
    }
}

impl DisplaySettings {
    /// Total chrome budget `C`: `visible_count = max(1, height - C)`.
    pub fn chrome_lines(&self) -> u16 {
        LAYOUT_LINES + self.reserved_lines
    }

    pub fn size_check_interval(&self) -> Duration {
        Duration::from_millis(self.size_check_interval_ms)
    }

    pub fn fallback_size(&self) -> (u16, u16) {
        (self.fallback_width.max(1), self.fallback_height.max(1))
    }

    /// Settings for tests and non-terminal output: no colour, no motion.
    pub fn plain() -> Self {
        Self {
            color: false,
            animations: false,
            plain: true,
            ..Self::default()
        }
    }

    pub(crate) fn glyphs(&self) -> Glyphs {
        if self.unicode {
            Glyphs {
                up: "\u{2191}",
                down: "\u{2193}",
                rule: "\u{2500}",
                crumb: " \u{203a} ",
                ellipsis: "\u{2026}",
            }
        } else {
            Glyphs {
                up: "^",
                down: "v",
                rule: "=",
                crumb: " > ",
                ellipsis: "...",
            }
        }
    }
}

/// Glyph set chosen by [`DisplaySettings::unicode`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Glyphs {
    pub up: &'static str,
    pub down: &'static str,
    pub rule: &'static str,
    pub crumb: &'static str,
    pub ellipsis: &'static str,
}
