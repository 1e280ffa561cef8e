//! Coloured [`ErrorReporter`] used while a menu owns the screen.
//!
//! Same shape as [`CliError::format_colored`], but with `\r\n` line endings so
//! it lays out correctly in raw mode, and it knows how to pull suggestions out
//! of any error an action might return.

use std::error::Error;
use std::io::{self, Write};

use owo_colors::OwoColorize;

use magic_core::application::ErrorReporter;
use magic_core::error::MenuError;

use crate::error::CliError;

#[derive(Debug, Clone, Copy)]
pub struct ColorReporter {
    color: bool,
}

impl ColorReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl ErrorReporter for ColorReporter {
    fn report(&self, out: &mut dyn Write, error: &(dyn Error + 'static)) -> io::Result<()> {
        if self.color {
            write!(out, "\r\n{} {}\r\n", "✗".red().bold(), error.to_string().red())?;
        } else {
            write!(out, "\r\n✗ {error}\r\n")?;
        }

        let mut source = error.source();
        while let Some(cause) = source {
            if self.color {
                write!(out, "  {} {}\r\n", "→".dimmed(), cause.to_string().dimmed())?;
            } else {
                write!(out, "  → {cause}\r\n")?;
            }
            source = cause.source();
        }

        let suggestions = suggestions_for(error);
        if !suggestions.is_empty() {
            if self.color {
                write!(out, "\r\n{}\r\n", "Suggestions:".yellow().bold())?;
            } else {
                write!(out, "\r\nSuggestions:\r\n")?;
            }
            for suggestion in suggestions {
                write!(out, "  {suggestion}\r\n")?;
            }
        }
        out.flush()
    }
}

fn suggestions_for(error: &(dyn Error + 'static)) -> Vec<String> {
    if let Some(err) = error.downcast_ref::<CliError>() {
        err.suggestions()
    } else if let Some(err) = error.downcast_ref::<MenuError>() {
        err.suggestions()
    } else {
        Vec::new()
    }
}
