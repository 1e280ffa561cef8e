//! Menu frame painting with minimal-diff redraws.
//!
//! ## Layout
//!
//! ```text
//! row 0        title / breadcrumb
//! row 1        context line (current directory)
//! row 2        rule, or "↑ N more above"
//! row 3..3+R   item window (R = min(len, visible_count))
//! row 3+R      rule, or "↓ N more below"
//! row 4+R      footer instructions
//! row 5+R      prompt / message row (reserved)
//! ```
//!
//! Every line is truncated to the terminal width so nothing wraps; a wrapped
//! line would shift every row below it and break the partial redraw, which
//! assumes the screen holds exactly what the previous call drew.

use std::io::Write;

use console::{Alignment, measure_text_width, pad_str, truncate_str};
use crossterm::{
    QueueableCommand,
    cursor::MoveTo,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use tracing::trace;

use crate::{
    application::services::{
        menu::MenuItem,
        session::Session,
        terminal_info::TerminalSize,
    },
    domain::{DisplaySettings, InputMode, Viewport, settings::Glyphs},
    error::MenuResult,
};

const HEADER_ROWS: u16 = 3;
const ITEM_INDENT: usize = 4;

/// Which of the two layouts a frame was painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    /// Cursor-addressed frame with live partial redraws.
    Interactive,
    /// Plain numbered listing: output is not a terminal, or the terminal is
    /// shorter than `min_height`.
    Listing,
}

/// What the previous call left on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Painted {
    layout: Layout,
    size: TerminalSize,
    len: usize,
    selected: usize,
    offset: usize,
    rows: u16,
}

/// Paints one menu's frames.
#[derive(Debug)]
pub struct MenuRenderer {
    title: String,
    viewport: Viewport,
    last: Option<Painted>,
}

impl MenuRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            viewport: Viewport::new(1),
            last: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current scroll window.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Items per page for page-wise movement.
    pub fn page_size(&self) -> usize {
        self.viewport.visible()
    }

    /// Forget the previous frame so the next render repaints everything.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Paint the frame for `items` with `selected` highlighted.
    ///
    /// With `full` (or whenever the previous frame cannot be trusted: first
    /// paint, resize, layout switch) the screen is cleared and every row is
    /// drawn. Otherwise only the rows that changed are rewritten.
    pub fn render(
        &mut self,
        session: &mut Session,
        items: &[MenuItem],
        selected: usize,
        full: bool,
    ) -> MenuResult<()> {
        let settings = *session.settings();
        let size = session.terminal().size();
        let visible = session.terminal().visible_count(settings.chrome_lines());
        let layout = if settings.plain || session.terminal().is_degraded(settings.min_height) {
            Layout::Listing
        } else {
            Layout::Interactive
        };
        let crumbs = self.header_text(session.breadcrumb(), &settings);
        let mode = session.input_mode();

        self.viewport.resize(visible, selected, items.len());
        let scrolled = self
            .last
            .is_some_and(|l| l.offset != self.viewport.offset());
        let rows = self.viewport.range(items.len()).len() as u16;

        let full = full
            || match self.last {
                None => true,
                Some(last) => {
                    last.layout != layout || last.size != size || last.len != items.len()
                }
            };

        let painter = Painter {
            settings,
            glyphs: settings.glyphs(),
            size,
            viewport: self.viewport,
            items,
            selected,
            mode,
        };

        let out = session.out();
        match (layout, full) {
            (Layout::Listing, true) => painter.listing(out, &crumbs)?,
            (Layout::Listing, false) => {
                if self.last.is_some_and(|l| l.selected != selected) {
                    painter.listing_step(out)?;
                }
            }
            (Layout::Interactive, true) => painter.full(out, &crumbs)?,
            (Layout::Interactive, false) => {
                let previous = self.last.map_or(selected, |l| l.selected);
                if scrolled {
                    painter.window(out)?;
                } else if previous != selected {
                    painter.item_row(out, previous)?;
                    painter.item_row(out, selected)?;
                }
                painter.park(out)?;
            }
        }
        out.flush()?;

        trace!(selected, offset = self.viewport.offset(), full, ?layout, "Frame painted");
        self.last = Some(Painted {
            layout,
            size,
            len: items.len(),
            selected,
            offset: self.viewport.offset(),
            rows,
        });
        Ok(())
    }

    /// Write `text` on the prompt row (or on a fresh line in listing mode).
    pub fn prompt(&mut self, session: &mut Session, text: &str) -> MenuResult<()> {
        let width = usize::from(session.terminal().size().width.saturating_sub(1)).max(1);
        let text = truncate_str(text, width, "").into_owned();
        let out = session.out();
        match self.last {
            Some(last) if last.layout == Layout::Interactive => {
                let row = HEADER_ROWS + last.rows + 2;
                out.queue(MoveTo(0, row))?
                    .queue(Clear(ClearType::CurrentLine))?;
                write!(out, "{text}")?;
            }
            _ => write!(out, "\r\n{text}")?,
        }
        out.flush()?;
        Ok(())
    }

    /// Move below the frame so whatever is printed next starts on a clean
    /// line.
    pub fn leave(&mut self, session: &mut Session) -> MenuResult<()> {
        let out = session.out();
        match self.last {
            Some(last) if last.layout == Layout::Interactive => {
                let row = HEADER_ROWS + last.rows + 2;
                out.queue(MoveTo(0, row))?
                    .queue(Clear(ClearType::FromCursorDown))?;
            }
            _ => write!(out, "\r\n")?,
        }
        out.flush()?;
        Ok(())
    }

    /// Print `text` below the frame. The next render must be a full one.
    pub fn message(&mut self, session: &mut Session, text: &str) -> MenuResult<()> {
        self.leave(session)?;
        let out = session.out();
        write!(out, "{text}\r\n")?;
        out.flush()?;
        self.last = None;
        Ok(())
    }

    fn header_text(&self, breadcrumb: &[String], settings: &DisplaySettings) -> String {
        if breadcrumb.is_empty() {
            self.title.clone()
        } else {
            breadcrumb.join(settings.glyphs().crumb)
        }
    }
}

/// Everything one paint needs, borrowed for the duration of the call.
struct Painter<'a> {
    settings: DisplaySettings,
    glyphs: Glyphs,
    size: TerminalSize,
    viewport: Viewport,
    items: &'a [MenuItem],
    selected: usize,
    mode: InputMode,
}

impl Painter<'_> {
    /// Usable columns; the last column is left empty so the terminal never
    /// auto-wraps.
    fn width(&self) -> usize {
        usize::from(self.size.width.saturating_sub(1)).max(1)
    }

    fn bar_width(&self) -> usize {
        self.width().min(usize::from(self.settings.max_width)).max(1)
    }

    fn rows(&self) -> u16 {
        self.viewport.range(self.items.len()).len() as u16
    }

    fn fit(&self, text: &str) -> String {
        truncate_str(text, self.width(), self.glyphs.ellipsis).into_owned()
    }

    fn full(&self, out: &mut dyn Write, crumbs: &str) -> MenuResult<()> {
        out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;

        let title = self.fit(&format!("  {crumbs}"));
        let title = if self.settings.color {
            title.cyan().bold().to_string()
        } else {
            title
        };
        self.line(out, 0, &title)?;
        self.line(out, 1, &self.context_line())?;
        self.window(out)?;
        let footer_row = HEADER_ROWS + self.rows() + 1;
        self.line(out, footer_row, &self.footer())?;
        self.park(out)
    }

    /// Indicator rows plus every visible item.
    fn window(&self, out: &mut dyn Write) -> MenuResult<()> {
        let len = self.items.len();
        let rule = self.glyphs.rule.repeat(self.bar_width());

        let top = if self.viewport.more_above() > 0 {
            self.fit(&format!(
                "  {} {} more above",
                self.glyphs.up,
                self.viewport.more_above()
            ))
        } else {
            rule.clone()
        };
        self.line(out, HEADER_ROWS - 1, &top)?;

        for index in self.viewport.range(len) {
            self.item_row(out, index)?;
        }

        let bottom = if self.viewport.more_below(len) > 0 {
            self.fit(&format!(
                "  {} {} more below",
                self.glyphs.down,
                self.viewport.more_below(len)
            ))
        } else {
            rule
        };
        self.line(out, HEADER_ROWS + self.rows(), &bottom)
    }

    fn item_row(&self, out: &mut dyn Write, index: usize) -> MenuResult<()> {
        if !self.viewport.contains(index) || index >= self.items.len() {
            return Ok(());
        }
        let row = HEADER_ROWS + (index - self.viewport.offset()) as u16;
        let text = self.item_text(index);
        self.line(out, row, &text)
    }

    fn item_text(&self, index: usize) -> String {
        let budget = self.width().saturating_sub(ITEM_INDENT).max(1);
        let label = format!("{}. {}", index + 1, self.items[index].label());
        let label = truncate_str(&label, budget, self.glyphs.ellipsis);

        if index == self.selected {
            let line = format!("  > {label}");
            if self.settings.color {
                let width = self.bar_width().max(measure_text_width(&line));
                pad_str(&line, width, Alignment::Left, None)
                    .black()
                    .on_cyan()
                    .bold()
                    .to_string()
            } else {
                line
            }
        } else {
            format!("    {label}")
        }
    }

    fn context_line(&self) -> String {
        if !self.settings.show_directory {
            return String::new();
        }
        let dir = std::env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "?".into());
        let prefix = "  Current directory: ";
        let budget = self.width().saturating_sub(measure_text_width(prefix));
        self.fit(&format!(
            "{prefix}{}",
            truncate_left(&dir, budget, self.glyphs.ellipsis)
        ))
    }

    fn footer(&self) -> String {
        let compact = self.width() < 60;
        let text = match (self.mode, compact) {
            (InputMode::Raw, false) => format!(
                "  {}/{} navigate | Enter select | Ctrl+C back",
                self.glyphs.up, self.glyphs.down
            ),
            (InputMode::Raw, true) => {
                format!("  {}/{} | Enter | Ctrl+C", self.glyphs.up, self.glyphs.down)
            }
            (InputMode::Line, false) => "  Type a number and press Enter".to_owned(),
            (InputMode::Line, true) => "  Number + Enter".to_owned(),
        };
        let text = self.fit(&text);
        if self.settings.color {
            text.dimmed().to_string()
        } else {
            text
        }
    }

    /// Leave the cursor on the prompt row.
    fn park(&self, out: &mut dyn Write) -> MenuResult<()> {
        out.queue(MoveTo(0, HEADER_ROWS + self.rows() + 2))?;
        Ok(())
    }

    fn line(&self, out: &mut dyn Write, row: u16, text: &str) -> MenuResult<()> {
        out.queue(MoveTo(0, row))?
            .queue(Clear(ClearType::CurrentLine))?;
        write!(out, "{text}")?;
        Ok(())
    }

    /// Whole numbered list, no cursor addressing.
    fn listing(&self, out: &mut dyn Write, crumbs: &str) -> MenuResult<()> {
        write!(out, "\r\n{}\r\n", self.fit(crumbs))?;
        for index in 0..self.items.len() {
            let marker = if index == self.selected { ">" } else { " " };
            let text = self.fit(&format!(
                "{marker} {}. {}",
                index + 1,
                self.items[index].label()
            ));
            write!(out, "{text}\r\n")?;
        }
        write!(out, "{}", self.fit(self.footer().trim_start()))?;
        Ok(())
    }

    /// One line naming the new selection.
    fn listing_step(&self, out: &mut dyn Write) -> MenuResult<()> {
        let text = self.fit(&format!(
            "> {}. {}",
            self.selected + 1,
            self.items[self.selected].label()
        ));
        write!(out, "\r\n{text}")?;
        Ok(())
    }
}

/// Keep the tail of `text` within `width` columns, marking the cut.
fn truncate_left(text: &str, width: usize, ellipsis: &str) -> String {
    if measure_text_width(text) <= width {
        return text.to_owned();
    }
    let budget = width.saturating_sub(measure_text_width(ellipsis));
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for ch in text.chars().rev() {
        let w = measure_text_width(ch.encode_utf8(&mut [0; 4]));
        if used + w > budget {
            break;
        }
        used += w;
        tail.push(ch);
    }
    let tail: String = tail.into_iter().rev().collect();
    format!("{ellipsis}{tail}")
}
