//! Line-buffered numeric fallback reader.

use std::io::BufRead;

use tracing::debug;

use magic_core::application::ports::KeyReader;
use magic_core::domain::{InputMode, KeyEvent};
use magic_core::error::MenuResult;

/// "Type a number, then Enter" input over any buffered reader.
///
/// | Line              | Event            |
/// |-------------------|------------------|
/// | `3`               | `Digit(3)`       |
/// | empty             | `Enter`          |
/// | `q`, `quit`, `b`  | `CtrlC`          |
/// | end of input      | `CtrlC`          |
/// | anything else     | `Other`          |
///
/// Bytes that are not valid UTF-8 are decoded lossily, so they land in the
/// last row instead of failing the read.
#[derive(Debug)]
pub struct LineKeyReader<R> {
    input: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineKeyReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> KeyReader for LineKeyReader<R> {
    fn mode(&self) -> InputMode {
        InputMode::Line
    }

    fn enter(&mut self) -> MenuResult<()> {
        Ok(())
    }

    fn leave(&mut self) -> MenuResult<()> {
        Ok(())
    }

    fn read_event(&mut self) -> MenuResult<KeyEvent> {
        self.buf.clear();
        if self.input.read_until(b'\n', &mut self.buf)? == 0 {
            debug!("End of input");
            return Ok(KeyEvent::CtrlC);
        }
        Ok(parse_line(&String::from_utf8_lossy(&self.buf)))
    }
}

fn parse_line(line: &str) -> KeyEvent {
    let line = line.trim();
    if line.is_empty() {
        return KeyEvent::Enter;
    }
    if matches!(line.to_ascii_lowercase().as_str(), "q" | "quit" | "b" | "back") {
        return KeyEvent::CtrlC;
    }
    line.parse::<usize>()
        .map(KeyEvent::Digit)
        .unwrap_or(KeyEvent::Other)
}
