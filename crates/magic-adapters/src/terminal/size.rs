use std::io;

use magic_core::application::ports::SizeSource;

/// Asks the controlling terminal through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermSize;

impl SizeSource for CrosstermSize {
    fn query(&self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }
}
