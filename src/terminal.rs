use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType, size};

use crate::layout::Viewport;

/// Current terminal size, or a zeroed viewport when stdout is not a terminal.
pub fn detect_viewport() -> Viewport {
    match size() {
        Ok((columns, rows)) => Viewport::new(usize::from(rows), usize::from(columns)),
        Err(_) => Viewport::default(),
    }
}

pub fn clear_screen<W: Write>(out: &mut W) -> std::io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}
