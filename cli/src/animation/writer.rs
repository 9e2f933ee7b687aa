//! Frame Writer
//!
//! Buffered sink used by the producer for every frame. Each output line is
//! prefixed with cursor positioning (clear the row, then jump to the target
//! column) and its content goes through the aurora decoration. `take()`
//! hands the frame out and resets the writer for the next one.

use std::fmt::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;

use crate::decoration::Decoration;

pub struct FrameWriter {
    buf: String,
    decoration: Decoration,
    /// 1-based target column
    column: usize,
    /// 0-based screen row of the first line
    top: usize,
    row: usize,
    line_started: bool,
}

impl FrameWriter {
    pub fn new(decoration: Decoration, column: usize, top: usize) -> Self {
        Self {
            buf: String::new(),
            decoration,
            column: column.max(1),
            top,
            row: 0,
            line_started: false,
        }
    }

    pub fn set_column(&mut self, column: usize) {
        self.column = column.max(1);
    }

    pub fn set_color_base(&mut self, base: usize) {
        self.decoration.set_base(base);
    }

    /// Hand out the buffered frame and reset position state
    pub fn take(&mut self) -> String {
        self.row = 0;
        self.line_started = false;
        std::mem::take(&mut self.buf)
    }

    fn start_line(&mut self) -> fmt::Result {
        if self.line_started {
            return Ok(());
        }
        self.line_started = true;
        let row = to_cell(self.top + self.row);
        MoveTo(0, row).write_ansi(&mut self.buf)?;
        Clear(ClearType::CurrentLine).write_ansi(&mut self.buf)?;
        MoveTo(to_cell(self.column - 1), row).write_ansi(&mut self.buf)
    }
}

fn to_cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Write for FrameWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut segments = s.split('\n').peekable();
        while let Some(segment) = segments.next() {
            if !segment.is_empty() {
                self.start_line()?;
                self.decoration
                    .paint_line(segment, self.row, &mut self.buf)?;
            }
            if segments.peek().is_some() {
                // newline
                self.start_line()?;
                self.row += 1;
                self.line_started = false;
            }
        }
        Ok(())
    }
}
