//! Terminal Screen
//!
//! Geometry lookup and an RAII guard around the alternate screen. The guard
//! hides the cursor on entry and restores cursor and screen when dropped.
//! `Drop` does not run when a panic aborts the process, so callers driving
//! the real terminal also install [`install_panic_hook`].

use std::io::{self, Write};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::warn;

/// Terminal size in character cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
}

impl Geometry {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Read the current terminal size
    pub fn current() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::new(width as usize, height as usize))
    }
}

/// Alternate screen with a hidden cursor, restored on drop
pub struct Screen<W: Write> {
    out: W,
    restored: bool,
}

impl<W: Write> Screen<W> {
    /// Save the display, hide the cursor and clear
    pub fn enter(mut out: W) -> io::Result<Self> {
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self {
            out,
            restored: false,
        })
    }

    /// Show the cursor and return to the saved display
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        leave(&mut self.out)
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }
}

fn leave(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Show, LeaveAlternateScreen)
}

/// Restore cursor and screen on stdout before the panic message is printed
pub fn install_panic_hook() {
    install_panic_hook_with(io::stdout);
}

/// Panic hook writing the restore sequence to a writer from `open`
///
/// The hook runs ahead of unwinding, so it also covers `panic = "abort"`.
pub fn install_panic_hook_with<W, F>(open: F)
where
    W: Write,
    F: Fn() -> W + Send + Sync + 'static,
{
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = leave(&mut open());
        original_hook(panic_info);
    }));
}

impl<W: Write> Write for Screen<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for Screen<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}
