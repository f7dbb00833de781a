//! Crossterm backend that draws one Kitty graphics image over the frame
//!
//! Components publish where the sprite should go through a [`SpriteOverlay`];
//! the backend emits the escape sequence after ratatui has flushed the cells.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crossterm::{cursor::MoveTo, queue, style::Print};
use ratatui::backend::{Backend, ClearType, CrosstermBackend, WindowSize};
use ratatui::buffer::Cell;
use ratatui::layout::{Position, Size};

/// Kitty: delete every visible placement
const KITTY_DELETE_ALL: &str = "\x1b_Ga=d,d=a,q=2\x1b\\";

/// A sprite sequence anchored at a cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: u16,
    pub y: u16,
    pub sequence: String,
}

/// Shared slot holding the sprite for the next frame
#[derive(Clone, Debug, Default)]
pub struct SpriteOverlay {
    slot: Arc<Mutex<Option<Placement>>>,
}

impl SpriteOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&self, placement: Placement) {
        *self.lock() = Some(placement);
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn current(&self) -> Option<Placement> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Placement>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct SpriteBackend<W: Write> {
    inner: CrosstermBackend<W>,
    overlay: SpriteOverlay,
    /// Placement currently on screen
    shown: Option<Placement>,
}

impl<W: Write> SpriteBackend<W> {
    pub fn new(writer: W, overlay: SpriteOverlay) -> Self {
        Self {
            inner: CrosstermBackend::new(writer),
            overlay,
            shown: None,
        }
    }

    /// Bring the terminal in line with the overlay; unchanged sprites are not resent
    fn sync_sprite(&mut self) -> io::Result<()> {
        let wanted = self.overlay.current();
        if wanted == self.shown {
            return Ok(());
        }
        if self.shown.is_some() {
            queue!(self.inner, Print(KITTY_DELETE_ALL))?;
        }
        if let Some(placement) = &wanted {
            queue!(
                self.inner,
                MoveTo(placement.x, placement.y),
                Print(&placement.sequence)
            )?;
        }
        self.shown = wanted;
        Ok(())
    }
}

impl<W: Write> Backend for SpriteBackend<W> {
    fn draw<'a, I>(&mut self, content: I) -> io::Result<()>
    where
        I: Iterator<Item = (u16, u16, &'a Cell)>,
    {
        self.inner.draw(content)?;
        self.sync_sprite()
    }

    fn append_lines(&mut self, n: u16) -> io::Result<()> {
        self.inner.append_lines(n)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.inner.hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.inner.show_cursor()
    }

    fn get_cursor_position(&mut self) -> io::Result<Position> {
        self.inner.get_cursor_position()
    }

    fn set_cursor_position<P: Into<Position>>(&mut self, position: P) -> io::Result<()> {
        self.inner.set_cursor_position(position)
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.shown.take().is_some() {
            queue!(self.inner, Print(KITTY_DELETE_ALL))?;
        }
        self.inner.clear()
    }

    fn clear_region(&mut self, clear_type: ClearType) -> io::Result<()> {
        self.inner.clear_region(clear_type)
    }

    fn size(&self) -> io::Result<Size> {
        self.inner.size()
    }

    fn window_size(&mut self) -> io::Result<WindowSize> {
        self.inner.window_size()
    }

    fn flush(&mut self) -> io::Result<()> {
        Backend::flush(&mut self.inner)
    }
}

impl<W: Write> Write for SpriteBackend<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Write::flush(&mut self.inner)
    }
}
