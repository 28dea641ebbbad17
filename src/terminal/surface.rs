//! Drawing surface used by the render loop.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;

/// Terminal surface the render loop draws to.
pub trait Surface {
    /// Current size as (cols, rows).
    fn dimensions(&mut self) -> io::Result<(u16, u16)>;

    /// Clear the screen and draw `text` from the top-left corner, one
    /// line per row.
    fn clear_and_draw(&mut self, text: &str) -> io::Result<()>;

    /// Whether the user asked to stop since the last call.
    fn interrupt_requested(&mut self) -> io::Result<bool> {
        Ok(false)
    }
}

/// Whether a key press means "stop playback".
///
/// Raw mode swallows SIGINT, so Ctrl+C arrives here as a key event.
pub fn is_interrupt_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('d') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// [`Surface`] over the process's stdout via crossterm.
pub struct CrosstermSurface<W: Write = Stdout> {
    out: W,
}

impl CrosstermSurface<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Surface for CrosstermSurface<W> {
    fn dimensions(&mut self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear_and_draw(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(Clear(ClearType::All))?;
        for (row, line) in text.lines().enumerate() {
            self.out.queue(MoveTo(0, row as u16))?.queue(Print(line))?;
        }
        self.out.flush()
    }

    /// Drain pending input without blocking.
    fn interrupt_requested(&mut self) -> io::Result<bool> {
        let mut interrupted = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if is_interrupt_key(&key) {
                    interrupted = true;
                }
            }
        }
        Ok(interrupted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_interrupt_keys() {
        assert!(is_interrupt_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(is_interrupt_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_interrupt_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_interrupt_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_interrupt_key(&key(KeyCode::Char(' '), KeyModifiers::NONE)));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut release = key(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_interrupt_key(&release));
    }

    #[test]
    fn test_clear_and_draw_writes_each_row() {
        let mut surface = CrosstermSurface::new(Vec::new());
        surface.clear_and_draw("@@\n..").unwrap();
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.contains("@@"));
        assert!(out.contains(".."));
        // Second row is positioned with an explicit cursor move (1-based row 2)
        assert!(out.contains("\x1b[2;1H"));
    }
}
