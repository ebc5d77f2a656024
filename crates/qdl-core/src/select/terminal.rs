//! Terminal access for the selector.

use std::io::{self, Stdout, Write};
use std::ops::{Deref, DerefMut};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use super::key::Key;
use super::render::{CellStyle, Color};
use super::state::TermSize;

/// What the selector needs from a terminal.
pub trait Terminal {
    fn size(&mut self) -> io::Result<TermSize>;
    fn enter_raw(&mut self) -> io::Result<()>;
    fn leave_raw(&mut self) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
    fn write_at(&mut self, row: u16, col: u16, text: &str, style: CellStyle) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    /// Blocks until the next key event.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Raw mode held for the lifetime of the guard. Dropping it restores the
/// terminal, including on early return and unwinding.
pub struct RawSession<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
    active: bool,
}

impl<'a, T: Terminal + ?Sized> RawSession<'a, T> {
    pub fn new(terminal: &'a mut T) -> io::Result<Self> {
        terminal.enter_raw()?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    /// Restores the terminal now and reports failure.
    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        self.terminal.leave_raw()
    }
}

impl<T: Terminal + ?Sized> Drop for RawSession<'_, T> {
    fn drop(&mut self) {
        if self.active {
            if let Err(err) = self.terminal.leave_raw() {
                tracing::warn!(error = %err, "failed to restore terminal");
            }
        }
    }
}

impl<T: Terminal + ?Sized> Deref for RawSession<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: Terminal + ?Sized> DerefMut for RawSession<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

/// Stdout terminal driven by crossterm. Raw mode also switches to the
/// alternate screen and hides the cursor.
pub struct CrosstermTerminal {
    out: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn size(&mut self) -> io::Result<TermSize> {
        let (cols, rows) = terminal::size()?;
        Ok(TermSize { rows, cols })
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        if let Err(err) = execute!(self.out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(())
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        let screen = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        disable_raw_mode()?;
        screen
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn write_at(&mut self, row: u16, col: u16, text: &str, style: CellStyle) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row))?;
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if let Some(color) = style.fg {
            queue!(self.out, SetForegroundColor(term_color(color)))?;
        }
        queue!(self.out, Print(text), ResetColor, SetAttribute(Attribute::Reset))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                        return Ok(Key::Interrupt);
                    }
                    return Ok(map_key(key.code));
                }
                Event::Resize(_, _) => return Ok(Key::Resize),
                _ => continue,
            }
        }
    }
}

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Green => TermColor::Green,
        Color::Cyan => TermColor::Cyan,
        Color::Yellow => TermColor::Yellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_keys() {
        assert_eq!(map_key(KeyCode::BackTab), Key::Tab);
        assert_eq!(map_key(KeyCode::Char('j')), Key::Char('j'));
        assert_eq!(map_key(KeyCode::F(5)), Key::Other);
    }
}
