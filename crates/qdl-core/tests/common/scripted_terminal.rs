//! In-memory terminal fed from a key script.

use std::collections::VecDeque;
use std::io;

use qdl_core::select::{text_width, CellStyle, Key, TermSize, Terminal};

pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    size: TermSize,
    pub raw: bool,
    pub writes: usize,
}

impl ScriptedTerminal {
    pub fn new(keys: &[Key], rows: u16, cols: u16) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            size: TermSize { rows, cols },
            raw: false,
            writes: 0,
        }
    }
}

impl Terminal for ScriptedTerminal {
    fn size(&mut self) -> io::Result<TermSize> {
        Ok(self.size)
    }

    fn enter_raw(&mut self) -> io::Result<()> {
        self.raw = true;
        Ok(())
    }

    fn leave_raw(&mut self) -> io::Result<()> {
        self.raw = false;
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write_at(&mut self, row: u16, col: u16, text: &str, _style: CellStyle) -> io::Result<()> {
        assert!(row < self.size.rows, "row {row} outside terminal");
        assert!(
            usize::from(col) + text_width(text) <= usize::from(self.size.cols),
            "{text:?} overflows at column {col}"
        );
        self.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }
}
