//! Interactive multi-select over any list of `Selectable` rows.
//!
//! `Selector::run` owns the terminal for the whole session: it enters raw
//! mode through a `RawSession`, redraws after every key, and restores the
//! terminal before returning on every path (confirm, cancel, I/O error or
//! panic).

mod item;
mod key;
mod render;
mod state;
mod terminal;

pub use item::{
    format_duration, AlbumItem, ArtistItem, PlaylistItem, Selectable, SelectableItem, TrackItem,
};
pub use key::Key;
pub use render::{layout, text_width, truncate, Cell, CellStyle, Color};
pub use state::{Phase, SelectionState, TermSize, FALLBACK_SIZE};
pub use terminal::{CrosstermTerminal, RawSession, Terminal};

use std::io;

use crate::quality::Quality;

/// Outcome of a selector session. `Cancelled` is distinct from confirming
/// an empty selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    Confirmed {
        /// Ascending by original index.
        items: Vec<T>,
        quality: Option<Quality>,
    },
    Cancelled,
}

impl<T> Selection<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Selection::Cancelled)
    }
}

#[derive(Debug, Clone)]
pub struct Selector {
    title: String,
    quality: Option<Quality>,
}

impl Selector {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            quality: None,
        }
    }

    /// Offer a quality choice in the confirmation dialog, starting at `quality`.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn run<T, Term>(&self, terminal: &mut Term, items: Vec<T>) -> io::Result<Selection<T>>
    where
        T: Selectable,
        Term: Terminal + ?Sized,
    {
        tracing::debug!(items = items.len(), title = %self.title, "selector started");
        let mut session = RawSession::new(terminal)?;
        let mut state = SelectionState::new(items, self.quality);
        let mut size = FALLBACK_SIZE;

        while !state.phase().is_finished() {
            match session.size() {
                Ok(s) if s.rows > 0 && s.cols > 0 => size = s,
                Ok(s) => tracing::debug!(?s, "ignoring empty terminal size"),
                Err(err) => tracing::debug!(error = %err, "terminal size unavailable; keeping last"),
            }
            state.resize(size);
            draw(&mut *session, &state, &self.title)?;
            let key = session.read_key()?;
            state.handle(key);
        }
        session.release()?;

        let selection = match state.phase() {
            Phase::Confirmed => {
                let quality = state.quality();
                Selection::Confirmed {
                    items: state.into_selected(),
                    quality,
                }
            }
            _ => Selection::Cancelled,
        };
        match &selection {
            Selection::Confirmed { items, .. } => {
                tracing::info!(selected = items.len(), "selection confirmed")
            }
            Selection::Cancelled => tracing::info!("selection cancelled"),
        }
        Ok(selection)
    }
}

fn draw<T, Term>(terminal: &mut Term, state: &SelectionState<T>, title: &str) -> io::Result<()>
where
    T: Selectable,
    Term: Terminal + ?Sized,
{
    terminal.clear()?;
    for cell in layout(state, title) {
        terminal.write_at(cell.row, cell.col, &cell.text, cell.style)?;
    }
    terminal.flush()
}
