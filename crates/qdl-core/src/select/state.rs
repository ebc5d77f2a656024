//! Selector state machine. Pure: keys in, state out; no terminal access.

use std::collections::BTreeSet;

use super::key::Key;
use crate::quality::Quality;

/// Terminal size fallback when the size query fails.
pub const FALLBACK_SIZE: TermSize = TermSize { rows: 24, cols: 80 };

/// Rows taken by the header line and the hint line.
const CHROME_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub rows: u16,
    pub cols: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Browsing,
    Confirming,
    Cancelled,
    Confirmed,
}

impl Phase {
    pub fn is_finished(self) -> bool {
        matches!(self, Phase::Cancelled | Phase::Confirmed)
    }
}

#[derive(Debug)]
pub struct SelectionState<T> {
    items: Vec<T>,
    cursor: usize,
    selected: BTreeSet<usize>,
    scroll: usize,
    size: TermSize,
    phase: Phase,
    quality: Option<Quality>,
    answer_yes: bool,
}

impl<T> SelectionState<T> {
    /// `quality` is offered in the confirmation dialog when present.
    pub fn new(items: Vec<T>, quality: Option<Quality>) -> Self {
        Self {
            items,
            cursor: 0,
            selected: BTreeSet::new(),
            scroll: 0,
            size: FALLBACK_SIZE,
            phase: Phase::Browsing,
            quality,
            answer_yes: true,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn size(&self) -> TermSize {
        self.size
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quality(&self) -> Option<Quality> {
        self.quality
    }

    pub fn answer_yes(&self) -> bool {
        self.answer_yes
    }

    /// Rows available for list items at the current size (at least one).
    pub fn list_height(&self) -> usize {
        usize::from(self.size.rows.saturating_sub(CHROME_ROWS)).max(1)
    }

    pub fn resize(&mut self, size: TermSize) {
        self.size = size;
        self.ensure_visible();
    }

    /// Flips membership of `index`; out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn handle(&mut self, key: Key) {
        if key == Key::Interrupt && !self.phase.is_finished() {
            self.phase = Phase::Cancelled;
            return;
        }
        match self.phase {
            Phase::Browsing => self.handle_browsing(key),
            Phase::Confirming => self.handle_confirming(key),
            Phase::Cancelled | Phase::Confirmed => {}
        }
        self.ensure_visible();
    }

    fn handle_browsing(&mut self, key: Key) {
        let len = self.items.len();
        let last = len.saturating_sub(1);
        let page = self.list_height();
        match key {
            Key::Up | Key::Char('k') if len > 0 => {
                self.cursor = if self.cursor == 0 { last } else { self.cursor - 1 };
            }
            Key::Down | Key::Char('j') if len > 0 => {
                self.cursor = if self.cursor >= last { 0 } else { self.cursor + 1 };
            }
            Key::PageUp => self.cursor = self.cursor.saturating_sub(page),
            Key::PageDown => self.cursor = (self.cursor + page).min(last),
            Key::Home | Key::Char('g') => self.cursor = 0,
            Key::End | Key::Char('G') => self.cursor = last,
            Key::Char(' ') => self.toggle(self.cursor),
            Key::Enter => {
                self.answer_yes = true;
                self.phase = Phase::Confirming;
            }
            _ => {}
        }
    }

    fn handle_confirming(&mut self, key: Key) {
        match key {
            Key::Left | Key::Right | Key::Tab => self.answer_yes = !self.answer_yes,
            Key::Char('y') | Key::Char('Y') => self.phase = Phase::Confirmed,
            Key::Char('n') | Key::Char('N') | Key::Esc => self.phase = Phase::Browsing,
            Key::Enter => {
                self.phase = if self.answer_yes {
                    Phase::Confirmed
                } else {
                    Phase::Browsing
                };
            }
            Key::Up | Key::Char('k') => self.quality = self.quality.map(Quality::next),
            Key::Down | Key::Char('j') => self.quality = self.quality.map(Quality::prev),
            _ => {}
        }
    }

    fn ensure_visible(&mut self) {
        let height = self.list_height();
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
        let max_scroll = self.items.len().saturating_sub(height);
        self.scroll = self.scroll.min(max_scroll);
    }

    /// Selected items in ascending index order.
    pub fn into_selected(self) -> Vec<T> {
        let selected = self.selected;
        self.items
            .into_iter()
            .enumerate()
            .filter(|(i, _)| selected.contains(i))
            .map(|(_, item)| item)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(n: usize) -> SelectionState<usize> {
        SelectionState::new((0..n).collect(), Some(Quality::Cd))
    }

    fn press(s: &mut SelectionState<usize>, keys: &[Key]) {
        for &k in keys {
            s.handle(k);
        }
    }

    #[test]
    fn cursor_wraps_at_both_ends() {
        let mut s = state(3);
        press(&mut s, &[Key::Up]);
        assert_eq!(s.cursor(), 2);
        press(&mut s, &[Key::Char('j')]);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn paging_clamps() {
        let mut s = state(50);
        s.resize(TermSize { rows: 12, cols: 40 });
        press(&mut s, &[Key::PageDown]);
        assert_eq!(s.cursor(), 10);
        press(&mut s, &[Key::End, Key::PageDown]);
        assert_eq!(s.cursor(), 49);
        press(&mut s, &[Key::Home, Key::PageUp]);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut s = state(4);
        press(&mut s, &[Key::Down, Key::Char(' ')]);
        assert!(s.is_selected(1));
        press(&mut s, &[Key::Char(' ')]);
        assert!(s.selected().is_empty());
        s.toggle(99);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn selection_stays_in_range_after_any_keys() {
        let keys = [
            Key::Up,
            Key::Char(' '),
            Key::PageDown,
            Key::Char(' '),
            Key::End,
            Key::Char(' '),
            Key::Down,
            Key::Char(' '),
            Key::Char('G'),
            Key::Char(' '),
        ];
        for n in 0..6 {
            let mut s = state(n);
            press(&mut s, &keys);
            assert!(s.selected().iter().all(|&i| i < n));
            if n > 0 {
                assert!(s.cursor() < n);
            }
        }
    }

    #[test]
    fn confirm_defaults_to_yes() {
        let mut s = state(2);
        press(&mut s, &[Key::Char(' '), Key::Enter]);
        assert_eq!(s.phase(), Phase::Confirming);
        assert!(s.answer_yes());
        press(&mut s, &[Key::Enter]);
        assert_eq!(s.phase(), Phase::Confirmed);
        assert_eq!(s.into_selected(), vec![0]);
    }

    #[test]
    fn declining_returns_to_browsing() {
        let mut s = state(2);
        press(&mut s, &[Key::Enter, Key::Right, Key::Enter]);
        assert_eq!(s.phase(), Phase::Browsing);
        press(&mut s, &[Key::Enter]);
        assert!(s.answer_yes());
        press(&mut s, &[Key::Char('n')]);
        assert_eq!(s.phase(), Phase::Browsing);
    }

    #[test]
    fn quality_cycles_in_dialog_only() {
        let mut s = state(2);
        press(&mut s, &[Key::Up]);
        assert_eq!(s.quality(), Some(Quality::Cd));
        press(&mut s, &[Key::Enter, Key::Up, Key::Up]);
        assert_eq!(s.quality(), Some(Quality::HiRes192));
        press(&mut s, &[Key::Down]);
        assert_eq!(s.quality(), Some(Quality::HiRes96));
    }

    #[test]
    fn only_interrupt_leaves_browsing_abnormally() {
        let mut s = state(3);
        press(&mut s, &[Key::Esc, Key::Char('q'), Key::Other]);
        assert_eq!(s.phase(), Phase::Browsing);
        press(&mut s, &[Key::Interrupt]);
        assert_eq!(s.phase(), Phase::Cancelled);
    }

    #[test]
    fn interrupt_cancels_from_any_live_phase() {
        let mut s = state(2);
        press(&mut s, &[Key::Interrupt]);
        assert_eq!(s.phase(), Phase::Cancelled);

        let mut s = state(2);
        press(&mut s, &[Key::Enter, Key::Interrupt]);
        assert_eq!(s.phase(), Phase::Cancelled);

        let mut s = state(2);
        press(&mut s, &[Key::Enter, Key::Char('y'), Key::Interrupt]);
        assert_eq!(s.phase(), Phase::Confirmed);
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut s = state(30);
        s.resize(TermSize { rows: 7, cols: 40 });
        press(&mut s, &[Key::End]);
        assert_eq!(s.scroll(), 25);
        press(&mut s, &[Key::Down]);
        assert_eq!((s.cursor(), s.scroll()), (0, 0));
        s.resize(TermSize { rows: 1, cols: 40 });
        press(&mut s, &[Key::Char('j'), Key::Char('j')]);
        assert_eq!(s.scroll(), 2);
    }

    #[test]
    fn empty_list_is_navigable_and_confirmable() {
        let mut s = state(0);
        press(&mut s, &[Key::Up, Key::Down, Key::PageDown, Key::Char(' '), Key::Enter, Key::Char('y')]);
        assert_eq!(s.phase(), Phase::Confirmed);
        assert!(s.into_selected().is_empty());
    }
}
