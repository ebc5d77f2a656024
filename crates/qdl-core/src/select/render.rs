//! Screen layout for the selector.
//!
//! `layout` turns a state into positioned, pre-truncated cells. Every cell
//! fits in the terminal: rows past the bottom are never produced and text
//! is cut to the columns left on its row.

use super::item::Selectable;
use super::state::{Phase, SelectionState};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Cyan,
    Yellow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub reverse: bool,
    pub bold: bool,
    pub dim: bool,
    pub fg: Option<Color>,
}

impl CellStyle {
    pub const PLAIN: CellStyle = CellStyle {
        reverse: false,
        bold: false,
        dim: false,
        fg: None,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: u16,
    pub col: u16,
    pub text: String,
    pub style: CellStyle,
}

pub fn layout<T: Selectable>(state: &SelectionState<T>, title: &str) -> Vec<Cell> {
    let size = state.size();
    let mut cells = Vec::new();
    let mut put = |row: u16, col: u16, text: &str, style: CellStyle| {
        if row >= size.rows || col >= size.cols {
            return;
        }
        let text = truncate(text, usize::from(size.cols - col));
        if !text.is_empty() {
            cells.push(Cell { row, col, text, style });
        }
    };

    let header = format!(
        "{title} ({} of {} selected)",
        state.selected().len(),
        state.items().len()
    );
    put(
        0,
        0,
        &header,
        CellStyle {
            bold: true,
            fg: Some(Color::Cyan),
            ..CellStyle::PLAIN
        },
    );

    let height = state.list_height();
    if state.items().is_empty() {
        put(1, 2, "(no results)", CellStyle { dim: true, ..CellStyle::PLAIN });
    }
    for (offset, (index, item)) in state
        .items()
        .iter()
        .enumerate()
        .skip(state.scroll())
        .take(height)
        .enumerate()
    {
        let on_cursor = index == state.cursor();
        let selected = state.is_selected(index);
        let line = item_line(item, on_cursor, selected);
        let style = CellStyle {
            reverse: on_cursor,
            fg: selected.then_some(Color::Green),
            ..CellStyle::PLAIN
        };
        put(offset_row(offset), 0, &line, style);
    }

    let bottom = size.rows.saturating_sub(1);
    match state.phase() {
        Phase::Confirming => {
            let count = state.selected().len();
            let (yes, no) = if state.answer_yes() {
                ("[Yes]", " No ")
            } else {
                (" Yes ", "[No]")
            };
            let width = usize::from(size.cols);
            let prompt = format!("Queue {count} item(s) for download? {yes} {no}");
            if let Some(quality) = state.quality() {
                // padded so the dialog hides the list row underneath
                put(
                    bottom.saturating_sub(1),
                    0,
                    &format!("{:<width$}", format!("Quality: {quality}  (up/down to change)")),
                    CellStyle { fg: Some(Color::Yellow), ..CellStyle::PLAIN },
                );
            }
            put(
                bottom,
                0,
                &format!("{prompt:<width$}"),
                CellStyle { bold: true, ..CellStyle::PLAIN },
            );
        }
        _ => put(
            bottom,
            0,
            "up/down move  space toggle  enter confirm  ctrl-c quit",
            CellStyle { dim: true, ..CellStyle::PLAIN },
        ),
    }

    cells
}

fn offset_row(offset: usize) -> u16 {
    u16::try_from(offset + 1).unwrap_or(u16::MAX)
}

fn item_line<T: Selectable>(item: &T, on_cursor: bool, selected: bool) -> String {
    let marker = if on_cursor { '>' } else { ' ' };
    let check = if selected { "[x]" } else { "[ ]" };
    match item.subtitle() {
        Some(sub) if !sub.is_empty() => format!("{marker} {check} {}  {sub}", item.title()),
        _ => format!("{marker} {check} {}", item.title()),
    }
}

/// Display columns of `text` as a terminal draws it. Control characters
/// count for nothing since `truncate` never emits them.
pub fn text_width(text: &str) -> usize {
    if text.chars().any(char::is_control) {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        return clean.width();
    }
    text.width()
}

/// Cuts `text` to at most `max` columns, ending with `…` when cut. Control
/// characters are dropped so they cannot move the terminal cursor.
pub fn truncate(text: &str, max: usize) -> String {
    let clean: String = text.chars().filter(|c| !c.is_control()).collect();
    if clean.width() <= max {
        return clean;
    }
    if max == 0 {
        return String::new();
    }
    let budget = max - ELLIPSIS.width().unwrap_or(1);
    let mut out = String::new();
    for c in clean.chars() {
        out.push(c);
        // measured on the whole prefix: emoji sequences widen earlier chars
        if out.width() > budget {
            out.pop();
            break;
        }
    }
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::state::TermSize;
    use crate::select::Key;

    struct Row(&'static str);

    impl Selectable for Row {
        fn title(&self) -> String {
            self.0.to_string()
        }
    }

    fn state(titles: &[&'static str], rows: u16, cols: u16) -> SelectionState<Row> {
        let mut s = SelectionState::new(titles.iter().map(|t| Row(*t)).collect(), None);
        s.resize(TermSize { rows, cols });
        s
    }

    #[test]
    fn truncation_respects_width() {
        assert_eq!(truncate("Ninja Tune", 20), "Ninja Tune");
        assert_eq!(truncate("Ninja Tune", 6), "Ninja…");
        assert_eq!(truncate("Ninja Tune", 1), "…");
        assert_eq!(truncate("Ninja Tune", 0), "");
        assert_eq!(truncate("日本語のレーベル", 7), "日本語…");
        assert!(text_width(&truncate("日本語のレーベル", 6)) <= 6);
    }

    #[test]
    fn emoji_count_as_two_columns() {
        let rockets = "🚀".repeat(40);
        assert_eq!(text_width(&rockets), 80);
        let cut = truncate(&rockets, 10);
        assert_eq!(cut, format!("{}…", "🚀".repeat(4)));
        assert!(text_width(&cut) <= 10);
        assert_eq!(text_width("✅ Warp"), 7);
        assert_eq!(text_width("a\u{7}b"), 2);
    }

    #[test]
    fn cells_never_exceed_terminal_bounds() {
        let long = "Warp Records - an extremely long label title that keeps going";
        let rockets = "🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀🚀";
        let mixed = "✅ 🛸 Ninja Tune 🪩 日本語のレーベル ❤️ 🎧🎧🎧🎧";
        for (rows, cols) in [(24, 80), (20, 20), (5, 10), (5, 7), (2, 3), (1, 1)] {
            let s = state(&[long, rockets, mixed, long, rockets, mixed], rows, cols);
            for cell in layout(&s, "Labels") {
                assert!(cell.row < rows, "row {} for {rows}x{cols}", cell.row);
                assert!(
                    usize::from(cell.col) + text_width(&cell.text) <= usize::from(cols),
                    "{:?} for {rows}x{cols}",
                    cell
                );
            }
        }
    }

    #[test]
    fn cursor_and_selection_markers_compose() {
        let mut s = state(&["Ninja Tune", "Warp"], 24, 80);
        s.handle(Key::Char(' '));
        let cells = layout(&s, "Labels");
        let first = cells.iter().find(|c| c.row == 1).unwrap();
        assert!(first.text.starts_with("> [x] Ninja Tune"));
        assert!(first.style.reverse);
        assert_eq!(first.style.fg, Some(Color::Green));
        let second = cells.iter().find(|c| c.row == 2).unwrap();
        assert!(second.text.starts_with("  [ ] Warp"));
        assert!(!second.style.reverse);
        assert_eq!(second.style.fg, None);
    }

    #[test]
    fn confirm_dialog_shows_default_answer() {
        let mut s = state(&["Ninja Tune"], 10, 80);
        s.handle(Key::Enter);
        let cells = layout(&s, "Labels");
        let prompt = cells.iter().find(|c| c.row == 9).unwrap();
        assert!(prompt.text.contains("[Yes]"));
    }
}
