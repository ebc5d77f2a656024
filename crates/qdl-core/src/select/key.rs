/// Key events the selector reacts to, independent of the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    Enter,
    Esc,
    Char(char),
    /// Ctrl-C while the terminal is raw (no SIGINT is delivered then).
    Interrupt,
    /// The terminal was resized; only triggers a redraw.
    Resize,
    Other,
}
