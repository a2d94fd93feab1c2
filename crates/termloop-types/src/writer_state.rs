use crate::style::Style;

/// The SGR writer's notion of "what style is currently active on the
/// terminal". `None` means unknown — the next cell must emit a full style
/// rather than a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleState(pub Option<Style>);

impl StyleState {
    pub fn unknown() -> Self {
        StyleState(None)
    }

    pub fn known(style: Style) -> Self {
        StyleState(Some(style))
    }

    pub fn get(&self) -> Option<Style> {
        self.0
    }

    pub fn set(&mut self, style: Style) {
        self.0 = Some(style);
    }

    pub fn reset_unknown(&mut self) {
        self.0 = None;
    }
}

/// The SGR writer's notion of "where the cursor currently is", 1-indexed.
/// `None` means unknown — the next move must be an absolute positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState(pub Option<(u16, u16)>);

impl CursorState {
    pub fn unknown() -> Self {
        CursorState(None)
    }

    pub fn at(row: u16, col: u16) -> Self {
        CursorState(Some((row, col)))
    }

    pub fn get(&self) -> Option<(u16, u16)> {
        self.0
    }

    pub fn set(&mut self, row: u16, col: u16) {
        self.0 = Some((row, col));
    }

    pub fn reset_unknown(&mut self) {
        self.0 = None;
    }

    /// Advance the cursor by `width` columns after writing text, the
    /// width-aware advancement the writer needs for wide graphemes
    /// (2 columns) rather than the naive 1-column-per-cell assumption.
    pub fn advance(&mut self, width: u16) {
        if let Some((row, col)) = self.0 {
            self.0 = Some((row, col + width));
        }
    }
}

/// Bundles the two pieces of writer-observable state that a full-screen
/// clear resets, per the invariant: cursor becomes `(1,1)`, style becomes
/// unknown (so the very next write emits a full style).
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterState {
    pub style: StyleState,
    pub cursor: CursorState,
}

impl WriterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_full_clear(&mut self) {
        self.cursor = CursorState::at(1, 1);
        self.style = StyleState::unknown();
    }
}
