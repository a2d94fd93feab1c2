use crate::style::Style;
use termloop_text::grapheme_width;

/// A single terminal cell.
///
/// A wide grapheme (width 2) claims two adjacent columns in a row: the
/// first holds the real `Cell::Lead`, the second holds `Cell::Continuation`,
/// a sentinel that is never addressed or written independently of its
/// owner. An empty cell is a lead cell holding a single space with default
/// style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Lead { grapheme: String, style: Style, width: u8 },
    Continuation,
}

impl Cell {
    /// A lead cell for `grapheme` with `style`. Width is derived from the
    /// grapheme itself (1 or 2 columns).
    pub fn new(grapheme: impl Into<String>, style: Style) -> Self {
        let grapheme = grapheme.into();
        let width = grapheme_width(&grapheme);
        Cell::Lead {
            grapheme,
            style,
            width,
        }
    }

    /// The continuation sentinel that follows a wide lead cell.
    pub fn continuation() -> Self {
        Cell::Continuation
    }

    /// A single blank space with default style — the empty-cell value.
    pub fn blank() -> Self {
        Cell::new(" ", Style::default())
    }

    pub fn is_lead(&self) -> bool {
        matches!(self, Cell::Lead { .. })
    }

    pub fn is_continuation(&self) -> bool {
        matches!(self, Cell::Continuation)
    }

    /// Column width: `1` or `2` for a lead cell, `0` for a continuation
    /// sentinel (it occupies no independently addressable width of its own).
    pub fn width(&self) -> u8 {
        match self {
            Cell::Lead { width, .. } => *width,
            Cell::Continuation => 0,
        }
    }

    pub fn grapheme(&self) -> &str {
        match self {
            Cell::Lead { grapheme, .. } => grapheme,
            Cell::Continuation => "",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Cell::Lead { style, .. } => *style,
            Cell::Continuation => Style::default(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank()
    }
}
