use crate::attribute::AttributeSet;
use crate::color::Color;

/// A cell's visual style. `None` for `fg`/`bg` means "inherit from
/// whatever is already on screen"; `Some(Color::Default)` is the explicit
/// terminal-default reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub attrs: AttributeSet,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn with_attrs(mut self, attrs: AttributeSet) -> Self {
        self.attrs = attrs;
        self
    }

    /// Merge `override_style` on top of `base`: `Some` colors in the
    /// override win, `None` falls back to `base`; attribute sets union.
    pub fn merge(base: Style, override_style: Style) -> Style {
        Style {
            fg: override_style.fg.or(base.fg),
            bg: override_style.bg.or(base.bg),
            attrs: base.attrs | override_style.attrs,
        }
    }

    /// Structural equality, spelled out for readers who expect an explicit
    /// comparison function next to `merge`.
    pub fn equal(a: &Style, b: &Style) -> bool {
        a == b
    }
}
