/// One of the 16 standard named terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    /// SGR foreground parameter for this color (`30..=37` or `90..=97`).
    pub fn sgr_fg(self) -> u16 {
        self.base_index() as u16 + if self.is_bright() { 90 } else { 30 }
    }

    /// SGR background parameter for this color (`40..=47` or `100..=107`).
    pub fn sgr_bg(self) -> u16 {
        self.base_index() as u16 + if self.is_bright() { 100 } else { 40 }
    }

    fn is_bright(self) -> bool {
        matches!(
            self,
            NamedColor::BrightBlack
                | NamedColor::BrightRed
                | NamedColor::BrightGreen
                | NamedColor::BrightYellow
                | NamedColor::BrightBlue
                | NamedColor::BrightMagenta
                | NamedColor::BrightCyan
                | NamedColor::BrightWhite
        )
    }

    fn base_index(self) -> u8 {
        match self {
            NamedColor::Black | NamedColor::BrightBlack => 0,
            NamedColor::Red | NamedColor::BrightRed => 1,
            NamedColor::Green | NamedColor::BrightGreen => 2,
            NamedColor::Yellow | NamedColor::BrightYellow => 3,
            NamedColor::Blue | NamedColor::BrightBlue => 4,
            NamedColor::Magenta | NamedColor::BrightMagenta => 5,
            NamedColor::Cyan | NamedColor::BrightCyan => 6,
            NamedColor::White | NamedColor::BrightWhite => 7,
        }
    }
}

/// A terminal color: the explicit default, one of the 16 named colors, an
/// indexed 256-color palette entry, or true-color RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Default,
    Named(NamedColor),
    Palette256(u8),
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_compare_structurally() {
        assert_eq!(Color::Named(NamedColor::Red), Color::Named(NamedColor::Red));
        assert_ne!(Color::Named(NamedColor::Red), Color::Named(NamedColor::Blue));
    }

    #[test]
    fn bright_fg_codes_use_90_range() {
        assert_eq!(NamedColor::BrightRed.sgr_fg(), 91);
        assert_eq!(NamedColor::Red.sgr_fg(), 31);
    }

    #[test]
    fn bg_codes_offset_by_ten() {
        assert_eq!(NamedColor::Green.sgr_bg(), 42);
        assert_eq!(NamedColor::BrightGreen.sgr_bg(), 102);
    }
}
