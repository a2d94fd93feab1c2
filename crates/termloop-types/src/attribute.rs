use bitflags::bitflags;

bitflags! {
    /// A set of text attributes. Order-insensitive; a cell carries a set,
    /// not a sequence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeSet: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const BLINK         = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
        const HIDDEN        = 0b0100_0000;
        const STRIKETHROUGH = 0b1000_0000;
    }
}

/// A single text attribute, used where callers want to name one flag
/// rather than build a set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
}

impl From<Attribute> for AttributeSet {
    fn from(attr: Attribute) -> Self {
        match attr {
            Attribute::Bold => AttributeSet::BOLD,
            Attribute::Dim => AttributeSet::DIM,
            Attribute::Italic => AttributeSet::ITALIC,
            Attribute::Underline => AttributeSet::UNDERLINE,
            Attribute::Blink => AttributeSet::BLINK,
            Attribute::Reverse => AttributeSet::REVERSE,
            Attribute::Hidden => AttributeSet::HIDDEN,
            Attribute::Strikethrough => AttributeSet::STRIKETHROUGH,
        }
    }
}

/// SGR "on" codes for each attribute bit present in `attrs`, in the fixed
/// order bold, dim, italic, underline, blink, reverse, hidden, strikethrough.
pub fn sgr_on_codes(attrs: AttributeSet) -> Vec<u16> {
    const ORDER: [(AttributeSet, u16); 8] = [
        (AttributeSet::BOLD, 1),
        (AttributeSet::DIM, 2),
        (AttributeSet::ITALIC, 3),
        (AttributeSet::UNDERLINE, 4),
        (AttributeSet::BLINK, 5),
        (AttributeSet::REVERSE, 7),
        (AttributeSet::HIDDEN, 8),
        (AttributeSet::STRIKETHROUGH, 9),
    ];
    ORDER
        .iter()
        .filter(|(flag, _)| attrs.contains(*flag))
        .map(|(_, code)| *code)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_order_insensitive() {
        let a = AttributeSet::BOLD | AttributeSet::ITALIC;
        let b = AttributeSet::ITALIC | AttributeSet::BOLD;
        assert_eq!(a, b);
    }

    #[test]
    fn sgr_codes_follow_fixed_order() {
        let attrs = AttributeSet::UNDERLINE | AttributeSet::BOLD;
        assert_eq!(sgr_on_codes(attrs), vec![1, 4]);
    }
}
