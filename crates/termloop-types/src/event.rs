use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a key or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const ALT   = 0b0010;
        const CTRL  = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Decode the CSI modifier parameter (`m` in `...;m...`) per the `m-1`
    /// bit field: `1=Shift, 2=Alt, 4=Ctrl, 8=Meta`.
    pub fn from_csi_param(m: u16) -> Modifiers {
        let bits = m.saturating_sub(1);
        let mut out = Modifiers::empty();
        if bits & 0x1 != 0 {
            out |= Modifiers::SHIFT;
        }
        if bits & 0x2 != 0 {
            out |= Modifiers::ALT;
        }
        if bits & 0x4 != 0 {
            out |= Modifiers::CTRL;
        }
        if bits & 0x8 != 0 {
            out |= Modifiers::META;
        }
        out
    }
}

/// The named identity of a key event. `Char` means "see the `char` field
/// for the literal character"; every other variant is a non-printable or
/// function key with no associated `char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyName {
    Char,
    Backspace,
    Tab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
    PageUp,
    PageDown,
    F(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Press,
    Release,
    Drag,
    WheelUp,
    WheelDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// A decoded terminal event. Timestamps are attached by the input reader
/// at the boundary where events are enqueued, not carried inside the enum
/// itself, so decoder tests can assert on exact event values.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Key {
        name: KeyName,
        char: Option<char>,
        mods: Modifiers,
    },
    Mouse {
        action: MouseAction,
        button: Option<MouseButton>,
        x: u16,
        y: u16,
        mods: Modifiers,
    },
    Focus {
        gained: bool,
    },
    Resize {
        rows: u16,
        cols: u16,
    },
    Paste {
        text: String,
    },
    Tick {
        interval_ms: u64,
    },
}

impl Event {
    pub fn key(name: KeyName, char: Option<char>, mods: Modifiers) -> Event {
        Event::Key { name, char, mods }
    }

    pub fn char_key(c: char, mods: Modifiers) -> Event {
        Event::Key {
            name: KeyName::Char,
            char: Some(c),
            mods,
        }
    }
}
