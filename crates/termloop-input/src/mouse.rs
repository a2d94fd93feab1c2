use termloop_types::{Modifiers, MouseAction, MouseButton};

/// Decoded mouse payload shared by the SGR and X10 encodings: both pack
/// the same button/modifier bits into a single byte, differing only in
/// how the terminator signals press vs release.
pub struct MouseButtonByte {
    pub action_base: u8,
    pub button: Option<MouseButton>,
    pub mods: Modifiers,
    pub is_drag: bool,
    pub is_wheel: bool,
}

/// Decode the shared button byte: `base = byte & 0x3`, `motion = byte &
/// 0x20`, `wheel = byte & 0x40`, modifiers from bits `0x4/0x8/0x10`.
pub fn decode_button_byte(byte: u8) -> MouseButtonByte {
    let base = byte & 0x3;
    let motion = byte & 0x20 != 0;
    let wheel = byte & 0x40 != 0;

    let mut mods = Modifiers::empty();
    if byte & 0x4 != 0 {
        mods |= Modifiers::SHIFT;
    }
    if byte & 0x8 != 0 {
        mods |= Modifiers::ALT;
    }
    if byte & 0x10 != 0 {
        mods |= Modifiers::CTRL;
    }

    let button = if wheel {
        None
    } else {
        match base {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    };

    MouseButtonByte {
        action_base: base,
        button,
        mods,
        is_drag: motion,
        is_wheel: wheel,
    }
}

/// Resolve the final `MouseAction` for a press/release terminator (SGR:
/// `M` = press, `m` = release) given the decoded button byte.
pub fn resolve_action(decoded: &MouseButtonByte, is_release: bool) -> MouseAction {
    if decoded.is_wheel {
        return match decoded.action_base {
            0 => MouseAction::WheelUp,
            _ => MouseAction::WheelDown,
        };
    }
    if decoded.is_drag {
        return MouseAction::Drag;
    }
    if is_release {
        MouseAction::Release
    } else {
        MouseAction::Press
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_zero_is_left_press() {
        let b = decode_button_byte(0);
        assert_eq!(b.button, Some(MouseButton::Left));
        assert_eq!(resolve_action(&b, false), MouseAction::Press);
    }

    #[test]
    fn wheel_bit_yields_wheel_up_or_down() {
        let up = decode_button_byte(0x40);
        assert_eq!(resolve_action(&up, false), MouseAction::WheelUp);
        let down = decode_button_byte(0x41);
        assert_eq!(resolve_action(&down, false), MouseAction::WheelDown);
    }

    #[test]
    fn motion_bit_yields_drag() {
        let drag = decode_button_byte(0x20);
        assert_eq!(resolve_action(&drag, false), MouseAction::Drag);
    }

    #[test]
    fn modifier_bits_decode() {
        let b = decode_button_byte(0x1C); // base 0 + shift(4) + alt(8) + ctrl(16)
        assert_eq!(b.mods, Modifiers::SHIFT | Modifiers::ALT | Modifiers::CTRL);
    }
}
