use termloop_types::KeyName;

/// `CSI Ps ~` tilde-keyed table. `200`/`201` (bracketed paste begin/end)
/// are handled separately by the state machine, not through this table.
pub fn tilde_key(code: u16) -> Option<KeyName> {
    Some(match code {
        1 => KeyName::Home,
        2 => KeyName::Insert,
        3 => KeyName::Delete,
        4 => KeyName::End,
        5 => KeyName::PageUp,
        6 => KeyName::PageDown,
        15 => KeyName::F(5),
        17 => KeyName::F(6),
        18 => KeyName::F(7),
        19 => KeyName::F(8),
        20 => KeyName::F(9),
        21 => KeyName::F(10),
        23 => KeyName::F(11),
        24 => KeyName::F(12),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map() {
        assert_eq!(tilde_key(3), Some(KeyName::Delete));
        assert_eq!(tilde_key(24), Some(KeyName::F(12)));
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(tilde_key(999), None);
    }
}
