/// Mouse tracking granularity, mapped to xterm private modes 1000/1002/1003.
/// SGR extended coordinates (`1006`) are enabled alongside whichever of
/// these is active so columns beyond 223 still decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseMode {
    Click,
    Drag,
    All,
}

impl MouseMode {
    /// The xterm private-mode number this tracking level enables.
    pub fn xterm_code(self) -> u16 {
        match self {
            MouseMode::Click => 1000,
            MouseMode::Drag => 1002,
            MouseMode::All => 1003,
        }
    }

    /// `ESC[?{code}h` followed by `ESC[?1006h` to enable SGR coordinates.
    pub fn enable_sequence(self) -> String {
        format!("\x1b[?{}h\x1b[?1006h", self.xterm_code())
    }

    /// `ESC[?{code}l` to disable this tracking level (SGR mode disabling
    /// is handled separately since shutdown disables it unconditionally).
    pub fn disable_sequence(self) -> String {
        format!("\x1b[?{}l", self.xterm_code())
    }
}

/// The defensive "disable every mouse mode" sequence used at shutdown and
/// crash recovery: all three xterm tracking modes plus SGR, off, in the
/// fixed order `1006, 1003, 1002, 1000`.
pub fn disable_all_mouse_sequence() -> String {
    "\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xterm_codes_match_table() {
        assert_eq!(MouseMode::Click.xterm_code(), 1000);
        assert_eq!(MouseMode::Drag.xterm_code(), 1002);
        assert_eq!(MouseMode::All.xterm_code(), 1003);
    }

    #[test]
    fn disable_all_order_is_1006_1003_1002_1000() {
        let seq = disable_all_mouse_sequence();
        let p1006 = seq.find("1006").unwrap();
        let p1003 = seq.find("1003").unwrap();
        let p1002 = seq.find("1002").unwrap();
        let p1000 = seq.find("1000").unwrap();
        assert!(p1006 < p1003 && p1003 < p1002 && p1002 < p1000);
    }
}
