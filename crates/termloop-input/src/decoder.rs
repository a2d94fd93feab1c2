use crate::mouse::{decode_button_byte, resolve_action};
use crate::tables::tilde_key;
use termloop_types::{Event, KeyName, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi,
    Ss3,
    SgrMouse,
    X10Mouse,
    Paste,
}

/// Streaming escape-sequence decoder. Feed it raw bytes as they arrive
/// from the tty; it returns the `Event`s it can decode immediately and
/// holds an internal tail for anything that spans a `feed` call boundary
/// (a split escape sequence, a split UTF-8 codepoint, an in-progress
/// paste). Unknown sequences are dropped silently and reset the machine
/// to `Ground` — they never produce an event, panic, or halt decoding.
pub struct Decoder {
    state: State,
    csi_private: Option<u8>,
    csi_params: Vec<u16>,
    csi_current: Option<u16>,
    utf8_buf: Vec<u8>,
    utf8_remaining: u8,
    paste_buf: Vec<u8>,
    mouse_bytes: Vec<u8>,
    pending_cr: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

const PASTE_END: &[u8] = b"\x1b[201~";

impl Decoder {
    pub fn new() -> Self {
        Decoder {
            state: State::Ground,
            csi_private: None,
            csi_params: Vec::new(),
            csi_current: None,
            utf8_buf: Vec::new(),
            utf8_remaining: 0,
            paste_buf: Vec::new(),
            mouse_bytes: Vec::new(),
            pending_cr: false,
        }
    }

    /// Clear all internal buffers and return to `Ground`. Does not affect
    /// any events already returned from a prior `feed` call.
    pub fn reset(&mut self) {
        self.state = State::Ground;
        self.csi_private = None;
        self.csi_params.clear();
        self.csi_current = None;
        self.utf8_buf.clear();
        self.utf8_remaining = 0;
        self.paste_buf.clear();
        self.mouse_bytes.clear();
        self.pending_cr = false;
    }

    fn enter_csi(&mut self) {
        self.state = State::Csi;
        self.csi_private = None;
        self.csi_params.clear();
        self.csi_current = None;
    }

    fn push_param_digit(&mut self, digit: u16) {
        self.csi_current = Some(self.csi_current.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }

    fn commit_param(&mut self) {
        if let Some(p) = self.csi_current.take() {
            self.csi_params.push(p);
        }
    }

    /// `called after a timeout elapses while in the `Escape` state with no
    /// further byte available: emits a bare `Key(Escape)` and returns to
    /// `Ground`. The timeout itself is the caller's (input reader's)
    /// responsibility, per the escape-disambiguation window.
    pub fn flush_escape(&mut self) -> Option<Event> {
        if self.state == State::Escape {
            self.state = State::Ground;
            Some(Event::key(KeyName::Escape, None, Modifiers::empty()))
        } else {
            None
        }
    }

    /// Whether a `\r` is currently held waiting to see if a `\n` follows.
    pub fn has_pending_cr(&self) -> bool {
        self.pending_cr
    }

    /// Resolve a held `\r` with no `\n` having followed in time, emitting
    /// the deferred `Enter` it stands for. Same disambiguation shape as
    /// [`Self::flush_escape`], driven by the same reader timeout.
    pub fn flush_cr(&mut self) -> Option<Event> {
        if self.pending_cr {
            self.pending_cr = false;
            Some(Event::key(KeyName::Enter, None, Modifiers::empty()))
        } else {
            None
        }
    }

    /// Feed a chunk of raw bytes, returning every `Event` decoded from it.
    /// Bytes that begin a sequence not yet complete are held internally
    /// and resumed on the next call, including a lone `\r` in `Ground`
    /// state: it is held rather than turned into `Enter` immediately, so
    /// an immediately-following `\n` collapses into a single `Enter`
    /// event instead of two. The held `\r` is resolved by whatever byte
    /// arrives next, even across a `feed` call boundary; it does not time
    /// out like a bare `ESC` does, since unlike `ESC` a `\r` is never
    /// itself a distinct keypress worth flushing early.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut out = Vec::new();
        for &byte in bytes {
            if self.pending_cr {
                self.pending_cr = false;
                if byte == 0x0A && self.state == State::Ground {
                    out.push(Event::key(KeyName::Enter, None, Modifiers::empty()));
                    continue;
                }
                out.push(Event::key(KeyName::Enter, None, Modifiers::empty()));
            }
            if self.state == State::Ground && self.utf8_remaining == 0 && byte == 0x0D {
                self.pending_cr = true;
                continue;
            }
            if let Some(ev) = self.feed_byte(byte) {
                out.push(ev);
            }
        }
        out
    }

    fn feed_byte(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            State::Ground => self.ground(byte),
            State::Escape => self.escape(byte),
            State::Csi => self.csi(byte),
            State::Ss3 => self.ss3(byte),
            State::SgrMouse => self.sgr_mouse(byte),
            State::X10Mouse => self.x10_mouse(byte),
            State::Paste => self.paste(byte),
        }
    }

    fn ground(&mut self, byte: u8) -> Option<Event> {
        if self.utf8_remaining > 0 {
            return self.utf8_continuation(byte);
        }

        match byte {
            0x1B => {
                self.state = State::Escape;
                None
            }
            0x08 | 0x7F => Some(Event::key(KeyName::Backspace, None, Modifiers::empty())),
            0x09 => Some(Event::key(KeyName::Tab, None, Modifiers::empty())),
            0x0A => Some(Event::key(KeyName::Enter, None, Modifiers::empty())),
            0x00..=0x1F => {
                let c = (byte | 0x40) as char; // Ctrl-A..=Ctrl-Z style mapping
                Some(Event::key(KeyName::Char, Some(c.to_ascii_lowercase()), Modifiers::CTRL))
            }
            0x20..=0x7E => Some(Event::char_key(byte as char, Modifiers::empty())),
            _ => self.start_utf8(byte),
        }
    }

    fn start_utf8(&mut self, byte: u8) -> Option<Event> {
        let len = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => {
                tracing::trace!(byte, "invalid utf-8 lead byte dropped");
                return None;
            }
        };
        self.utf8_buf.clear();
        self.utf8_buf.push(byte);
        self.utf8_remaining = len - 1;
        None
    }

    fn utf8_continuation(&mut self, byte: u8) -> Option<Event> {
        if byte & 0xC0 != 0x80 {
            tracing::trace!(byte, "invalid utf-8 continuation byte; sequence dropped");
            self.utf8_buf.clear();
            self.utf8_remaining = 0;
            return self.ground(byte);
        }
        self.utf8_buf.push(byte);
        self.utf8_remaining -= 1;
        if self.utf8_remaining == 0 {
            let c = std::str::from_utf8(&self.utf8_buf).ok().and_then(|s| s.chars().next());
            self.utf8_buf.clear();
            c.map(|c| Event::char_key(c, Modifiers::empty()))
        } else {
            None
        }
    }

    fn escape(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'[' => {
                self.enter_csi();
                None
            }
            b'O' => {
                self.state = State::Ss3;
                None
            }
            0x20..=0x7E => {
                self.state = State::Ground;
                Some(Event::key(KeyName::Char, Some(byte as char), Modifiers::ALT))
            }
            _ => {
                self.state = State::Ground;
                None
            }
        }
    }

    fn ss3(&mut self, byte: u8) -> Option<Event> {
        self.state = State::Ground;
        let name = match byte {
            b'P' => KeyName::F(1),
            b'Q' => KeyName::F(2),
            b'R' => KeyName::F(3),
            b'S' => KeyName::F(4),
            b'H' => KeyName::Home,
            b'F' => KeyName::End,
            _ => return None,
        };
        Some(Event::key(name, None, Modifiers::empty()))
    }

    fn csi(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'0'..=b'9' => {
                self.push_param_digit((byte - b'0') as u16);
                None
            }
            b';' => {
                self.csi_params.push(self.csi_current.take().unwrap_or(0));
                None
            }
            b'<' => {
                self.csi_private = Some(byte);
                self.state = State::SgrMouse;
                None
            }
            b'?' | b'>' | b'=' | b'!' => {
                self.csi_private = Some(byte);
                None
            }
            b'M' if self.csi_params.is_empty() && self.csi_current.is_none() && self.csi_private.is_none() => {
                self.state = State::X10Mouse;
                self.mouse_bytes.clear();
                None
            }
            _ => {
                self.commit_param();
                self.dispatch_csi_final(byte)
            }
        }
    }

    fn dispatch_csi_final(&mut self, final_byte: u8) -> Option<Event> {
        self.state = State::Ground;
        let params = std::mem::take(&mut self.csi_params);
        self.csi_private = None;

        let mods_from_second = |params: &[u16]| -> Modifiers {
            params.get(1).map(|&m| Modifiers::from_csi_param(m)).unwrap_or_default()
        };

        match final_byte {
            b'A' => Some(Event::key(KeyName::Up, None, mods_from_second(&params))),
            b'B' => Some(Event::key(KeyName::Down, None, mods_from_second(&params))),
            b'C' => Some(Event::key(KeyName::Right, None, mods_from_second(&params))),
            b'D' => Some(Event::key(KeyName::Left, None, mods_from_second(&params))),
            b'H' => Some(Event::key(KeyName::Home, None, mods_from_second(&params))),
            b'F' => Some(Event::key(KeyName::End, None, mods_from_second(&params))),
            b'I' => Some(Event::Focus { gained: true }),
            b'O' => Some(Event::Focus { gained: false }),
            b'~' => self.dispatch_tilde(&params),
            _ => {
                tracing::trace!(final_byte, ?params, "unknown CSI sequence dropped");
                None
            }
        }
    }

    fn dispatch_tilde(&mut self, params: &[u16]) -> Option<Event> {
        let code = *params.first()?;
        if code == 200 {
            self.state = State::Paste;
            self.paste_buf.clear();
            return None;
        }
        if code == 201 {
            // stray end-of-paste with no active paste: ignore.
            return None;
        }
        let mods = params.get(1).map(|&m| Modifiers::from_csi_param(m)).unwrap_or_default();
        tilde_key(code).map(|name| Event::key(name, None, mods))
    }

    fn sgr_mouse_final(&mut self, params: &[u16], is_release: bool) -> Option<Event> {
        if params.len() < 3 {
            return None;
        }
        let decoded = decode_button_byte(params[0] as u8);
        let action = resolve_action(&decoded, is_release);
        Some(Event::Mouse {
            action,
            button: decoded.button,
            x: params[1],
            y: params[2],
            mods: decoded.mods,
        })
    }

    /// `CSI <` has already been consumed; accumulate `Cb;Cx;Cy` the same
    /// way the generic CSI state does, then dispatch on the `M`/`m`
    /// terminator that distinguishes press from release.
    fn sgr_mouse(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'0'..=b'9' => {
                self.push_param_digit((byte - b'0') as u16);
                None
            }
            b';' => {
                self.csi_params.push(self.csi_current.take().unwrap_or(0));
                None
            }
            b'M' | b'm' => {
                self.commit_param();
                let params = std::mem::take(&mut self.csi_params);
                self.csi_private = None;
                self.state = State::Ground;
                self.sgr_mouse_final(&params, byte == b'm')
            }
            _ => {
                tracing::trace!(byte, "malformed SGR mouse sequence dropped");
                self.state = State::Ground;
                self.csi_params.clear();
                self.csi_current = None;
                self.csi_private = None;
                None
            }
        }
    }

    fn x10_mouse(&mut self, byte: u8) -> Option<Event> {
        self.mouse_bytes.push(byte);
        if self.mouse_bytes.len() < 3 {
            return None;
        }
        self.state = State::Ground;
        let cb = self.mouse_bytes[0].wrapping_sub(32);
        let cx = self.mouse_bytes[1].wrapping_sub(32);
        let cy = self.mouse_bytes[2].wrapping_sub(32);
        self.mouse_bytes.clear();

        let base = cb & 0x3;
        if base == 3 {
            return Some(Event::Mouse {
                action: termloop_types::MouseAction::Release,
                button: None,
                x: cx as u16,
                y: cy as u16,
                mods: decode_button_byte(cb).mods,
            });
        }
        let decoded = decode_button_byte(cb);
        let action = resolve_action(&decoded, false);
        Some(Event::Mouse {
            action,
            button: decoded.button,
            x: cx as u16,
            y: cy as u16,
            mods: decoded.mods,
        })
    }

    fn paste(&mut self, byte: u8) -> Option<Event> {
        self.paste_buf.push(byte);
        if self.paste_buf.ends_with(PASTE_END) {
            let text_len = self.paste_buf.len() - PASTE_END.len();
            let text = String::from_utf8_lossy(&self.paste_buf[..text_len]).into_owned();
            self.paste_buf.clear();
            self.state = State::Ground;
            Some(Event::Paste { text })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termloop_types::{KeyName, MouseAction, MouseButton};

    #[test]
    fn plain_ascii_yields_char_key() {
        let mut d = Decoder::new();
        let evs = d.feed(b"a");
        assert_eq!(evs, vec![Event::char_key('a', Modifiers::empty())]);
    }

    #[test]
    fn ctrl_c_yields_ctrl_modifier() {
        let mut d = Decoder::new();
        let evs = d.feed(&[0x03]);
        assert_eq!(evs.len(), 1);
        match &evs[0] {
            Event::Key { mods, .. } => assert!(mods.contains(Modifiers::CTRL)),
            _ => panic!("expected key event"),
        }
    }

    #[test]
    fn backspace_and_tab_and_enter() {
        let mut d = Decoder::new();
        assert_eq!(d.feed(&[0x7F]), vec![Event::key(KeyName::Backspace, None, Modifiers::empty())]);
        assert_eq!(d.feed(&[0x09]), vec![Event::key(KeyName::Tab, None, Modifiers::empty())]);
        // a lone CR is held to see if LF follows; a subsequent unrelated
        // byte first flushes the deferred Enter, then decodes normally.
        assert!(d.feed(&[0x0D]).is_empty());
        assert!(d.has_pending_cr());
        assert_eq!(
            d.feed(b"a"),
            vec![
                Event::key(KeyName::Enter, None, Modifiers::empty()),
                Event::char_key('a', Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn crlf_collapses_into_single_enter() {
        let mut d = Decoder::new();
        let evs = d.feed(b"\r\n");
        assert_eq!(evs, vec![Event::key(KeyName::Enter, None, Modifiers::empty())]);
        assert!(!d.has_pending_cr());
    }

    #[test]
    fn lone_cr_flushes_via_flush_cr_when_nothing_follows() {
        let mut d = Decoder::new();
        assert!(d.feed(&[0x0D]).is_empty());
        assert!(d.has_pending_cr());
        assert_eq!(d.flush_cr(), Some(Event::key(KeyName::Enter, None, Modifiers::empty())));
        assert!(!d.has_pending_cr());
        assert_eq!(d.flush_cr(), None);
    }

    #[test]
    fn cr_followed_by_non_lf_flushes_enter_then_decodes_byte() {
        let mut d = Decoder::new();
        assert!(d.feed(&[0x0D]).is_empty());
        let evs = d.feed(&[0x09]);
        assert_eq!(
            evs,
            vec![
                Event::key(KeyName::Enter, None, Modifiers::empty()),
                Event::key(KeyName::Tab, None, Modifiers::empty()),
            ]
        );
    }

    #[test]
    fn arrow_with_ctrl_modifier() {
        let mut d = Decoder::new();
        let evs = d.feed(b"\x1b[1;5A");
        assert_eq!(evs, vec![Event::key(KeyName::Up, None, Modifiers::CTRL)]);
    }

    #[test]
    fn plain_arrow_no_params() {
        let mut d = Decoder::new();
        let evs = d.feed(b"\x1b[A");
        assert_eq!(evs, vec![Event::key(KeyName::Up, None, Modifiers::empty())]);
    }

    #[test]
    fn tilde_keyed_delete() {
        let mut d = Decoder::new();
        let evs = d.feed(b"\x1b[3~");
        assert_eq!(evs, vec![Event::key(KeyName::Delete, None, Modifiers::empty())]);
    }

    #[test]
    fn partial_utf8_split_across_feed_calls() {
        let mut d = Decoder::new();
        // U+4E2D "中" is E4 B8 AD.
        let first = d.feed(&[0xE4]);
        assert!(first.is_empty());
        let rest = d.feed(&[0xB8, 0xAD]);
        assert_eq!(rest, vec![Event::char_key('\u{4E2D}', Modifiers::empty())]);
    }

    #[test]
    fn bare_escape_with_no_follow_up_stays_pending_then_flushes() {
        let mut d = Decoder::new();
        let evs = d.feed(&[0x1B]);
        assert!(evs.is_empty());
        let flushed = d.flush_escape();
        assert_eq!(flushed, Some(Event::key(KeyName::Escape, None, Modifiers::empty())));
    }

    #[test]
    fn alt_modified_letter() {
        let mut d = Decoder::new();
        let evs = d.feed(b"\x1bx");
        assert_eq!(evs, vec![Event::key(KeyName::Char, Some('x'), Modifiers::ALT)]);
    }

    #[test]
    fn sgr_mouse_press_and_release() {
        let mut d = Decoder::new();
        let press = d.feed(b"\x1b[<0;10;20M");
        assert_eq!(
            press,
            vec![Event::Mouse {
                action: MouseAction::Press,
                button: Some(MouseButton::Left),
                x: 10,
                y: 20,
                mods: Modifiers::empty(),
            }]
        );
        let release = d.feed(b"\x1b[<0;10;20m");
        assert_eq!(
            release,
            vec![Event::Mouse {
                action: MouseAction::Release,
                button: Some(MouseButton::Left),
                x: 10,
                y: 20,
                mods: Modifiers::empty(),
            }]
        );
    }

    #[test]
    fn x10_mouse_decodes_three_byte_payload() {
        let mut d = Decoder::new();
        // Button=left(0)+32=32(' '), col=10+32=42('*'), row=20+32=52('4').
        let evs = d.feed(&[0x1B, b'[', b'M', 32, 42, 52]);
        assert_eq!(
            evs,
            vec![Event::Mouse {
                action: MouseAction::Press,
                button: Some(MouseButton::Left),
                x: 10,
                y: 20,
                mods: Modifiers::empty(),
            }]
        );
    }

    #[test]
    fn bracketed_paste_accumulates_until_terminator() {
        let mut d = Decoder::new();
        let start = d.feed(b"\x1b[200~hello ");
        assert!(start.is_empty());
        let evs = d.feed(b"world\x1b[201~");
        assert_eq!(evs, vec![Event::Paste { text: "hello world".into() }]);
    }

    #[test]
    fn focus_gained_and_lost() {
        let mut d = Decoder::new();
        assert_eq!(d.feed(b"\x1b[I"), vec![Event::Focus { gained: true }]);
        assert_eq!(d.feed(b"\x1b[O"), vec![Event::Focus { gained: false }]);
    }

    #[test]
    fn unknown_sequence_drops_silently_and_resets() {
        let mut d = Decoder::new();
        let evs = d.feed(b"\x1b[9999z");
        assert!(evs.is_empty());
        // decoder is back in Ground and can decode normally afterwards.
        let next = d.feed(b"a");
        assert_eq!(next, vec![Event::char_key('a', Modifiers::empty())]);
    }

    #[test]
    fn ss3_function_keys() {
        let mut d = Decoder::new();
        assert_eq!(d.feed(b"\x1bOP"), vec![Event::key(KeyName::F(1), None, Modifiers::empty())]);
    }
}
