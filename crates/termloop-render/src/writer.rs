use crate::cursor_optimizer::{CursorOptimizer, Move};
use crate::op::Op;
use crate::sequence_buffer::{PushOutcome, SequenceBuffer};
use crate::sgr::style_delta;
use termloop_text::grapheme_width;
use termloop_types::{Color, Grid, Style, WriterState};

/// Bundles the writer-observable state (`StyleState`/`CursorState`), the
/// cursor-movement optimizer, and the output accumulator into the single
/// object that walks a frame's [`Op`] stream and turns it into bytes.
pub struct FrameWriter {
    state: WriterState,
    optimizer: CursorOptimizer,
    buffer: SequenceBuffer,
}

impl Default for FrameWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameWriter {
    pub fn new() -> Self {
        FrameWriter {
            state: WriterState::new(),
            optimizer: CursorOptimizer::new(),
            buffer: SequenceBuffer::new(),
        }
    }

    pub fn bytes_saved(&self) -> u64 {
        self.optimizer.bytes_saved()
    }

    /// Called after a full-screen clear: resets cursor to `(1,1)` and style
    /// to unknown.
    pub fn on_full_clear(&mut self) {
        self.state.on_full_clear();
        self.optimizer.reset();
    }

    /// Walk `ops` (the output of [`crate::diff::diff`]) against `target`
    /// (the buffer being rendered to, used only to check whether cells
    /// traversed by a same-row cursor move are blank with the writer's
    /// active background, the guard the literal-spaces optimization needs)
    /// and append the resulting bytes to the internal buffer. Returns
    /// `true` if the soft threshold was crossed and the caller should flush.
    pub fn emit(&mut self, ops: &[Op], target: &Grid) -> bool {
        let mut auto_flush = false;
        for op in ops {
            match op {
                Op::Move(row, col) => self.emit_move(*row, *col, target, &mut auto_flush),
                Op::Style(style) => self.emit_style(*style, &mut auto_flush),
                Op::Text(text) => self.emit_text(text, &mut auto_flush),
            }
        }
        auto_flush
    }

    fn emit_move(&mut self, row: u16, col: u16, target: &Grid, auto_flush: &mut bool) {
        let from = self.state.cursor.get();
        let mv = match from {
            None => Move::Absolute(row, col),
            Some(from) => {
                let gap_is_blank = from.0 == row && gap_is_blank(target, row, from.1, col, self.active_bg());
                self.optimizer.choose(from, (row, col), gap_is_blank)
            }
        };
        self.push(&encode_move(&mv), auto_flush);
        self.state.cursor.set(row, col);
    }

    fn emit_style(&mut self, style: Style, auto_flush: &mut bool) {
        if let Some(seq) = style_delta(self.state.style, style) {
            self.push(&seq, auto_flush);
        }
        self.state.style.set(style);
    }

    fn emit_text(&mut self, text: &str, auto_flush: &mut bool) {
        self.push(text, auto_flush);
        let width: u16 = termloop_text::segment_graphemes(text)
            .iter()
            .map(|s| s.width as u16)
            .sum();
        self.state.cursor.advance(width);
    }

    fn active_bg(&self) -> Option<Color> {
        self.state.style.get().and_then(|s| s.bg)
    }

    fn push(&mut self, s: &str, auto_flush: &mut bool) {
        if let PushOutcome::AutoFlush(_) = self.buffer.push_str(s) {
            *auto_flush = true;
        }
    }

    /// Flush accumulated bytes for this frame. One call per frame under
    /// normal operation; more if [`Self::emit`] reported an auto-flush.
    pub fn flush(&mut self) -> Vec<u8> {
        self.buffer.flush()
    }

    pub fn stats(&self) -> crate::sequence_buffer::SequenceBufferStats {
        self.buffer.stats()
    }
}

/// True if every cell strictly between columns `from_col` and `to_col` on
/// `row` is blank (a single default-styled space) and the writer's
/// currently active background, if any, is the terminal default — the
/// guard required before literal spaces are safe to use as a move.
fn gap_is_blank(target: &Grid, row: u16, from_col: u16, to_col: u16, active_bg: Option<Color>) -> bool {
    if to_col <= from_col {
        return false;
    }
    if !matches!(active_bg, None | Some(Color::Default)) {
        return false;
    }
    ((from_col + 1)..to_col).all(|col| {
        target
            .get(row, col)
            .map(|c| c.grapheme() == " " && c.style() == Style::default())
            .unwrap_or(false)
    })
}

fn encode_move(mv: &Move) -> String {
    match mv {
        Move::Absolute(row, col) => format!("\x1b[{row};{col}H"),
        Move::Up(n) => csi_count(*n, 'A'),
        Move::Down(n) => csi_count(*n, 'B'),
        Move::Right(n) => csi_count(*n, 'C'),
        Move::Left(n) => csi_count(*n, 'D'),
        Move::CarriageReturn => "\r".to_string(),
        Move::CarriageReturnDown(n) => format!("\r{}", "\n".repeat(*n as usize)),
        Move::Home => "\r".to_string(),
        Move::AbsoluteHome => "\x1b[H".to_string(),
        Move::LiteralSpaces(n) => " ".repeat(*n as usize),
    }
}

fn csi_count(n: u16, final_byte: char) -> String {
    if n == 1 {
        format!("\x1b[{final_byte}")
    } else {
        format!("\x1b[{n}{final_byte}")
    }
}

/// Grapheme width of a single text fragment, re-exported for callers that
/// need to advance a cursor manually (the runtime binary's initial-draw
/// path bypasses [`FrameWriter::emit`] for the very first full frame).
pub fn text_width(text: &str) -> u16 {
    grapheme_width(text) as u16
}
