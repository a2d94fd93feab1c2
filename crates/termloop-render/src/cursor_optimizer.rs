/// Picks the byte-cheapest escape sequence that moves the cursor from one
/// known position to another, tracking how many bytes this saved versus
/// always emitting an absolute position sequence.
///
/// Candidates considered (see module-level constants for their byte costs):
/// an absolute `CUP`, relative up/down/left/right, a bare carriage return
/// (column 1 of the current row), `CR` plus relative-down, the true
/// `ESC[H` terminal-home sequence (offered only for an upward move to
/// exactly `(1,1)`, where a bare `CR` would land on the wrong row), and
/// literal spaces to slide right without any sequence at all. Ties are
/// broken in the order listed: absolute, then relative, then CR-based,
/// then home, then literal spaces.
#[derive(Debug, Default)]
pub struct CursorOptimizer {
    bytes_saved: u64,
}

/// A chosen way to move the cursor, independent of how it gets encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Move {
    /// `CSI row ; col H`
    Absolute(u16, u16),
    Up(u16),
    Down(u16),
    Right(u16),
    Left(u16),
    /// Bare `\r`.
    CarriageReturn,
    /// `\r` followed by `n` line feeds.
    CarriageReturnDown(u16),
    /// `\r` alone moves to column 1 of the same row.
    Home,
    /// `ESC [ H`: the true terminal-home sequence, absolute `(1,1)`. Only
    /// offered when the target is exactly `(1,1)` and a row-local `\r`
    /// would land on the wrong row (moving to an earlier row).
    AbsoluteHome,
    /// `n` literal space characters, sliding the cursor right by typing
    /// over cells. Only a legal candidate when the cells passed over are
    /// blank in the target buffer; the caller is responsible for that
    /// check, this module only reports cost.
    LiteralSpaces(u16),
}

impl Move {
    /// Byte length of the sequence this candidate would actually write.
    pub fn cost(&self) -> usize {
        match self {
            Move::Absolute(row, col) => format!("\x1b[{row};{col}H").len(),
            Move::Up(n) => csi_count_len(*n, 'A'),
            Move::Down(n) => csi_count_len(*n, 'B'),
            Move::Right(n) => csi_count_len(*n, 'C'),
            Move::Left(n) => csi_count_len(*n, 'D'),
            Move::CarriageReturn => 1,
            Move::CarriageReturnDown(n) => 1 + *n as usize,
            Move::Home => 1,
            Move::AbsoluteHome => 3, // "\x1b[H"
            Move::LiteralSpaces(n) => *n as usize,
        }
    }
}

fn csi_count_len(n: u16, _final_byte: char) -> usize {
    if n == 1 {
        3 // "\x1b[A" etc. default count omitted
    } else {
        format!("\x1b[{n}").len() + 1
    }
}

impl CursorOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes saved across every call to [`Self::choose`] so far,
    /// relative to always emitting [`Move::Absolute`].
    pub fn bytes_saved(&self) -> u64 {
        self.bytes_saved
    }

    /// Reset the cursor position's knowledge the optimizer depends on.
    /// Does *not* reset `bytes_saved`: the statistic accumulates across
    /// resets (e.g. full-screen clears), it is a lifetime counter.
    pub fn reset(&mut self) {}

    /// Choose the cheapest way to move from `from` to `to`, given the row
    /// width (used to decide whether `CR` reaches column 1 directly) and
    /// whether every cell strictly between `from` and `to` on the same
    /// row is blank in the target buffer (making [`Move::LiteralSpaces`]
    /// a legal candidate).
    pub fn choose(&mut self, from: (u16, u16), to: (u16, u16), gap_is_blank: bool) -> Move {
        let absolute = Move::Absolute(to.0, to.1);
        let mut candidates = vec![absolute.clone()];

        if from.0 == to.0 {
            // Same row: relative horizontal, CR-based, spaces.
            if to.1 > from.1 {
                candidates.push(Move::Right(to.1 - from.1));
                if gap_is_blank {
                    candidates.push(Move::LiteralSpaces(to.1 - from.1));
                }
            } else if to.1 < from.1 {
                candidates.push(Move::Left(from.1 - to.1));
            }
            if to.1 == 1 {
                candidates.push(Move::Home);
            }
        } else if from.1 == to.1 || to.1 == 1 {
            // Same column, or moving to column 1: CR (+ vertical) candidates.
            // This branch only runs when `from.0 != to.0` (the same-row case
            // is handled above). A bare `\r` only ever reaches column 1 of
            // the *current* row, so it is safe solely for a downward move
            // (CarriageReturnDown); an upward move to column 1 needs the
            // true terminal-home sequence, and only when the target is
            // exactly `(1,1)` — otherwise no CR-based candidate is offered
            // and absolute positioning wins.
            if to.1 == 1 {
                if to.0 > from.0 {
                    candidates.push(Move::CarriageReturnDown(to.0 - from.0));
                } else if to == (1, 1) {
                    candidates.push(Move::AbsoluteHome);
                }
            }
            if from.1 == to.1 {
                if to.0 > from.0 {
                    candidates.push(Move::Down(to.0 - from.0));
                } else if to.0 < from.0 {
                    candidates.push(Move::Up(from.0 - to.0));
                }
            }
        }

        let best = candidates
            .into_iter()
            .enumerate()
            .min_by_key(|(i, m)| (m.cost(), *i))
            .map(|(_, m)| m)
            .unwrap_or(absolute.clone());

        let saved = absolute.cost().saturating_sub(best.cost());
        self.bytes_saved += saved as u64;
        best
    }
}
