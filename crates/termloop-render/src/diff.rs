use crate::op::Op;
use termloop_types::{Grid, Style};

/// Runs separated by a gap smaller than this many unchanged columns are
/// merged into a single run (the merged run's gap cells are re-emitted
/// from `current` even though they did not change).
const MERGE_GAP_THRESHOLD: usize = 3;

/// Compute the operations that turn `previous` into `current`.
///
/// Applying the returned ops, in order, to a writer that starts at
/// `previous`'s contents with an unknown cursor/style state reproduces
/// `current` byte-for-byte. The function is pure: the same two buffers
/// always produce the same op sequence.
pub fn diff(current: &Grid, previous: &Grid) -> Vec<Op> {
    let (rows, cols) = current.dims();
    debug_assert_eq!((rows, cols), previous.dims());

    let mut ops = Vec::new();
    for row in 1..=rows {
        let mask = changed_mask(current, previous, row, cols);
        let runs = merged_runs(&mask);
        for (start0, end0) in runs {
            let start_col = start0 as u16 + 1;
            let end_col = end0 as u16 + 1;
            emit_run(&mut ops, current, row, start_col, end_col);
        }
    }
    ops
}

/// Per-column changed flags for one row, with continuation sentinels
/// folded into their owning lead column so a wide grapheme's run never
/// starts or ends mid-glyph.
fn changed_mask(current: &Grid, previous: &Grid, row: u16, cols: u16) -> Vec<bool> {
    let mut mask: Vec<bool> = (1..=cols)
        .map(|col| current.get(row, col).unwrap() != previous.get(row, col).unwrap())
        .collect();

    for col in 1..=cols {
        let idx = (col - 1) as usize;
        if mask[idx] && current.get(row, col).unwrap().is_continuation() && idx > 0 {
            mask[idx - 1] = true;
        }
        if mask[idx] && current.get(row, col).unwrap().width() == 2 && (idx + 1) < mask.len() {
            mask[idx + 1] = true;
        }
    }
    mask
}

/// Maximal true-runs, merged left to right whenever the gap between two
/// consecutive runs is smaller than [`MERGE_GAP_THRESHOLD`]. Returns
/// 0-indexed inclusive `(start, end)` ranges in ascending column order.
fn merged_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut raw = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &changed) in mask.iter().enumerate() {
        match (changed, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                raw.push((s, i - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        raw.push((s, mask.len() - 1));
    }

    let mut merged: Vec<(usize, usize)> = Vec::new();
    for run in raw {
        if let Some(last) = merged.last_mut() {
            let gap = run.0 - last.1 - 1;
            if gap < MERGE_GAP_THRESHOLD {
                last.1 = run.1;
                continue;
            }
        }
        merged.push(run);
    }
    merged
}

/// Emit `Move`, then alternating `Style`/`Text` ops covering
/// `[start_col, end_col]` of `row`, reading content from `current`.
/// Continuation sentinels contribute no text of their own; the preceding
/// lead's grapheme already accounts for their column.
fn emit_run(ops: &mut Vec<Op>, current: &Grid, row: u16, start_col: u16, end_col: u16) {
    ops.push(Op::Move(row, start_col));
    let mut last_style: Option<Style> = None;
    let mut text = String::new();

    for col in start_col..=end_col {
        let cell = current.get(row, col).unwrap();
        if cell.is_continuation() {
            continue;
        }
        let style = cell.style();
        if Some(style) != last_style {
            if !text.is_empty() {
                ops.push(Op::Text(std::mem::take(&mut text)));
            }
            ops.push(Op::Style(style));
            last_style = Some(style);
        }
        text.push_str(cell.grapheme());
    }
    if !text.is_empty() {
        ops.push(Op::Text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termloop_types::{Color, Grid, NamedColor, Style};

    #[test]
    fn minimal_render_writes_hi_at_origin() {
        let previous = Grid::new(5, 10).unwrap();
        let mut current = Grid::new(5, 10).unwrap();
        current.write_str(1, 1, "Hi", Style::default()).unwrap();

        let ops = diff(&current, &previous);
        assert_eq!(
            ops,
            vec![
                Op::Move(1, 1),
                Op::Style(Style::default()),
                Op::Text("Hi".into()),
            ]
        );
    }

    #[test]
    fn style_run_optimization_merges_small_gap() {
        let previous = Grid::new(1, 10).unwrap();
        let mut current = Grid::new(1, 10).unwrap();
        let red = Style::default().with_fg(Color::Named(NamedColor::Red));
        current.write_str(1, 1, "AAAA", red).unwrap();
        current.write_str(1, 5, "BB", red).unwrap();

        let ops = diff(&current, &previous);
        assert_eq!(
            ops,
            vec![Op::Move(1, 1), Op::Style(red), Op::Text("AAAABB".into())]
        );
    }

    #[test]
    fn far_apart_runs_stay_separate() {
        let previous = Grid::new(1, 20).unwrap();
        let mut current = Grid::new(1, 20).unwrap();
        current.write_str(1, 1, "A", Style::default()).unwrap();
        current.write_str(1, 10, "B", Style::default()).unwrap();

        let ops = diff(&current, &previous);
        assert_eq!(
            ops,
            vec![
                Op::Move(1, 1),
                Op::Style(Style::default()),
                Op::Text("A".into()),
                Op::Move(1, 10),
                Op::Style(Style::default()),
                Op::Text("B".into()),
            ]
        );
    }

    #[test]
    fn diff_is_deterministic() {
        let previous = Grid::new(3, 10).unwrap();
        let mut current = Grid::new(3, 10).unwrap();
        current.write_str(2, 3, "xy", Style::default()).unwrap();
        assert_eq!(diff(&current, &previous), diff(&current, &previous));
    }

    #[test]
    fn diff_correctness_round_trip() {
        let mut previous = Grid::new(2, 8).unwrap();
        previous.write_str(1, 1, "old", Style::default()).unwrap();
        let mut current = Grid::new(2, 8).unwrap();
        current.write_str(1, 1, "newer!", Style::default()).unwrap();
        current.write_str(2, 2, "z", Style::default()).unwrap();

        let ops = diff(&current, &previous);

        // Replay the ops onto a copy of `previous` and check it matches `current`.
        let mut replay = previous.clone();
        let mut cursor: Option<(u16, u16)> = None;
        for op in &ops {
            match op {
                Op::Move(r, c) => cursor = Some((*r, *c)),
                Op::Style(_) => {}
                Op::Text(t) => {
                    let (r, c) = cursor.expect("text op without prior move");
                    let end = replay.write_str(r, c, t, Style::default()).unwrap();
                    cursor = Some((r, end));
                }
            }
        }
        for row in 1..=2u16 {
            for col in 1..=8u16 {
                assert_eq!(
                    replay.get(row, col).unwrap(),
                    current.get(row, col).unwrap(),
                    "mismatch at ({row},{col})"
                );
            }
        }
    }

    #[test]
    fn wide_grapheme_run_not_split_at_continuation() {
        let previous = Grid::new(1, 10).unwrap();
        let mut current = Grid::new(1, 10).unwrap();
        current.write_str(1, 1, "\u{6F22}a", Style::default()).unwrap();

        let ops = diff(&current, &previous);
        assert_eq!(
            ops,
            vec![
                Op::Move(1, 1),
                Op::Style(Style::default()),
                Op::Text("\u{6F22}a".into()),
            ]
        );
    }
}
