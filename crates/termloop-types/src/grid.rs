use crate::cell::Cell;
use crate::error::TermError;
use crate::style::Style;
use termloop_text::segment_graphemes;

/// Minimum and maximum row/column count, 1-indexed externally.
pub const MIN_DIM: u16 = 1;
pub const MAX_DIM: u16 = 9999;

/// A dense row-major grid of cells. Externally addressed `1..=rows` and
/// `1..=cols`; stored 0-indexed internally.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u16,
    cols: u16,
    cells: Vec<Cell>,
}

fn check_dims(rows: u16, cols: u16) -> Result<(), TermError> {
    if rows < MIN_DIM || rows > MAX_DIM || cols < MIN_DIM || cols > MAX_DIM {
        return Err(TermError::OutOfBounds {
            row: rows,
            col: cols,
            rows,
            cols,
        });
    }
    Ok(())
}

impl Grid {
    pub fn new(rows: u16, cols: u16) -> Result<Self, TermError> {
        check_dims(rows, cols)?;
        let cells = (0..(rows as usize * cols as usize))
            .map(|_| Cell::blank())
            .collect();
        Ok(Grid { rows, cols, cells })
    }

    pub fn dims(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn index(&self, row: u16, col: u16) -> Result<usize, TermError> {
        if row < 1 || row > self.rows || col < 1 || col > self.cols {
            return Err(TermError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok((row - 1) as usize * self.cols as usize + (col - 1) as usize)
    }

    pub fn get(&self, row: u16, col: u16) -> Result<&Cell, TermError> {
        let idx = self.index(row, col)?;
        Ok(&self.cells[idx])
    }

    /// Write a single cell. If `cell` is a wide lead, the following column
    /// is set to `Cell::Continuation`; that column must itself be in
    /// bounds or the write is rejected entirely (no partial write).
    pub fn set(&mut self, row: u16, col: u16, cell: Cell) -> Result<(), TermError> {
        let width = cell.width().max(1);
        if width == 2 {
            self.index(row, col + 1)?;
        }
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        if width == 2 {
            let cont_idx = self.index(row, col + 1)?;
            self.cells[cont_idx] = Cell::Continuation;
        }
        Ok(())
    }

    /// Write `text` starting at `(row, col)` with `style`, one grapheme per
    /// cell (two columns for wide graphemes), stopping cleanly at the row's
    /// right edge. Returns the column just past the last cell written.
    pub fn write_str(&mut self, row: u16, col: u16, text: &str, style: Style) -> Result<u16, TermError> {
        let mut cursor = col;
        for seg in segment_graphemes(text) {
            if cursor > self.cols {
                break;
            }
            if cursor as u32 + seg.width as u32 - 1 > self.cols as u32 {
                break;
            }
            self.set(row, cursor, Cell::new(seg.cluster, style))?;
            cursor += seg.width as u16;
        }
        Ok(cursor)
    }

    /// Reset every cell to the blank value.
    pub fn clear(&mut self) {
        for c in self.cells.iter_mut() {
            *c = Cell::blank();
        }
    }

    /// Reallocate to `(rows, cols)`, preserving the overlapping
    /// `min(rows, new_rows) x min(cols, new_cols)` rectangle.
    pub fn resize(&mut self, new_rows: u16, new_cols: u16) -> Result<(), TermError> {
        check_dims(new_rows, new_cols)?;
        let mut new_cells: Vec<Cell> = (0..(new_rows as usize * new_cols as usize))
            .map(|_| Cell::blank())
            .collect();
        let overlap_rows = self.rows.min(new_rows);
        let overlap_cols = self.cols.min(new_cols);
        for r in 0..overlap_rows as usize {
            for c in 0..overlap_cols as usize {
                let old_idx = r * self.cols as usize + c;
                let new_idx = r * new_cols as usize + c;
                new_cells[new_idx] = self.cells[old_idx].clone();
            }
        }
        self.rows = new_rows;
        self.cols = new_cols;
        self.cells = new_cells;
        Ok(())
    }
}

/// The double-buffered grid pair the render loop writes through.
pub struct BufferPair {
    pub current: Grid,
    pub previous: Grid,
    dims: (u16, u16),
}

impl BufferPair {
    pub fn new(rows: u16, cols: u16) -> Result<Self, TermError> {
        Ok(BufferPair {
            current: Grid::new(rows, cols)?,
            previous: Grid::new(rows, cols)?,
            dims: (rows, cols),
        })
    }

    pub fn dims(&self) -> (u16, u16) {
        self.dims
    }

    /// Swap `current` into `previous` after a successful render, leaving
    /// `current` holding what was previously rendered (the caller repaints
    /// it from scratch next frame via `view`).
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Reallocate both buffers, preserving the overlapping rectangle in each.
    pub fn resize(&mut self, rows: u16, cols: u16) -> Result<(), TermError> {
        self.current.resize(rows, cols)?;
        self.previous.resize(rows, cols)?;
        self.dims = (rows, cols);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_dims_rejected() {
        assert!(Grid::new(0, 10).is_err());
        assert!(Grid::new(10, 10_000).is_err());
    }

    #[test]
    fn new_grid_is_all_blank() {
        let g = Grid::new(3, 3).unwrap();
        assert_eq!(g.get(1, 1).unwrap().grapheme(), " ");
    }

    #[test]
    fn set_out_of_bounds_errors() {
        let mut g = Grid::new(2, 2).unwrap();
        assert!(g.set(3, 1, Cell::blank()).is_err());
        assert!(g.set(1, 3, Cell::blank()).is_err());
    }

    #[test]
    fn write_str_advances_by_grapheme_width() {
        let mut g = Grid::new(1, 10).unwrap();
        let end = g.write_str(1, 1, "Hi", Style::default()).unwrap();
        assert_eq!(end, 3);
        assert_eq!(g.get(1, 1).unwrap().grapheme(), "H");
        assert_eq!(g.get(1, 2).unwrap().grapheme(), "i");
    }

    #[test]
    fn wide_grapheme_writes_continuation_sentinel() {
        let mut g = Grid::new(1, 10).unwrap();
        g.write_str(1, 1, "\u{6F22}", Style::default()).unwrap();
        assert!(g.get(1, 1).unwrap().is_lead());
        assert!(g.get(1, 2).unwrap().is_continuation());
    }

    #[test]
    fn resize_preserves_overlapping_rectangle() {
        let mut g = Grid::new(24, 80).unwrap();
        g.write_str(1, 1, "Hello", Style::default()).unwrap();
        g.resize(40, 120).unwrap();
        assert_eq!(g.dims(), (40, 120));
        for (i, ch) in "Hello".chars().enumerate() {
            assert_eq!(g.get(1, 1 + i as u16).unwrap().grapheme(), ch.to_string());
        }
    }

    #[test]
    fn buffer_pair_swap_exchanges_current_and_previous() {
        let mut bp = BufferPair::new(2, 2).unwrap();
        bp.current.write_str(1, 1, "x", Style::default()).unwrap();
        bp.swap();
        assert_eq!(bp.previous.get(1, 1).unwrap().grapheme(), "x");
    }
}
